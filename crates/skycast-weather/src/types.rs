use chrono::{DateTime, Utc};

/// Geographic position reported by the location service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Weather condition categories reported by OpenWeatherMap's `weather[0].main`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Smoke,
    Haze,
    Dust,
    Fog,
    Sand,
    Ash,
    Squall,
    Tornado,
    Unknown,
}

impl Condition {
    /// Parse the category name from the API. Unrecognized names map to
    /// `Unknown` rather than failing the whole reading.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Drizzle" => Self::Drizzle,
            "Thunderstorm" => Self::Thunderstorm,
            "Snow" => Self::Snow,
            "Mist" => Self::Mist,
            "Smoke" => Self::Smoke,
            "Haze" => Self::Haze,
            "Dust" => Self::Dust,
            "Fog" => Self::Fog,
            "Sand" => Self::Sand,
            "Ash" => Self::Ash,
            "Squall" => Self::Squall,
            "Tornado" => Self::Tornado,
            _ => Self::Unknown,
        }
    }

    /// Glyph for the category alone, used when the numeric condition code
    /// falls outside every known range
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Clouds => "☁️",
            Self::Rain => "🌧️",
            Self::Drizzle => "🌦️",
            Self::Thunderstorm => "⛈️",
            Self::Snow => "❄️",
            Self::Mist | Self::Haze | Self::Fog => "🌫️",
            Self::Smoke | Self::Dust | Self::Sand | Self::Ash | Self::Squall => "💨",
            Self::Tornado => "🌪️",
            Self::Unknown => "🌤️",
        }
    }
}

/// Glyph for a reading. The numeric condition code ranges take precedence;
/// codes outside every range fall back to the category table.
///
/// See: <https://openweathermap.org/weather-conditions>
pub fn glyph_for(condition: Condition, code: i32) -> &'static str {
    match code {
        200..=299 => "⛈️",
        300..=399 => "🌦️",
        500..=599 => "🌧️",
        600..=699 => "❄️",
        700..=799 => "🌫️",
        800 => "☀️",
        code if code > 800 => "☁️",
        _ => condition.glyph(),
    }
}

/// One current-weather reading, ready for display
#[derive(Debug, Clone)]
pub struct Reading {
    /// City name as reported by the weather service
    pub city: String,
    /// ISO country code, e.g. "IN"
    pub country: String,
    pub condition: Condition,
    /// Numeric condition code, e.g. 802 for scattered clouds
    pub condition_code: i32,
    /// Free-text description, shown uppercased on the card
    pub description: String,
    pub temperature_c: f64,
    pub wind_speed_mps: f64,
    pub humidity_pct: u8,
    pub cloud_cover_pct: u8,
    pub fetched_at: DateTime<Utc>,
}
