//! Display formatting for the weather card

use crate::controller::DisplayState;
use chrono::Local;
use skycast_weather::glyph_for;

/// Placeholder shown in the name and temperature slots while a request is
/// in flight
pub const LOADING_TEXT: &str = "Loading...";

/// Placeholder for slots with nothing to show
pub const MISSING_VALUE: &str = "--";

/// Name-line text while an error message is on the card
pub const ERROR_TITLE: &str = "Error";

/// Glyph shown instead of a condition icon while an error is displayed
pub const ERROR_GLYPH: &str = "❌";

/// Rounds to the nearest whole number with ties toward positive infinity,
/// so -0.5 rounds to 0 and -1.5 to -1.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Whole-degree temperature string. Rounding is half-up and goes through
/// an integer, so a reading just below zero comes out "0", never "-0".
pub fn format_temperature(celsius: f64) -> String {
    round_half_up(celsius).to_string()
}

/// Wind in whole km/h from the API's metres per second
pub fn format_wind_speed(metres_per_second: f64) -> String {
    round_half_up(metres_per_second * 3.6).to_string()
}

/// Percentage slots (humidity, cloud cover)
pub fn format_percent(value: u8) -> String {
    format!("{value}%")
}

/// Every string the card renders, derived from the display state in one
/// place so the screen code stays dumb
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub description: String,
    pub glyph: String,
    pub temperature: String,
    pub wind: String,
    pub humidity: String,
    pub clouds: String,
    pub footer_note: String,
}

pub fn card_view(state: &DisplayState) -> CardView {
    match state {
        DisplayState::Idle => CardView {
            name: MISSING_VALUE.to_string(),
            description: String::new(),
            glyph: " ".to_string(),
            temperature: format!("{MISSING_VALUE}°C"),
            wind: MISSING_VALUE.to_string(),
            humidity: MISSING_VALUE.to_string(),
            clouds: MISSING_VALUE.to_string(),
            footer_note: String::new(),
        },
        DisplayState::Loading => CardView {
            name: LOADING_TEXT.to_string(),
            description: String::new(),
            glyph: " ".to_string(),
            temperature: LOADING_TEXT.to_string(),
            wind: MISSING_VALUE.to_string(),
            humidity: MISSING_VALUE.to_string(),
            clouds: MISSING_VALUE.to_string(),
            footer_note: String::new(),
        },
        DisplayState::Showing(reading) => CardView {
            name: format!("{}, {}", reading.city, reading.country),
            description: reading.description.to_uppercase(),
            glyph: glyph_for(reading.condition, reading.condition_code).to_string(),
            temperature: format!("{}°C", format_temperature(reading.temperature_c)),
            wind: format!("{} km/h", format_wind_speed(reading.wind_speed_mps)),
            humidity: format_percent(reading.humidity_pct),
            clouds: format_percent(reading.cloud_cover_pct),
            footer_note: format!(
                "fetched {}",
                reading
                    .fetched_at
                    .with_timezone(&Local)
                    .format("%H:%M:%S")
            ),
        },
        DisplayState::Error(message) => CardView {
            name: ERROR_TITLE.to_string(),
            description: message.to_uppercase(),
            glyph: ERROR_GLYPH.to_string(),
            temperature: format!("{MISSING_VALUE}°C"),
            wind: MISSING_VALUE.to_string(),
            humidity: MISSING_VALUE.to_string(),
            clouds: MISSING_VALUE.to_string(),
            footer_note: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skycast_weather::{Condition, Reading};

    #[test]
    fn test_temperature_rounds_to_nearest_degree() {
        assert_eq!(format_temperature(26.6), "27");
        assert_eq!(format_temperature(26.4), "26");
        assert_eq!(format_temperature(0.0), "0");
        assert_eq!(format_temperature(-12.7), "-13");
    }

    #[test]
    fn test_temperature_never_shows_negative_zero() {
        assert_eq!(format_temperature(-0.4), "0");
        assert_eq!(format_temperature(-0.0), "0");
    }

    #[test]
    fn test_temperature_ties_round_toward_positive_infinity() {
        assert_eq!(format_temperature(-0.5), "0");
        assert_eq!(format_temperature(-1.5), "-1");
        assert_eq!(format_temperature(0.5), "1");
        assert_eq!(format_temperature(2.5), "3");
    }

    #[test]
    fn test_wind_speed_converts_to_kmh() {
        assert_eq!(format_wind_speed(1.39), "5");
        assert_eq!(format_wind_speed(0.0), "0");
        assert_eq!(format_wind_speed(8.0), "29");
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(format_percent(64), "64%");
        assert_eq!(format_percent(0), "0%");
    }

    #[test]
    fn test_showing_card_formats_every_slot() {
        let state = DisplayState::Showing(Reading {
            city: "Nagpur".to_string(),
            country: "IN".to_string(),
            condition: Condition::Clouds,
            condition_code: 802,
            description: "scattered clouds".to_string(),
            temperature_c: 26.6,
            wind_speed_mps: 1.39,
            humidity_pct: 64,
            cloud_cover_pct: 40,
            fetched_at: Utc::now(),
        });

        let card = card_view(&state);
        assert_eq!(card.name, "Nagpur, IN");
        assert_eq!(card.description, "SCATTERED CLOUDS");
        assert_eq!(card.glyph, "☁️");
        assert_eq!(card.temperature, "27°C");
        assert_eq!(card.wind, "5 km/h");
        assert_eq!(card.humidity, "64%");
        assert_eq!(card.clouds, "40%");
        assert!(card.footer_note.starts_with("fetched "));
    }

    #[test]
    fn test_error_card_uses_placeholders_and_uppercases() {
        let state = DisplayState::Error("City not found. Please check the city name.".to_string());

        let card = card_view(&state);
        assert_eq!(card.name, "Error");
        assert_eq!(card.description, "CITY NOT FOUND. PLEASE CHECK THE CITY NAME.");
        assert_eq!(card.glyph, "❌");
        assert_eq!(card.temperature, "--°C");
        assert_eq!(card.wind, "--");
        assert_eq!(card.humidity, "--");
        assert_eq!(card.clouds, "--");
    }

    #[test]
    fn test_loading_card_shows_placeholder_text() {
        let card = card_view(&DisplayState::Loading);
        assert_eq!(card.name, "Loading...");
        assert_eq!(card.temperature, "Loading...");
        assert_eq!(card.description, "");
        assert_eq!(card.wind, "--");
    }
}
