use crate::error::FetchError;
use crate::types::{Condition, Coordinates, Reading};
use chrono::Utc;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// OpenWeatherMap current-weather endpoint
const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Per-request timeout. A hung lookup must not wedge the event loop.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Readings are requested in metric units; the card's °C and km/h labels
/// assume this.
const UNITS: &str = "metric";

/// Client for the OpenWeatherMap current-weather API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, OPENWEATHER_URL)
    }

    /// Client pointed at a non-default endpoint (config override, tests)
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
        })
    }

    /// Fetch the current reading for a named city
    #[instrument(skip(self))]
    pub async fn fetch_by_city(&self, city: &str) -> Result<Reading, FetchError> {
        debug!("Fetching weather by city");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await?;

        Self::decode(response, city).await
    }

    /// Fetch the current reading for a coordinate pair
    #[instrument(skip(self))]
    pub async fn fetch_by_coordinates(&self, coords: Coordinates) -> Result<Reading, FetchError> {
        debug!("Fetching weather by coordinates");
        let query = [
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", UNITS.to_string()),
        ];
        let response = self.client.get(&self.base_url).query(&query).send().await?;

        let requested = format!("{:.4},{:.4}", coords.latitude, coords.longitude);
        Self::decode(response, &requested).await
    }

    /// Map an HTTP response onto a `Reading` or the error taxonomy the card
    /// knows how to present
    async fn decode(response: Response, requested: &str) -> Result<Reading, FetchError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::CityNotFound(requested.to_string()));
        }

        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let payload: OwmResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Malformed(e.to_string())
            } else {
                FetchError::Network(e)
            }
        })?;

        payload.into_reading()
    }
}

/// Wire shape of the current-weather endpoint, reduced to the fields the
/// card displays
#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: String,
    sys: OwmSys,
    weather: Vec<OwmCondition>,
    main: OwmMain,
    wind: OwmWind,
    clouds: OwmClouds,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    id: i32,
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: u8,
}

impl OwmResponse {
    fn into_reading(self) -> Result<Reading, FetchError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Malformed("no weather conditions in response".to_string()))?;

        Ok(Reading {
            city: self.name,
            country: self.sys.country,
            condition: Condition::from_name(&condition.main),
            condition_code: condition.id,
            description: condition.description,
            temperature_c: self.main.temp,
            wind_speed_mps: self.wind.speed,
            humidity_pct: self.main.humidity,
            cloud_cover_pct: self.clouds.all,
            fetched_at: Utc::now(),
        })
    }
}
