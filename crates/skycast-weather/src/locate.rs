use crate::error::LocateError;
use crate::types::Coordinates;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// IP-side geolocation endpoint. Keyless for non-commercial use.
const IP_API_URL: &str = "http://ip-api.com/json";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Resolves the machine's position from its public IP address
#[derive(Debug, Clone)]
pub struct GeoLocator {
    client: Client,
    base_url: String,
}

impl GeoLocator {
    pub fn new() -> Result<Self, LocateError> {
        Self::with_base_url(IP_API_URL)
    }

    /// Locator pointed at a non-default endpoint (config override, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LocateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(LocateError::Unreachable)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Look up the current position
    pub async fn current_position(&self) -> Result<Coordinates, LocateError> {
        let response = self.client.get(&self.base_url).send().await.map_err(|e| {
            warn!("Location service unreachable: {e}");
            LocateError::Unreachable(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Location service rejected the lookup");
            return Err(LocateError::Refused(format!("HTTP {}", status.as_u16())));
        }

        let payload: IpApiResponse = response.json().await.map_err(|e| {
            warn!("Location service reply did not parse: {e}");
            LocateError::Invalid
        })?;

        if payload.status != "success" {
            let reason = payload
                .message
                .unwrap_or_else(|| "no reason given".to_string());
            warn!("Location service refused the lookup: {reason}");
            return Err(LocateError::Refused(reason));
        }

        match (payload.lat, payload.lon) {
            (Some(latitude), Some(longitude)) => {
                debug!(
                    city = payload.city.as_deref().unwrap_or("?"),
                    latitude, longitude, "Resolved position"
                );
                Ok(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => {
                warn!("Location service reply carried no coordinates");
                Err(LocateError::Invalid)
            }
        }
    }
}

/// Wire shape of the ip-api.com JSON endpoint. Failure replies omit the
/// coordinate fields, so everything past `status` is optional.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}
