/// Weather lookup errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Weather service returned HTTP {status}")]
    Http { status: u16 },
    #[error("Malformed weather response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Message shown on the weather card when a lookup fails
    pub fn user_message(&self) -> String {
        match self {
            FetchError::CityNotFound(_) => {
                "City not found. Please check the city name.".to_string()
            }
            FetchError::Http { status } => format!("Weather data not available ({status})"),
            FetchError::Network(_) => "Failed to fetch weather data. Please try again.".to_string(),
            FetchError::Malformed(_) => {
                "Received an unexpected reply from the weather service.".to_string()
            }
        }
    }
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("Location service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("Location service refused the lookup: {0}")]
    Refused(String),
    #[error("Location service returned an unusable reply")]
    Invalid,
}

impl LocateError {
    /// Message shown on the weather card when the position cannot be resolved
    pub fn user_message(&self) -> &'static str {
        match self {
            LocateError::Unreachable(_) => {
                "Unable to reach the location service. Showing default city."
            }
            LocateError::Refused(_) | LocateError::Invalid => {
                "Unable to get your location. Showing default city."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_problem() {
        let err = FetchError::CityNotFound("Atlantis".to_string());
        assert_eq!(err.user_message(), "City not found. Please check the city name.");
    }

    #[test]
    fn test_http_message_carries_the_status() {
        let err = FetchError::Http { status: 401 };
        assert_eq!(err.user_message(), "Weather data not available (401)");
    }

    #[test]
    fn test_locate_messages_point_at_the_fallback() {
        assert!(LocateError::Invalid.user_message().ends_with("Showing default city."));
        assert!(LocateError::Refused("quota".to_string())
            .user_message()
            .ends_with("Showing default city."));
    }
}
