use thiserror::Error;

/// Client-facing lookup failures. Each variant carries the message shown to
/// the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    UpstreamFailure(String),
}

impl LookupError {
    pub fn city_required() -> Self {
        Self::InvalidInput("City parameter is required".to_string())
    }

    pub fn city_not_found(city: &str) -> Self {
        Self::NotFound(format!("City \"{city}\" not found"))
    }

    pub fn upstream() -> Self {
        Self::UpstreamFailure("Error fetching weather data".to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(msg) | Self::NotFound(msg) | Self::UpstreamFailure(msg) => msg,
        }
    }

    /// HTTP status the proxy answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::UpstreamFailure(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(LookupError::city_required().status_code(), 400);
        assert_eq!(LookupError::city_not_found("Atlantis").status_code(), 404);
        assert_eq!(LookupError::upstream().status_code(), 500);
    }

    #[test]
    fn not_found_message_quotes_city() {
        let err = LookupError::city_not_found("Atlantis");
        assert_eq!(err.message(), "City \"Atlantis\" not found");
        assert_eq!(err.to_string(), err.message());
    }
}
