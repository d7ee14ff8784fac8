use thiserror::Error;

/// The GET itself went wrong: no response, an unreadable body, or a non-2xx
/// status.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("request failed: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed reading body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("bad response: {status}")]
    Status { status: u16 },
}

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to decode response: {0}")]
    Parse(#[from] quick_xml::DeError),

    /// DogNZB answered, but reported a failure in the body.
    #[error("dognzb error {code}: {description}")]
    Service { code: String, description: String },
}

impl WatchlistError {
    pub fn is_transport(&self) -> bool {
        matches!(self, WatchlistError::Transport(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, WatchlistError::Parse(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, WatchlistError::Service { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_carries_description() {
        let err = WatchlistError::Service {
            code: "100".to_string(),
            description: "Incorrect user credentials".to_string(),
        };
        assert!(err.is_service());
        assert!(err.to_string().contains("Incorrect user credentials"));
    }

    #[test]
    fn test_status_error_is_transport() {
        let err: WatchlistError = TransportError::Status { status: 500 }.into();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "bad response: 500");
    }
}
