//! Error types at the token and gateway boundaries.

use thiserror::Error;

/// A bearer token that cannot be read as claims.
///
/// Always handled as "no valid session"; never fatal.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("token must have 3 segments, found {0}")]
    Malformed(usize),
    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not a claims object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure below the HTTP layer (DNS, CORS, connection reset, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Closed set of outcomes a view can receive from the gateway.
///
/// `message` fields carry whatever the remote service put in its error body,
/// when it put anything there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("unauthorized: {}", .message.as_deref().unwrap_or("token rejected"))]
    Unauthorized { message: Option<String> },
    #[error("forbidden: {}", .message.as_deref().unwrap_or("permission denied"))]
    Forbidden { message: Option<String> },
    #[error("network error: {0}")]
    NetworkFailure(String),
    #[error("request failed{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Other { status: Option<u16>, message: String },
}

impl GatewayError {
    /// Message supplied by the remote service, if it supplied one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Forbidden { message } => message.as_deref(),
            Self::Other {
                status: Some(_),
                message,
            } => Some(message.as_str()),
            Self::Other { status: None, .. } | Self::NetworkFailure(_) => None,
        }
    }

    /// Line suitable for an error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized { message } => message
                .clone()
                .unwrap_or_else(|| "Your session is no longer valid. Please log in again.".to_string()),
            Self::Forbidden { message } => message
                .clone()
                .unwrap_or_else(|| "You do not have permission to do that.".to_string()),
            Self::NetworkFailure(message) => format!("Network error: {}", message),
            Self::Other { message, .. } => message.clone(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        Self::NetworkFailure(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_defaults() {
        let err = GatewayError::Unauthorized { message: None };
        assert!(err.user_message().contains("log in again"));
        assert!(err.is_unauthorized());

        let err = GatewayError::Forbidden {
            message: Some("Buyers only".to_string()),
        };
        assert_eq!(err.user_message(), "Buyers only");
        assert_eq!(err.server_message(), Some("Buyers only"));
    }

    #[test]
    fn test_transport_error_becomes_network_failure() {
        let err: GatewayError = TransportError::new("connection refused").into();
        assert_eq!(err, GatewayError::NetworkFailure("connection refused".to_string()));
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message(), "Network error: connection refused");
    }

    #[test]
    fn test_other_display_includes_status() {
        let err = GatewayError::Other {
            status: Some(500),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "request failed (500): boom");
    }
}
