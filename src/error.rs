use thiserror::Error;

/// Unified error type for the client.
///
/// This is a closed taxonomy: every failure a public operation can surface is
/// one of these variants, classified once at the point where the raw failure
/// is first observed (status line, network error, or malformed payload).
#[derive(Debug, Error)]
pub enum Error {
    /// Connection refused, unreachable, or reset before any bytes arrived.
    #[error("connection to inference server failed: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Overall request deadline or streaming inactivity window exceeded.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// 401/403 from the server.
    #[error("authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// 404, or a payload explicitly reporting a missing model.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// 400 from the server, or a request rejected client-side before any I/O.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Any 5xx from the server.
    #[error("server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// Malformed or truncated stream payload, or a mid-stream error record.
    #[error("streaming failed: {message}")]
    Streaming { message: String },

    /// The selected model does not support the requested operation.
    #[error("model incompatible with requested operation: {message}")]
    ModelCompatibility { message: String },

    /// Anything else, wrapping the underlying cause.
    #[error("unclassified error: {message}")]
    Unclassified {
        message: String,
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn streaming(message: impl Into<String>) -> Self {
        Error::Streaming {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Error::Timeout {
            message: message.into(),
        }
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        Error::Unclassified {
            message: message.into(),
            cause: None,
        }
    }

    /// Classify a non-success HTTP status together with the error body the
    /// server returned for it.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => {
                if payload_reports_incompatibility(&message) {
                    Error::ModelCompatibility { message }
                } else if payload_reports_missing_model(&message) {
                    Error::NotFound { message }
                } else {
                    Error::InvalidRequest { message }
                }
            }
            401 | 403 => Error::Authentication { status, message },
            404 => Error::NotFound { message },
            500..=599 => Error::Server { status, message },
            _ => Error::Unclassified {
                message: format!("HTTP {}: {}", status, message),
                cause: None,
            },
        }
    }

    /// Classify a failure raised by the network layer itself, before a status
    /// line was available.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            Error::Connection {
                message: err.to_string(),
                source: Some(err),
            }
        } else {
            Error::Unclassified {
                message: err.to_string(),
                cause: Some(Box::new(err)),
            }
        }
    }

    /// Classify an application-level error record observed inside a stream.
    pub(crate) fn from_stream_payload(message: impl Into<String>) -> Self {
        let message = message.into();
        if payload_reports_missing_model(&message) {
            Error::NotFound { message }
        } else if payload_reports_incompatibility(&message) {
            Error::ModelCompatibility { message }
        } else {
            Error::Streaming { message }
        }
    }

    /// Whether a retry of the same request might succeed.
    ///
    /// Only connection failures, timeouts and 5xx are transient; everything
    /// else propagates on first occurrence.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Connection { .. } | Error::Timeout { .. } | Error::Server { .. }
        )
    }

    /// HTTP status associated with this error, if one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Authentication { status, .. } | Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn payload_reports_missing_model(message: &str) -> bool {
    let m = message.to_lowercase();
    m.contains("not found") || m.contains("no such model")
}

fn payload_reports_incompatibility(message: &str) -> bool {
    let m = message.to_lowercase();
    m.contains("does not support") || m.contains("cannot be used for")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            Error::from_status(400, "invalid option"),
            Error::InvalidRequest { .. }
        ));
        assert!(matches!(
            Error::from_status(401, "denied"),
            Error::Authentication { status: 401, .. }
        ));
        assert!(matches!(
            Error::from_status(403, "denied"),
            Error::Authentication { status: 403, .. }
        ));
        assert!(matches!(
            Error::from_status(404, "model \"x\" not found"),
            Error::NotFound { .. }
        ));
        assert!(matches!(
            Error::from_status(500, "boom"),
            Error::Server { status: 500, .. }
        ));
        assert!(matches!(
            Error::from_status(503, "overloaded"),
            Error::Server { status: 503, .. }
        ));
    }

    #[test]
    fn missing_model_payload_maps_to_not_found() {
        assert!(matches!(
            Error::from_status(400, "model \"nope\" not found, try pulling it first"),
            Error::NotFound { .. }
        ));
        assert!(matches!(
            Error::from_stream_payload("model \"nope\" not found"),
            Error::NotFound { .. }
        ));
    }

    #[test]
    fn incompatibility_payload_maps_to_model_compatibility() {
        assert!(matches!(
            Error::from_status(400, "this model does not support embeddings"),
            Error::ModelCompatibility { .. }
        ));
    }

    #[test]
    fn transient_set_is_exactly_connection_timeout_server() {
        assert!(Error::timeout("t").is_transient());
        assert!(Error::from_status(502, "bad gateway").is_transient());
        assert!(Error::Connection {
            message: "refused".into(),
            source: None
        }
        .is_transient());

        assert!(!Error::from_status(400, "bad").is_transient());
        assert!(!Error::from_status(404, "missing").is_transient());
        assert!(!Error::from_status(401, "auth").is_transient());
        assert!(!Error::streaming("truncated").is_transient());
        assert!(!Error::unclassified("other").is_transient());
    }
}
