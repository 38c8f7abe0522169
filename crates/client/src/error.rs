/// Coarse error classes the viewer surfaces to the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NetworkFailure,
    ValidationFailure,
}

/// Failure of a backend request.
///
/// `Clone` so a cached failure can be handed to every caller that asks for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS...).
    Network { url: String, message: String },
    /// The backend answered 404.
    NotFound { url: String },
    /// The request was rejected as invalid, locally or by the backend.
    Validation { message: String },
    /// Any other non-success status.
    Status { url: String, status: u16 },
    /// The response body wasn't the expected JSON shape.
    Decode { url: String, message: String },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Validation { .. } => ErrorKind::ValidationFailure,
            ApiError::Network { .. } | ApiError::Status { .. } | ApiError::Decode { .. } => {
                ErrorKind::NetworkFailure
            }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network { url, message } => write!(f, "request to {url} failed: {message}"),
            ApiError::NotFound { url } => write!(f, "not found: {url}"),
            ApiError::Validation { message } => write!(f, "invalid request: {message}"),
            ApiError::Status { url, status } => write!(f, "{url} answered HTTP {status}"),
            ApiError::Decode { url, message } => {
                write!(f, "unexpected response from {url}: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
