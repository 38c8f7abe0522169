use client::{ApiError, ErrorKind};

/// Why the view is showing an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The selected name isn't one of the country's regions.
    RegionNotFound(String),
    Api(ApiError),
}

impl ViewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ViewError::RegionNotFound(_) => ErrorKind::NotFound,
            ViewError::Api(e) => e.kind(),
        }
    }
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::RegionNotFound(name) => write!(f, "no region named {name:?}"),
            ViewError::Api(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewError::RegionNotFound(_) => None,
            ViewError::Api(e) => Some(e),
        }
    }
}

impl From<ApiError> for ViewError {
    fn from(e: ApiError) -> Self {
        ViewError::Api(e)
    }
}

/// What the user should currently be told about the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    #[default]
    Ready,
    Error(ViewError),
}

impl ViewStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewStatus::Ready)
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewStatus::Ready => None,
            ViewStatus::Error(e) => Some(e),
        }
    }
}
