/// Errors from galaxy parameter handling and generation.
#[derive(Debug, thiserror::Error)]
pub enum GalaxyError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported parameter file format: {0:?}")]
    UnsupportedFormat(String),
}

impl GalaxyError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field for `InvalidParameter`, `None` otherwise.
    pub fn invalid_field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(*field),
            _ => None,
        }
    }
}
