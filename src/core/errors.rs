use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported {kind} value: {value}")]
    UnsupportedValue { kind: &'static str, value: String },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Style set parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolError {
    pub(crate) fn unsupported(kind: &'static str, value: impl std::fmt::Debug) -> Self {
        Self::UnsupportedValue {
            kind,
            value: format!("{:?}", value),
        }
    }
}

pub type ToolResult<T> = Result<T, ToolError>;
