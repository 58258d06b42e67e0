use std::path::PathBuf;

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("input not found: '{}': {source}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("schema conflict: {0}")]
    SchemaConflict(String),

    #[error("output write failure: '{}': {source}", .path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serde(String),
}

impl LayoutError {
    pub fn input_not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputNotFound {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn schema_conflict(msg: impl Into<String>) -> Self {
        Self::SchemaConflict(msg.into())
    }

    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWriteFailure {
            path: path.into(),
            source,
        }
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
