use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for '{field}': {message}")]
    Field { field: &'static str, message: String },
}

impl ConfigError {
    pub(crate) fn field(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Field {
            field,
            message: message.into(),
        }
    }
}
