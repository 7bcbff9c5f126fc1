/// Errors produced while loading or validating operator configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse operator config: {0}")]
    Parse(String),

    #[error("failed to serialize operator config: {0}")]
    Serialize(String),

    #[error("invalid operator config: {0}")]
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// Convenience alias used by the configuration API.
pub type ConfigResult<T> = Result<T, ConfigError>;
