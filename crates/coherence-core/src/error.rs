use thiserror::Error;

/// Construction-time failure. Nothing is built when this is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("invalid memory capacity {0}: must hold at least one event")]
    ZeroCapacity(usize),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        ConfigError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// A tick was given a non-finite error value. The engine was not touched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid sample {value}: error must be a finite real")]
pub struct InvalidSampleError {
    pub value: f64,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
