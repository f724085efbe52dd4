use thiserror::Error;

/// Rejected simulation setup.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("domain {name} must be finite and positive, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("{name} must be finite and positive, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}
