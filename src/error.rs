use crate::config::ConfigError;
use crate::spec::SpecError;
use thiserror::Error;

/// Top-level error type for the addon-config-helper library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("specification error: {0}")]
    Spec(#[from] SpecError),
}
