use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A leaf in the overrides disagrees with the value already in the target.
    #[error("conflict at {path}")]
    MergeConflict { path: String },

    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("unsupported configuration value at {0} (arrays are not settings)")]
    UnsupportedValue(String),
}
