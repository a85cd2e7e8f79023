//! Helpers for screen-reader add-ons that write into the host configuration
//! and read its configuration specification.
//!
//! - [`config`]: the [`ConfigValue`] model and [`merge_into`], a deep merge
//!   that refuses to overwrite differing values.
//! - [`spec`]: [`SpecCache`], which resolves a possibly partial key reference
//!   once and serves its min, max, default and type from memory afterwards.

pub mod config;
mod error;
pub mod spec;

pub use config::{merge_into, ConfigError, ConfigMap, ConfigStore, ConfigValue};
pub use error::Error;
pub use spec::{ConfigSpec, SpecCache, SpecError, SpecSource};
