//! Configuration values and conflict-checked merging.

mod error;
mod merge;
mod store;
mod value;

pub use error::ConfigError;
pub use merge::merge_into;
pub use store::ConfigStore;
pub use value::{from_toml_table, parse_config, ConfigMap, ConfigValue};
