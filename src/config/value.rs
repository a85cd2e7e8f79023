//! The configuration value model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use super::ConfigError;

/// A nested configuration mapping, keyed by setting name.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A single configuration value: either a textual leaf or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Leaf(String),
    Node(ConfigMap),
}

impl ConfigValue {
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(s) => Some(s),
            Self::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&ConfigMap> {
        match self {
            Self::Node(map) => Some(map),
            Self::Leaf(_) => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        Self::Node(map)
    }
}

/// Parses TOML text into a configuration mapping.
///
/// Scalars that are not strings are kept as their textual rendering, so
/// `volume = 50` and `volume = "50"` produce the same leaf.
///
/// ```
/// use addon_config_helper::config::parse_config;
///
/// let map = parse_config("[sound]\nvolume = 50\n")?;
/// assert_eq!(map["sound"].as_node().unwrap()["volume"].as_leaf(), Some("50"));
/// # Ok::<(), addon_config_helper::ConfigError>(())
/// ```
pub fn parse_config(text: &str) -> Result<ConfigMap, ConfigError> {
    let table: Table = toml::from_str(text)?;
    from_toml_table(table)
}

/// Converts an already-parsed TOML table into a configuration mapping.
pub fn from_toml_table(table: Table) -> Result<ConfigMap, ConfigError> {
    let mut path = Vec::new();
    convert_table(table, &mut path)
}

fn convert_table(table: Table, path: &mut Vec<String>) -> Result<ConfigMap, ConfigError> {
    let mut map = ConfigMap::new();
    for (key, value) in table {
        path.push(key.clone());
        let converted = convert_value(value, path)?;
        path.pop();
        map.insert(key, converted);
    }
    Ok(map)
}

fn convert_value(value: Value, path: &mut Vec<String>) -> Result<ConfigValue, ConfigError> {
    match value {
        Value::String(s) => Ok(ConfigValue::Leaf(s)),
        Value::Integer(i) => Ok(ConfigValue::Leaf(i.to_string())),
        Value::Float(f) => Ok(ConfigValue::Leaf(f.to_string())),
        Value::Boolean(b) => Ok(ConfigValue::Leaf(b.to_string())),
        Value::Datetime(dt) => Ok(ConfigValue::Leaf(dt.to_string())),
        Value::Table(t) => convert_table(t, path).map(ConfigValue::Node),
        Value::Array(_) => Err(ConfigError::UnsupportedValue(path.join("."))),
    }
}
