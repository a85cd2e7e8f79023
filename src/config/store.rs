//! The host's live configuration, passed around explicitly.

use super::{merge_into, parse_config, ConfigError, ConfigMap, ConfigValue};

/// In-memory configuration store owned by the host application.
///
/// The store stands in for the screen reader's process-wide configuration
/// object. Add-ons receive it by reference and write into it with
/// [`merge`](Self::merge), which refuses to overwrite values that differ.
///
/// ## Example
///
/// ```
/// use addon_config_helper::config::{parse_config, ConfigStore};
///
/// let mut store = ConfigStore::from_toml_str("[sound]\nvolume = \"50\"\n")?;
/// store.merge(&parse_config("[sound]\nmute = \"false\"\n")?)?;
///
/// assert_eq!(store.get("sound.mute").and_then(|v| v.as_leaf()), Some("false"));
/// # Ok::<(), addon_config_helper::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    conf: ConfigMap,
}

impl ConfigStore {
    /// Wraps an already-initialised configuration mapping.
    pub fn new(conf: ConfigMap) -> Self {
        Self { conf }
    }

    /// Builds a store from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        parse_config(text).map(Self::new)
    }

    /// Returns a reference to the whole configuration mapping.
    pub fn conf(&self) -> &ConfigMap {
        &self.conf
    }

    /// Looks up a value by dotted path, e.g. `"speech.espeak.rate"`.
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        let mut parts = path.split('.');
        let mut current = self.conf.get(parts.next()?)?;
        for part in parts {
            current = current.as_node()?.get(part)?;
        }
        Some(current)
    }

    /// Merges `overrides` into the live configuration.
    ///
    /// See [`merge_into`] for the conflict rules. On error the store may hold
    /// a partially merged configuration.
    pub fn merge(&mut self, overrides: &ConfigMap) -> Result<&ConfigMap, ConfigError> {
        merge_into(&mut self.conf, overrides).map(|conf| &*conf)
    }

    /// Consumes the store, returning the configuration mapping.
    pub fn into_inner(self) -> ConfigMap {
        self.conf
    }
}
