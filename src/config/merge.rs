//! Conflict-checked deep merge of configuration mappings.

use tracing::{debug, warn};

use super::{ConfigError, ConfigMap, ConfigValue};

/// Merges `overrides` into `target` in place and returns `target`.
///
/// Keys missing from `target` are inserted with their whole subtree. Nested
/// mappings present on both sides are merged recursively. A leaf that is
/// already present with the same value is left alone; any other collision
/// (different leaf values, or a leaf meeting a mapping) fails with
/// [`ConfigError::MergeConflict`] naming the dotted path of the key.
///
/// Nothing is rolled back on failure, so `target` may keep the entries that
/// were merged before the conflict was found.
///
/// ```
/// use addon_config_helper::config::{merge_into, parse_config};
///
/// let mut target = parse_config("[sound]\nvolume = \"50\"\n")?;
/// let overrides = parse_config("[sound]\nvolume = \"50\"\nmute = \"false\"\n")?;
///
/// merge_into(&mut target, &overrides)?;
/// assert_eq!(target, parse_config("[sound]\nvolume = \"50\"\nmute = \"false\"\n")?);
/// # Ok::<(), addon_config_helper::ConfigError>(())
/// ```
pub fn merge_into<'a>(
    target: &'a mut ConfigMap,
    overrides: &ConfigMap,
) -> Result<&'a mut ConfigMap, ConfigError> {
    let mut path = Vec::new();
    merge_at(target, overrides, &mut path)?;
    Ok(target)
}

fn merge_at(
    target: &mut ConfigMap,
    overrides: &ConfigMap,
    path: &mut Vec<String>,
) -> Result<(), ConfigError> {
    for (key, value) in overrides {
        match (target.get_mut(key), value) {
            (Some(ConfigValue::Node(base)), ConfigValue::Node(overlay)) => {
                path.push(key.clone());
                merge_at(base, overlay, path)?;
                path.pop();
            }
            (Some(existing), value) if *existing == *value => {}
            (Some(_), _) => {
                path.push(key.clone());
                let path = path.join(".");
                warn!(%path, "configuration merge conflict");
                return Err(ConfigError::MergeConflict { path });
            }
            (None, value) => {
                debug!(parent = %path.join("."), %key, "inserting configuration key");
                target.insert(key.clone(), value.clone());
            }
        }
    }
    Ok(())
}
