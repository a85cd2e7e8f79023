//! Lazily filled cache of specification attributes.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use super::{SpecAttr, SpecEntry, SpecError, SpecSource};

/// Caches specification lookups per requested reference.
///
/// The first request for a reference resolves it through the
/// [`SpecSource`] and stores all four attributes at once, so asking for the
/// `min` and then the `max` of the same value resolves it only once.
/// Entries are never evicted; failed lookups are not cached.
///
/// ## Example
///
/// ```
/// use addon_config_helper::spec::{ConfigSpec, SpecCache};
///
/// let spec = ConfigSpec::parse("[speech]\nrate = integer(0, 100, default=50)\n")?;
/// let mut cache = SpecCache::new(spec);
///
/// assert_eq!(cache.min("rate")?, Some("0"));
/// assert_eq!(cache.max("rate")?, Some("100"));
/// assert_eq!(cache.value_type("speech.rate")?, "integer");
/// # Ok::<(), addon_config_helper::SpecError>(())
/// ```
#[derive(Debug)]
pub struct SpecCache<S> {
    source: S,
    cache: HashMap<String, SpecEntry>,
}

impl<S: SpecSource> SpecCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    pub fn min(&mut self, reference: &str) -> Result<Option<&str>, SpecError> {
        self.attribute(reference, SpecAttr::Min)
    }

    pub fn max(&mut self, reference: &str) -> Result<Option<&str>, SpecError> {
        self.attribute(reference, SpecAttr::Max)
    }

    pub fn default(&mut self, reference: &str) -> Result<Option<&str>, SpecError> {
        self.attribute(reference, SpecAttr::Default)
    }

    /// Returns the declared type, e.g. `"integer"` or `"boolean"`.
    pub fn value_type(&mut self, reference: &str) -> Result<&str, SpecError> {
        let entry = self.entry(reference)?;
        Ok(&entry.value_type)
    }

    /// Returns one attribute of `reference`, resolving and caching it first if needed.
    pub fn attribute(
        &mut self,
        reference: &str,
        attr: SpecAttr,
    ) -> Result<Option<&str>, SpecError> {
        Ok(self.entry(reference)?.get(attr))
    }

    /// Returns the whole cached entry for `reference`.
    pub fn entry(&mut self, reference: &str) -> Result<&SpecEntry, SpecError> {
        let entry = match self.cache.entry(reference.to_string()) {
            Entry::Occupied(cached) => cached.into_mut(),
            Entry::Vacant(slot) => {
                debug!(%reference, "specification cache miss");
                let resolved = self.source.resolve(reference)?;
                debug!(%reference, path = %resolved.dotted_path(), "cached specification entry");
                slot.insert(resolved)
            }
        };
        Ok(entry)
    }

    pub fn is_cached(&self, reference: &str) -> bool {
        self.cache.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
