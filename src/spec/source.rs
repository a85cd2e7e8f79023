use super::{SpecEntry, SpecError};

/// Something that can resolve a configuration reference to its specification.
///
/// A reference need not be a full key path; implementations decide how
/// partial references are expanded and report [`SpecError::NotFound`] or
/// [`SpecError::Ambiguous`] when no single entry matches.
pub trait SpecSource: std::fmt::Debug {
    fn resolve(&self, reference: &str) -> Result<SpecEntry, SpecError>;
}
