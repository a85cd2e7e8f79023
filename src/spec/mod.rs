//! Configuration specification lookups with a per-reference cache.

mod cache;
mod entry;
mod error;
mod parse;
mod source;

pub use cache::SpecCache;
pub use entry::{SpecAttr, SpecEntry};
pub use error::SpecError;
pub use parse::ConfigSpec;
pub use source::SpecSource;
