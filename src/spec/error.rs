use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpecError {
    #[error("no specification entry matches '{0}'")]
    NotFound(String),

    #[error("'{reference}' is ambiguous; candidates: {}", .candidates.join(", "))]
    Ambiguous {
        reference: String,
        candidates: Vec<String>,
    },

    #[error("invalid reference: '{0}'")]
    InvalidReference(String),

    #[error("specification line {line}: {message}")]
    Parse { line: usize, message: String },
}
