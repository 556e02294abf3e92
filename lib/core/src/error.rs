use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tagger assigned the same label twice (or otherwise could not produce
    /// a consistent labeled sequence). Carries the offending raw value so the
    /// caller can record it; recovered locally, never aborts a comparison.
    #[error("repeated label while tagging: {original}")]
    RepeatedLabel { original: String },
}

impl Error {
    /// The raw field value that triggered the failure.
    pub fn original(&self) -> &str {
        match self {
            Error::RepeatedLabel { original } => original,
        }
    }
}
