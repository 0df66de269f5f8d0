//! Error types for jobcorpus.

/// Errors that can occur while building or iterating a corpus.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A strict transform required a field the job posting does not have.
    #[error("missing field `{0}` in job posting")]
    MissingField(String),

    /// The section pattern is not a valid regular expression.
    #[error("invalid section pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// HTML could not be rendered to text.
    #[error("failed to render HTML: {0}")]
    Html(#[from] html2text::Error),

    /// Section extraction was selected without a section pattern.
    #[error("section extraction requires a section pattern")]
    MissingSectionPattern,

    /// The corpus configuration could not be parsed.
    #[error("invalid corpus configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A job posting could not be parsed as JSON.
    #[error("invalid job posting JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A job posting was valid JSON but not an object.
    #[error("job posting must be a JSON object, got {0}")]
    InvalidPosting(String),

    /// A pipeline stage failed. The stage's own error is kept as-is.
    #[error(transparent)]
    Stage(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an arbitrary stage failure.
    pub fn stage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Stage(err.into())
    }

    /// Shorthand for [`Error::MissingField`].
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }
}

/// Result type for jobcorpus operations.
pub type Result<T> = std::result::Result<T, Error>;
