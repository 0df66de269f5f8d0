//! Raw concatenation of posting fields.

use crate::{CorpusConfig, CorpusCreator, JobPosting, Result};

/// One raw string per posting: the configured fields joined by spaces.
///
/// Unlike raw mode on the other creators, every field is required.
///
/// ```rust
/// use jobcorpus::{CorpusConfig, CorpusCreator, JobPosting, RawCorpus};
///
/// let posting: JobPosting = [("skills", "rust"), ("description", "<p>Hi</p>")].into_iter().collect();
/// let creator = RawCorpus::new(CorpusConfig::with_fields(["description", "skills"]));
///
/// let text = creator.corpus(vec![posting]).next().unwrap().unwrap();
/// assert_eq!(text, "<p>Hi</p> rust");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawCorpus {
    config: CorpusConfig,
}

impl RawCorpus {
    /// Create a raw creator. The raw flag of `config` is irrelevant.
    #[must_use]
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }
}

impl CorpusCreator for RawCorpus {
    type Cleaned = String;
    type Output = std::iter::Once<String>;

    fn fields(&self) -> &[String] {
        &self.config.document_schema_fields
    }

    fn clean(&self, document: JobPosting) -> Result<String> {
        document.join_required(&self.config.document_schema_fields)
    }

    fn transform(&self, document: JobPosting, _tag: usize) -> Result<Self::Output> {
        self.clean(document).map(std::iter::once)
    }
}
