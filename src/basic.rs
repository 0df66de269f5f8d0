//! The base corpus creator and the simple lowercase variant.
//!
//! [`BasicCorpus`] is the reference behaviour every other creator departs
//! from. In clean mode each configured field is cleaned in place:
//!
//! ```text
//! "<p>Build  reliable\nservices</p>"  ──clean_html──►  "Build reliable\nservices"
//!                                     ──drop '\n'──►  "Build reliableservices"
//!                                     ──collapse──►   "Build reliableservices"
//! ```
//!
//! Newlines are deleted rather than replaced, so words split across a line
//! break are joined. In raw mode the configured fields are concatenated
//! untouched.
//!
//! Both modes tolerate missing fields: an absent field stays absent (clean)
//! or contributes an empty string (raw).

use serde::Serialize;

use crate::{text, CorpusConfig, CorpusCreator, JobPosting, Result};

/// Output of [`BasicCorpus`]: the cleaned posting or its raw concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Document {
    /// Clean mode: the posting projected to the configured fields, cleaned.
    Fields(JobPosting),
    /// Raw mode: configured field values joined by single spaces.
    Raw(String),
}

/// The base corpus creator.
///
/// ## Example
///
/// ```rust
/// use jobcorpus::{BasicCorpus, CorpusConfig, CorpusCreator, Document, JobPosting};
///
/// let posting: JobPosting = [("a", "X"), ("b", "Y")].into_iter().collect();
///
/// let raw = BasicCorpus::new(CorpusConfig::with_fields(["b", "a"]).raw());
/// let out: Vec<Document> = raw.corpus(vec![posting]).collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(out, [Document::Raw("Y X".to_string())]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BasicCorpus {
    config: CorpusConfig,
}

impl BasicCorpus {
    /// Create a base creator.
    #[must_use]
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    /// The configuration this creator was built with.
    #[must_use]
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }
}

fn clean_field(value: &str) -> Result<String> {
    Ok(text::collapse_whitespace(&text::clean_html(value)?.replace('\n', "")))
}

impl CorpusCreator for BasicCorpus {
    type Cleaned = JobPosting;
    type Output = std::iter::Once<Document>;

    fn fields(&self) -> &[String] {
        &self.config.document_schema_fields
    }

    fn clean(&self, mut document: JobPosting) -> Result<JobPosting> {
        for field in &self.config.document_schema_fields {
            if let Some(value) = document.get(field) {
                let cleaned = clean_field(value)?;
                document.insert(field.as_str(), cleaned);
            }
        }
        Ok(document)
    }

    fn transform(&self, document: JobPosting, _tag: usize) -> Result<Self::Output> {
        let unit = if self.config.raw {
            Document::Raw(document.join_fields(&self.config.document_schema_fields))
        } else {
            Document::Fields(self.clean(document)?)
        };
        Ok(std::iter::once(unit))
    }
}

/// One lowercased, punctuation-free string per posting.
///
/// Each configured field goes through
/// [`lowercase_strip_punc`](text::lowercase_strip_punc); missing fields
/// contribute an empty string. The raw flag has no effect.
#[derive(Debug, Clone, Default)]
pub struct SimpleCorpus {
    config: CorpusConfig,
}

impl SimpleCorpus {
    /// Create a simple creator.
    #[must_use]
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }
}

impl CorpusCreator for SimpleCorpus {
    type Cleaned = String;
    type Output = std::iter::Once<String>;

    fn fields(&self) -> &[String] {
        &self.config.document_schema_fields
    }

    fn clean(&self, document: JobPosting) -> Result<String> {
        Ok(self
            .config
            .document_schema_fields
            .iter()
            .map(|field| text::lowercase_strip_punc(document.get(field).unwrap_or("")))
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn transform(&self, document: JobPosting, _tag: usize) -> Result<Self::Output> {
        self.clean(document).map(std::iter::once)
    }
}
