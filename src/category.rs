//! Occupational category labels.

use crate::posting::OCCUPATIONAL_CATEGORY;
use crate::{text, CorpusCreator, JobPosting, Result};

/// One lowercased, punctuation-free label per posting, taken from
/// `occupationalCategory`.
///
/// The field list is fixed; the label is required.
#[derive(Debug, Clone)]
pub struct JobCategoryCorpus {
    fields: Vec<String>,
}

impl JobCategoryCorpus {
    /// Create a category creator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: vec![OCCUPATIONAL_CATEGORY.to_string()],
        }
    }
}

impl Default for JobCategoryCorpus {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusCreator for JobCategoryCorpus {
    type Cleaned = String;
    type Output = std::iter::Once<String>;

    fn fields(&self) -> &[String] {
        &self.fields
    }

    fn clean(&self, document: JobPosting) -> Result<String> {
        Ok(self
            .fields
            .iter()
            .map(|field| document.require(field).map(text::lowercase_strip_punc))
            .collect::<Result<Vec<_>>>()?
            .join(" "))
    }

    fn transform(&self, document: JobPosting, _tag: usize) -> Result<Self::Output> {
        self.clean(document).map(std::iter::once)
    }
}
