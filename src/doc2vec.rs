//! Tagged documents for paragraph-embedding (Doc2Vec) training.
//!
//! Every posting becomes one [`TaggedDocument`]: the cleaned words of the
//! configured fields plus a single integer tag. The tag indexes the corpus
//! lookup table, which maps it back to the posting's O*NET-SOC code:
//!
//! ```text
//! posting 0 (15-1132.00)  ──►  TaggedDocument { words: [...], tags: [0] }   lookup[0] = "15-1132.00"
//! posting 1 (35-2014.00)  ──►  TaggedDocument { words: [...], tags: [1] }   lookup[1] = "35-2014.00"
//! ```
//!
//! Cleaning is strict: every configured field must be present.

use serde::{Deserialize, Serialize};

use crate::posting::ONET_SOC_CODE;
use crate::{text, CorpusConfig, CorpusCreator, JobPosting, Result};

/// A token list paired with its integer tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedDocument {
    /// Tokens of the document.
    pub words: Vec<String>,
    /// Tags identifying the document; corpus creators emit exactly one.
    pub tags: Vec<usize>,
}

impl TaggedDocument {
    /// A document with a single tag.
    #[must_use]
    pub fn new(words: Vec<String>, tag: usize) -> Self {
        Self {
            words,
            tags: vec![tag],
        }
    }
}

/// One tagged document per posting.
///
/// The raw flag has no effect.
#[derive(Debug, Clone, Default)]
pub struct Doc2VecCorpus {
    config: CorpusConfig,
}

impl Doc2VecCorpus {
    /// Create a Doc2Vec creator.
    #[must_use]
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }
}

impl CorpusCreator for Doc2VecCorpus {
    type Cleaned = String;
    type Output = std::iter::Once<TaggedDocument>;

    fn fields(&self) -> &[String] {
        &self.config.document_schema_fields
    }

    fn lookup_key(&self) -> Option<&str> {
        Some(ONET_SOC_CODE)
    }

    fn clean(&self, document: JobPosting) -> Result<String> {
        Ok(self
            .config
            .document_schema_fields
            .iter()
            .map(|field| document.require(field).map(text::clean_str))
            .collect::<Result<Vec<_>>>()?
            .join(" "))
    }

    fn transform(&self, document: JobPosting, tag: usize) -> Result<Self::Output> {
        let words = self.clean(document)?.split_whitespace().map(String::from).collect();
        Ok(std::iter::once(TaggedDocument::new(words, tag)))
    }
}
