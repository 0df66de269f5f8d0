//! Sentence token lists for word-embedding (Word2Vec) training.
//!
//! Word2Vec trains on sentences, not documents, so each posting is
//! flattened: a posting whose text segments into S sentences yields S
//! separate token lists.

use crate::{text, CorpusConfig, CorpusCreator, JobPosting, Result};

/// One token list per sentence.
///
/// In clean mode the configured fields are required and passed through
/// [`clean_str`](text::clean_str); in raw mode they are joined untouched and
/// missing fields are tolerated.
///
/// ```rust
/// use jobcorpus::{CorpusConfig, CorpusCreator, JobPosting, Word2VecCorpus};
///
/// let posting: JobPosting = [("description", "Great pay! Good team?")].into_iter().collect();
/// let creator = Word2VecCorpus::new(CorpusConfig::with_fields(["description"]));
///
/// let sentences: Vec<Vec<String>> = creator.corpus(vec![posting]).collect::<Result<_, _>>().unwrap();
/// assert_eq!(sentences, [vec!["great", "pay", "!"], vec!["good", "team", "?"]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Word2VecCorpus {
    config: CorpusConfig,
}

impl Word2VecCorpus {
    /// Create a Word2Vec creator.
    #[must_use]
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }
}

impl CorpusCreator for Word2VecCorpus {
    type Cleaned = String;
    type Output = Vec<Vec<String>>;

    fn fields(&self) -> &[String] {
        &self.config.document_schema_fields
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

    fn transform(&self, document: JobPosting, _tag: usize) -> Result<Self::Output> {
        let joined = if self.config.raw {
            document.join_fields(&self.config.document_schema_fields)
        } else {
            self.clean(document)?
        };

        Ok(text::sentence_tokenize(&joined)
            .iter()
            .map(|sentence| text::word_tokenize(sentence))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_one_unit_per_sentence() {
        let creator = Word2VecCorpus::new(CorpusConfig::with_fields(["description", "skills"]));
        let postings: Vec<JobPosting> = vec![
            [("description", "Great pay! Good team?"), ("skills", "Apply now!")]
                .into_iter()
                .collect(),
            [("description", "Second posting!"), ("skills", "")].into_iter().collect(),
        ];

        let sentences: Vec<Vec<String>> = creator.corpus(postings).collect::<Result<_>>().unwrap();
        assert_eq!(sentences.len(), 4);
        assert_eq!(sentences[2], ["apply", "now", "!"]);
        assert_eq!(sentences[3], ["second", "posting", "!"]);
    }

    #[test]
    fn test_raw_mode_keeps_case_and_tolerates_missing() {
        let creator = Word2VecCorpus::new(CorpusConfig::with_fields(["description", "missing"]).raw());
        let posting: JobPosting = [("description", "Rust rocks. Ship it.")].into_iter().collect();

        let sentences = creator.transform(posting, 0).unwrap();
        assert_eq!(sentences, [vec!["Rust", "rocks", "."], vec!["Ship", "it", "."]]);
    }

    #[test]
    fn test_clean_mode_requires_fields() {
        let creator = Word2VecCorpus::new(CorpusConfig::with_fields(["description", "missing"]));
        let posting: JobPosting = [("description", "Hi")].into_iter().collect();

        let mut corpus = creator.corpus(vec![posting]);
        assert!(matches!(corpus.next(), Some(Err(Error::MissingField(_)))));
        assert!(corpus.next().is_none());
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let creator = Word2VecCorpus::new(CorpusConfig::with_fields(["description"]));
        let posting: JobPosting = [("description", "   ")].into_iter().collect();
        assert_eq!(creator.corpus(vec![posting]).count(), 0);
    }
}
