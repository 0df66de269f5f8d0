//! # jobcorpus
//!
//! Preprocessing pipelines and training corpora for job-posting text.
//!
//! ## The Problem
//!
//! Job postings arrive as structured records with a handful of free-text
//! fields (description, qualifications, skills, ...). Embedding models want
//! something else entirely: one string per document, one token list per
//! sentence, or token lists tagged with a document id. Getting from one to
//! the other involves choices:
//!
//! - Which fields participate, and in what order?
//! - Is the text cleaned, or passed through raw?
//! - Is a missing field fine, or a sign of a broken record?
//! - Is the unit of training a document, a sentence, or a section?
//!
//! Each corpus creator is one answer to those questions.
//!
//! ## Corpus Creators
//!
//! | Creator | Unit | Missing fields |
//! |---------|------|----------------|
//! | [`BasicCorpus`] | cleaned posting, or raw joined string | tolerated |
//! | [`SimpleCorpus`] | lowercase string without punctuation | tolerated |
//! | [`Doc2VecCorpus`] | [`TaggedDocument`] | error |
//! | [`Word2VecCorpus`] | token list per sentence | error (clean), tolerated (raw) |
//! | [`JobCategoryCorpus`] | lowercase category label | error |
//! | [`SectionExtractCorpus`] | [`TaggedDocument`] of one section | error |
//! | [`RawCorpus`] | raw joined string | error |
//!
//! Tolerant creators serve inspection and loose text dumps. Strict ones feed
//! training and reject half-empty documents.
//!
//! ## Pipelines
//!
//! Independently of creators, [`Pipeline`] composes item functions into a
//! lazy preprocessing chain that can be reused at training and prediction
//! time. See the [`pipeline`] module.
//!
//! ## Quick Start
//!
//! ```rust
//! use jobcorpus::{CorpusConfig, CorpusCreator, JobPosting, Word2VecCorpus};
//!
//! let postings: Vec<JobPosting> = vec![
//!     [("description", "Great pay! Good team?"), ("skills", "Rust")].into_iter().collect(),
//! ];
//!
//! let creator = Word2VecCorpus::new(CorpusConfig::with_fields(["description", "skills"]));
//! let sentences: Vec<Vec<String>> = creator
//!     .corpus(postings)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! // "great pay !" | "good team ?" | "rust"
//! assert_eq!(sentences.len(), 3);
//! assert_eq!(sentences[1], ["good", "team", "?"]);
//! ```
//!
//! ## Laziness
//!
//! Corpora and pipelines are iterators. Nothing is read from the source
//! until the consumer pulls, so sources may be unbounded streams and
//! stopping early releases everything.

mod any;
mod basic;
mod category;
mod config;
mod corpus;
mod doc2vec;
mod error;
mod raw;
mod word2vec;

pub mod pipeline;
pub mod posting;
pub mod section;
pub mod text;

pub use any::{AnyCorpus, Unit};
pub use basic::{BasicCorpus, Document, SimpleCorpus};
pub use category::JobCategoryCorpus;
pub use config::{CorpusConfig, CorpusKind, CorpusOptions};
pub use corpus::{Corpus, TagLedger};
pub use doc2vec::{Doc2VecCorpus, TaggedDocument};
pub use error::{Error, Result};
pub use pipeline::{compose, Pipeline, Stage};
pub use posting::{JobPosting, Metadata, PostingSource, Postings};
pub use raw::RawCorpus;
pub use section::SectionExtractCorpus;
pub use word2vec::Word2VecCorpus;

/// A strategy turning job postings into training units.
///
/// A creator holds configuration only. Bind it to a source with
/// [`corpus`](CorpusCreator::corpus) to get a lazy iterator of units:
///
/// ```rust
/// use jobcorpus::{CorpusConfig, CorpusCreator, JobPosting, RawCorpus};
///
/// fn dump(creator: impl CorpusCreator<Output = std::iter::Once<String>>, postings: Vec<JobPosting>) -> Vec<String> {
///     creator.corpus(postings).filter_map(Result::ok).collect()
/// }
///
/// let posting: JobPosting = [("a", "X"), ("b", "Y")].into_iter().collect();
/// let creator = RawCorpus::new(CorpusConfig::with_fields(["a", "b"]));
///
/// assert_eq!(dump(creator, vec![posting]), ["X Y"]);
/// ```
///
/// For every posting the corpus first records its lookup key (for tagged
/// creators), then projects it down to [`fields`](CorpusCreator::fields),
/// then calls [`transform`](CorpusCreator::transform) and yields each unit
/// of the output.
pub trait CorpusCreator {
    /// Result of [`clean`](CorpusCreator::clean).
    type Cleaned;

    /// Units produced for one posting.
    type Output: IntoIterator;

    /// Fully qualified name of the creator.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Fields a posting is projected to before transformation.
    fn fields(&self) -> &[String];

    /// Field recorded in the tag lookup. `None` for untagged creators.
    fn lookup_key(&self) -> Option<&str> {
        None
    }

    /// Clean a projected posting.
    ///
    /// # Errors
    ///
    /// Strict creators return [`Error::MissingField`] when a required field
    /// is absent.
    fn clean(&self, document: JobPosting) -> Result<Self::Cleaned>;

    /// Turn a projected posting into units.
    ///
    /// `tag` is the tag the document will carry; untagged creators ignore
    /// it.
    ///
    /// # Errors
    ///
    /// Same as [`clean`](CorpusCreator::clean).
    fn transform(&self, document: JobPosting, tag: usize) -> Result<Self::Output>;

    /// Which creator produced the corpus.
    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("corpus_creator".to_string(), self.name().into());
        metadata
    }

    /// Bind this creator to a job-posting source.
    fn corpus<I>(self, source: I) -> Corpus<Self, I::IntoIter>
    where
        Self: Sized,
        I: IntoIterator<Item = JobPosting>,
    {
        Corpus::new(self, source.into_iter())
    }
}
