//! The corpus iterator and its tag ledger.
//!
//! A [`Corpus`] binds a [`CorpusCreator`] to a job-posting source and pulls
//! postings one at a time:
//!
//! ```text
//! posting ──► record lookup[tag] ──► project to fields ──► transform ──► units
//!              (tagged creators)                                          │
//!                                          tag += 1 once units are ready ◄┘
//! ```
//!
//! ## Tags
//!
//! Paragraph-embedding training identifies each document by an integer tag.
//! Tagged creators (those with a [`lookup_key`](CorpusCreator::lookup_key))
//! number postings from zero in source order and remember which occupation
//! code each tag belongs to. A posting that fails to transform neither
//! consumes a tag nor leaves a lookup entry behind, so every tag in the
//! lookup belongs to an emitted document.
//!
//! The ledger lives inside the corpus, which owns its source: a second pass
//! means building a new corpus with a fresh ledger, and iteration requires
//! `&mut`, so one corpus can never be walked by two consumers at once.

use std::collections::BTreeMap;

use crate::{CorpusCreator, Metadata, PostingSource, Result};

/// Running tag counter plus the tag → lookup-key table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagLedger {
    next_tag: usize,
    lookup: BTreeMap<usize, Option<String>>,
}

impl TagLedger {
    /// An empty ledger starting at tag zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag the next emitted document will carry.
    #[must_use]
    pub fn next_tag(&self) -> usize {
        self.next_tag
    }

    /// Tag → key table. `None` means the posting had no key field.
    #[must_use]
    pub fn lookup(&self) -> &BTreeMap<usize, Option<String>> {
        &self.lookup
    }

    fn record(&mut self, key: Option<&str>) -> usize {
        self.lookup.insert(self.next_tag, key.map(str::to_owned));
        self.next_tag
    }

    fn commit(&mut self) {
        self.next_tag += 1;
    }

    fn discard(&mut self) {
        self.lookup.remove(&self.next_tag);
    }
}

/// A lazy corpus: units produced by a creator from a posting source.
///
/// Yields `Err` for postings the creator rejects (for example a strict
/// creator missing a required field) and keeps going if pulled again.
///
/// ```rust
/// use jobcorpus::{CorpusConfig, CorpusCreator, Doc2VecCorpus, JobPosting};
///
/// let postings: Vec<JobPosting> = vec![
///     [("description", "Write Rust"), ("onet_soc_code", "15-1132.00")].into_iter().collect(),
///     [("description", "Cook food"), ("onet_soc_code", "35-2014.00")].into_iter().collect(),
/// ];
///
/// let config = CorpusConfig::with_fields(["description"]);
/// let mut corpus = Doc2VecCorpus::new(config).corpus(postings);
///
/// let first = corpus.next().unwrap().unwrap();
/// assert_eq!(first.words, ["write", "rust"]);
/// assert_eq!(first.tags, [0]);
///
/// let second = corpus.next().unwrap().unwrap();
/// assert_eq!(second.tags, [1]);
/// assert_eq!(corpus.lookup()[&1].as_deref(), Some("35-2014.00"));
/// ```
pub struct Corpus<C: CorpusCreator, I> {
    creator: C,
    source: I,
    ledger: TagLedger,
    pending: Option<<C::Output as IntoIterator>::IntoIter>,
}

impl<C: CorpusCreator, I: Iterator<Item = crate::JobPosting>> Corpus<C, I> {
    /// Bind `creator` to `source` with a fresh ledger.
    pub fn new(creator: C, source: I) -> Self {
        Self {
            creator,
            source,
            ledger: TagLedger::new(),
            pending: None,
        }
    }

    /// The creator driving this corpus.
    pub fn creator(&self) -> &C {
        &self.creator
    }

    /// Tag counter and lookup table.
    pub fn ledger(&self) -> &TagLedger {
        &self.ledger
    }

    /// Tag → lookup-key table built so far.
    pub fn lookup(&self) -> &BTreeMap<usize, Option<String>> {
        self.ledger.lookup()
    }

    /// The tag the next emitted document will carry.
    pub fn next_tag(&self) -> usize {
        self.ledger.next_tag()
    }

    fn transform_next(&mut self, posting: crate::JobPosting) -> Result<C::Output> {
        let Some(key_field) = self.creator.lookup_key() else {
            let document = posting.project(self.creator.fields());
            return self.creator.transform(document, self.ledger.next_tag());
        };

        let tag = self.ledger.record(posting.get(key_field));
        let document = posting.project(self.creator.fields());
        match self.creator.transform(document, tag) {
            Ok(output) => {
                self.ledger.commit();
                tracing::trace!(tag, "tagged job posting");
                Ok(output)
            }
            Err(err) => {
                self.ledger.discard();
                Err(err)
            }
        }
    }
}

impl<C, I> Corpus<C, I>
where
    C: CorpusCreator,
    I: PostingSource,
{
    /// Creator metadata merged with the source's metadata.
    ///
    /// Does not advance the source.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = self.creator.metadata();
        metadata.extend(self.source.metadata());
        metadata
    }
}

impl<C, I> Iterator for Corpus<C, I>
where
    C: CorpusCreator,
    I: Iterator<Item = crate::JobPosting>,
{
    type Item = Result<<C::Output as IntoIterator>::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(units) = self.pending.as_mut() {
                if let Some(unit) = units.next() {
                    return Some(Ok(unit));
                }
                self.pending = None;
            }

            let posting = self.source.next()?;
            match self.transform_next(posting) {
                Ok(output) => self.pending = Some(output.into_iter()),
                Err(err) => {
                    tracing::debug!(creator = self.creator.name(), error = %err, "job posting rejected");
                    return Some(Err(err));
                }
            }
        }
    }
}

impl<C: CorpusCreator + std::fmt::Debug, I> std::fmt::Debug for Corpus<C, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corpus")
            .field("creator", &self.creator)
            .field("ledger", &self.ledger)
            .finish_non_exhaustive()
    }
}
