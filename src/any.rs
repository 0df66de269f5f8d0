//! A corpus creator chosen at runtime.
//!
//! Each concrete creator has its own unit type. [`AnyCorpus`] wraps the
//! closed set of creators behind one [`CorpusCreator`] implementation whose
//! units are [`Unit`]s, so the creator can come from configuration (see
//! [`CorpusOptions`](crate::CorpusOptions)).

use serde::Serialize;

use crate::{
    BasicCorpus, CorpusCreator, Doc2VecCorpus, Document, JobCategoryCorpus, JobPosting, RawCorpus, Result,
    SectionExtractCorpus, SimpleCorpus, TaggedDocument, Word2VecCorpus,
};

/// A unit produced by any creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Unit {
    /// A cleaned posting.
    Fields(JobPosting),
    /// A single string.
    Text(String),
    /// A token list.
    Tokens(Vec<String>),
    /// A tagged token list.
    Tagged(TaggedDocument),
}

impl From<Document> for Unit {
    fn from(document: Document) -> Self {
        match document {
            Document::Fields(posting) => Self::Fields(posting),
            Document::Raw(text) => Self::Text(text),
        }
    }
}

impl From<String> for Unit {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for Unit {
    fn from(tokens: Vec<String>) -> Self {
        Self::Tokens(tokens)
    }
}

impl From<TaggedDocument> for Unit {
    fn from(document: TaggedDocument) -> Self {
        Self::Tagged(document)
    }
}

impl From<JobPosting> for Unit {
    fn from(posting: JobPosting) -> Self {
        Self::Fields(posting)
    }
}

/// One of the built-in corpus creators.
#[derive(Debug, Clone)]
pub enum AnyCorpus {
    /// See [`BasicCorpus`].
    Basic(BasicCorpus),
    /// See [`SimpleCorpus`].
    Simple(SimpleCorpus),
    /// See [`Doc2VecCorpus`].
    Doc2Vec(Doc2VecCorpus),
    /// See [`Word2VecCorpus`].
    Word2Vec(Word2VecCorpus),
    /// See [`JobCategoryCorpus`].
    JobCategory(JobCategoryCorpus),
    /// See [`SectionExtractCorpus`].
    SectionExtract(SectionExtractCorpus),
    /// See [`RawCorpus`].
    Raw(RawCorpus),
}

macro_rules! dispatch {
    ($self:expr, $creator:ident => $body:expr) => {
        match $self {
            AnyCorpus::Basic($creator) => $body,
            AnyCorpus::Simple($creator) => $body,
            AnyCorpus::Doc2Vec($creator) => $body,
            AnyCorpus::Word2Vec($creator) => $body,
            AnyCorpus::JobCategory($creator) => $body,
            AnyCorpus::SectionExtract($creator) => $body,
            AnyCorpus::Raw($creator) => $body,
        }
    };
}

fn units<C>(output: C::Output) -> Vec<Unit>
where
    C: CorpusCreator,
    <C::Output as IntoIterator>::Item: Into<Unit>,
{
    output.into_iter().map(Into::into).collect()
}

impl CorpusCreator for AnyCorpus {
    type Cleaned = Unit;
    type Output = Vec<Unit>;

    fn name(&self) -> &'static str {
        dispatch!(self, c => c.name())
    }

    fn fields(&self) -> &[String] {
        dispatch!(self, c => c.fields())
    }

    fn lookup_key(&self) -> Option<&str> {
        dispatch!(self, c => c.lookup_key())
    }

    fn clean(&self, document: JobPosting) -> Result<Unit> {
        dispatch!(self, c => c.clean(document).map(Into::into))
    }

    fn transform(&self, document: JobPosting, tag: usize) -> Result<Vec<Unit>> {
        match self {
            Self::Basic(c) => c.transform(document, tag).map(units::<BasicCorpus>),
            Self::Simple(c) => c.transform(document, tag).map(units::<SimpleCorpus>),
            Self::Doc2Vec(c) => c.transform(document, tag).map(units::<Doc2VecCorpus>),
            Self::Word2Vec(c) => c.transform(document, tag).map(units::<Word2VecCorpus>),
            Self::JobCategory(c) => c.transform(document, tag).map(units::<JobCategoryCorpus>),
            Self::SectionExtract(c) => c.transform(document, tag).map(units::<SectionExtractCorpus>),
            Self::Raw(c) => c.transform(document, tag).map(units::<RawCorpus>),
        }
    }
}
