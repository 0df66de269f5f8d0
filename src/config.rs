//! Corpus configuration.
//!
//! Creators are configured in code with [`CorpusConfig`], or from TOML with
//! [`CorpusOptions`], which also selects the creator:
//!
//! ```toml
//! kind = "section_extract"
//! section_pattern = "(?i)requirements"
//! document_schema_fields = ["description", "skills"]
//! raw = false
//! ```

use serde::{Deserialize, Serialize};

use crate::posting::DEFAULT_SCHEMA_FIELDS;
use crate::{
    AnyCorpus, BasicCorpus, Doc2VecCorpus, Error, JobCategoryCorpus, RawCorpus, Result, SectionExtractCorpus,
    SimpleCorpus, Word2VecCorpus,
};

fn default_schema_fields() -> Vec<String> {
    DEFAULT_SCHEMA_FIELDS.iter().map(ToString::to_string).collect()
}

/// Field selection and raw/clean mode shared by all creators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Fields to read, in concatenation order.
    #[serde(default = "default_schema_fields")]
    pub document_schema_fields: Vec<String>,

    /// Concatenate untouched field values instead of cleaning them.
    #[serde(default)]
    pub raw: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            document_schema_fields: default_schema_fields(),
            raw: false,
        }
    }
}

impl CorpusConfig {
    /// Clean mode over the given fields.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            document_schema_fields: fields.into_iter().map(Into::into).collect(),
            raw: false,
        }
    }

    /// Switch to raw mode.
    #[must_use]
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }
}

/// Which corpus creator to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusKind {
    /// [`BasicCorpus`]
    #[default]
    Basic,
    /// [`SimpleCorpus`]
    Simple,
    /// [`Doc2VecCorpus`]
    #[serde(rename = "doc2vec")]
    Doc2Vec,
    /// [`Word2VecCorpus`]
    #[serde(rename = "word2vec")]
    Word2Vec,
    /// [`JobCategoryCorpus`]
    JobCategory,
    /// [`SectionExtractCorpus`]
    SectionExtract,
    /// [`RawCorpus`]
    Raw,
}

impl CorpusKind {
    /// The configuration name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Simple => "simple",
            Self::Doc2Vec => "doc2vec",
            Self::Word2Vec => "word2vec",
            Self::JobCategory => "job_category",
            Self::SectionExtract => "section_extract",
            Self::Raw => "raw",
        }
    }
}

/// A complete, serializable description of a corpus creator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusOptions {
    /// Creator to build.
    #[serde(default)]
    pub kind: CorpusKind,

    /// Field selection and mode.
    #[serde(flatten)]
    pub config: CorpusConfig,

    /// Heading pattern, required by [`CorpusKind::SectionExtract`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_pattern: Option<String>,
}

impl CorpusOptions {
    /// Options for `kind` with the default configuration.
    #[must_use]
    pub fn new(kind: CorpusKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Parse options from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is malformed.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Build the selected creator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSectionPattern`] when section extraction is
    /// selected without a pattern, and [`Error::InvalidPattern`] when the
    /// pattern does not compile.
    pub fn build(self) -> Result<AnyCorpus> {
        tracing::debug!(kind = self.kind.as_str(), raw = self.config.raw, "building corpus creator");
        let creator = match self.kind {
            CorpusKind::Basic => AnyCorpus::Basic(BasicCorpus::new(self.config)),
            CorpusKind::Simple => AnyCorpus::Simple(SimpleCorpus::new(self.config)),
            CorpusKind::Doc2Vec => AnyCorpus::Doc2Vec(Doc2VecCorpus::new(self.config)),
            CorpusKind::Word2Vec => AnyCorpus::Word2Vec(Word2VecCorpus::new(self.config)),
            CorpusKind::JobCategory => AnyCorpus::JobCategory(JobCategoryCorpus::new()),
            CorpusKind::SectionExtract => {
                let pattern = self.section_pattern.ok_or(Error::MissingSectionPattern)?;
                AnyCorpus::SectionExtract(SectionExtractCorpus::new(&pattern)?)
            }
            CorpusKind::Raw => AnyCorpus::Raw(RawCorpus::new(self.config)),
        };
        Ok(creator)
    }
}
