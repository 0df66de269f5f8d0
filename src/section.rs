//! Section extraction: keep only the text under matching headings.
//!
//! Job descriptions are loosely structured. Headings are not marked up, but
//! they tend to look alike: a short line, or a line ending in a colon, right
//! after a blank line, and not a bullet.
//!
//! ```text
//! Intro                     ← first line, no blank line before it
//!
//! Requirements:             ← heading (after blank, ends with ':')
//! - Must code               ← kept: "Must", "code"
//! - Must test               ← kept: "Must", "test"
//!
//! Benefits:                 ← heading, does not match → stop keeping
//! - Gym
//! ```
//!
//! ## The Scan
//!
//! One pass over the lines with two pieces of state: whether the previous
//! line was blank, and the current heading (initially empty). For each line:
//!
//! 1. Count words by splitting on single spaces.
//! 2. If the previous line was blank, this line is not blank, does not start
//!    with `+`, `*` or `-`, and has 1–3 words or ends with `:`, it becomes
//!    the current heading.
//! 3. Remember whether this line is blank.
//! 4. If the current heading matches the pattern (anchored at its start),
//!    this line is not the heading itself and is not blank, drop one leading
//!    `"+ "`, `"* "` or `"- "` and keep the line's whitespace-separated words.
//!
//! The heuristic is approximate (a three-word sentence after a blank line
//! becomes a heading) and is kept exactly as described.
//!
//! Line breaks must still be present, so feed raw descriptions, not cleaned
//! ones.

use regex::Regex;

use crate::doc2vec::TaggedDocument;
use crate::posting::{DESCRIPTION, ONET_SOC_CODE};
use crate::{CorpusCreator, JobPosting, Result};

const BULLET_CHARS: [char; 3] = ['+', '*', '-'];
const BULLET_PREFIXES: [&str; 3] = ["+ ", "* ", "- "];

/// Words under headings matching `section`.
///
/// `section` is matched at the start of each heading, so it should usually
/// be anchored (see [`SectionExtractCorpus::new`]). Text with no matching
/// heading yields no words.
///
/// ```rust
/// use jobcorpus::section::extract_section;
/// use regex::Regex;
///
/// let text = "Intro\n\nRequirements:\n- Must code\n- Must test\n\nBenefits:\n- Gym";
/// let section = Regex::new("^Requirements").unwrap();
///
/// assert_eq!(extract_section(text, &section), ["Must", "code", "Must", "test"]);
/// ```
#[must_use]
pub fn extract_section(text: &str, section: &Regex) -> Vec<String> {
    let mut words = Vec::new();
    let mut prior_empty = false;
    let mut heading = "";

    for line in text.split('\n') {
        let words_in_line = line.split(' ').count();
        let blank = line.trim().is_empty();

        if prior_empty
            && !blank
            && !line.starts_with(BULLET_CHARS)
            && ((1..=3).contains(&words_in_line) || line.ends_with(':'))
        {
            tracing::trace!(heading = line, "section heading");
            heading = line;
        }

        prior_empty = blank;

        if section.is_match(heading) && line != heading && !blank {
            let line = BULLET_PREFIXES
                .iter()
                .find_map(|bullet| line.strip_prefix(bullet))
                .unwrap_or(line);
            words.extend(line.split_whitespace().map(String::from));
        }
    }

    words
}

/// Tagged documents built only from one section of each description.
///
/// Tags and lookup behave exactly as for
/// [`Doc2VecCorpus`](crate::Doc2VecCorpus). The description field is
/// required.
///
/// ```rust
/// use jobcorpus::{CorpusCreator, JobPosting, SectionExtractCorpus};
///
/// let posting: JobPosting = [
///     ("description", "About us\n\nQualifications\n* BS degree\n\nPerks\n* Remote"),
///     ("onet_soc_code", "15-1132.00"),
/// ]
/// .into_iter()
/// .collect();
///
/// let creator = SectionExtractCorpus::new("Qualifications").unwrap();
/// let document = creator.corpus(vec![posting]).next().unwrap().unwrap();
///
/// assert_eq!(document.words, ["BS", "degree"]);
/// assert_eq!(document.tags, [0]);
/// ```
#[derive(Debug, Clone)]
pub struct SectionExtractCorpus {
    pattern: String,
    section: Regex,
    fields: Vec<String>,
}

impl SectionExtractCorpus {
    /// Create a section extractor for headings starting with `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`](crate::Error::InvalidPattern) if
    /// `pattern` is not a valid regular expression.
    pub fn new(pattern: &str) -> Result<Self> {
        let section = Regex::new(&format!("^(?:{pattern})"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            section,
            fields: vec![DESCRIPTION.to_string()],
        })
    }

    /// The heading pattern as given.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl CorpusCreator for SectionExtractCorpus {
    type Cleaned = Vec<String>;
    type Output = std::iter::Once<TaggedDocument>;

    fn fields(&self) -> &[String] {
        &self.fields
    }

    fn lookup_key(&self) -> Option<&str> {
        Some(ONET_SOC_CODE)
    }

    fn clean(&self, document: JobPosting) -> Result<Vec<String>> {
        Ok(extract_section(document.require(DESCRIPTION)?, &self.section))
    }

    fn transform(&self, document: JobPosting, tag: usize) -> Result<Self::Output> {
        let words = self.clean(document)?;
        Ok(std::iter::once(TaggedDocument::new(words, tag)))
    }
}
