//! Job posting records and the sources that produce them.
//!
//! A job posting is a flat mapping from common-schema field name to text.
//! Values are often multi-line HTML fragments scraped from job boards:
//!
//! ```text
//! {
//!   "description":            "<p>We are hiring...</p>\n\nRequirements:\n- Rust",
//!   "experienceRequirements": "3+ years",
//!   "qualifications":         "BS in Computer Science",
//!   "skills":                 "rust, sql",
//!   "occupationalCategory":   "Software Developers, Applications",
//!   "onet_soc_code":          "15-1132.00"
//! }
//! ```
//!
//! Corpus creators never mutate the postings they are given; they project a
//! copy down to the configured fields and work on that.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Free-text description of the position.
pub const DESCRIPTION: &str = "description";
/// Experience requirements.
pub const EXPERIENCE_REQUIREMENTS: &str = "experienceRequirements";
/// Qualifications.
pub const QUALIFICATIONS: &str = "qualifications";
/// Skills.
pub const SKILLS: &str = "skills";
/// Occupational category label.
pub const OCCUPATIONAL_CATEGORY: &str = "occupationalCategory";
/// O*NET-SOC occupation code, used as the lookup key for tagged corpora.
pub const ONET_SOC_CODE: &str = "onet_soc_code";

/// The fields most corpus creators read when none are configured.
pub const DEFAULT_SCHEMA_FIELDS: [&str; 4] = [DESCRIPTION, EXPERIENCE_REQUIREMENTS, QUALIFICATIONS, SKILLS];

/// Metadata describing a source or a corpus.
pub type Metadata = serde_json::Map<String, Value>;

/// One job posting: field name to field value.
///
/// ```rust
/// use jobcorpus::JobPosting;
///
/// let posting: JobPosting = [("description", "Build things"), ("skills", "rust")]
///     .into_iter()
///     .collect();
///
/// assert_eq!(posting.get("skills"), Some("rust"));
/// assert_eq!(posting.get("qualifications"), None);
/// assert!(posting.require("qualifications").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobPosting(BTreeMap<String, String>);

impl JobPosting {
    /// Create an empty posting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a common-schema JSON object.
    ///
    /// Strings are kept as-is, numbers and booleans are stringified, `null`
    /// values are dropped and nested arrays or objects are kept as compact
    /// JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed JSON and
    /// [`Error::InvalidPosting`] when the value is not an object.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// Safe lookup: the value of `field`, or `None` if absent.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Strict lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if the field is absent.
    pub fn require(&self, field: &str) -> Result<&str> {
        self.get(field).ok_or_else(|| Error::missing_field(field))
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    /// Whether the posting has `field`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the posting has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, value)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of this posting restricted to `fields`.
    ///
    /// Fields the posting does not have are simply absent from the copy.
    #[must_use]
    pub fn project<S: AsRef<str>>(&self, fields: &[S]) -> Self {
        fields
            .iter()
            .filter_map(|field| {
                let field = field.as_ref();
                self.0.get_key_value(field)
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Join the values of `fields` with single spaces, in the given order.
    ///
    /// Absent fields contribute an empty string, so two spaces may appear
    /// where a field is missing.
    #[must_use]
    pub fn join_fields<S: AsRef<str>>(&self, fields: &[S]) -> String {
        fields
            .iter()
            .map(|field| self.get(field.as_ref()).unwrap_or(""))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Join the values of `fields` with single spaces, requiring each one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for the first absent field.
    pub fn join_required<S: AsRef<str>>(&self, fields: &[S]) -> Result<String> {
        Ok(fields
            .iter()
            .map(|field| self.require(field.as_ref()))
            .collect::<Result<Vec<_>>>()?
            .join(" "))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JobPosting {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<Value> for JobPosting {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => return Err(Error::InvalidPosting(json_kind(&other).to_string())),
        };

        Ok(object
            .into_iter()
            .filter_map(|(field, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    other @ (Value::Array(_) | Value::Object(_)) => other.to_string(),
                };
                Some((field, text))
            })
            .collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A stream of job postings that can describe itself.
///
/// Sources are consumed by plain iteration; no length or random access is
/// assumed, so unbounded streams work.
pub trait PostingSource: Iterator<Item = JobPosting> {
    /// Metadata about where the postings come from.
    fn metadata(&self) -> Metadata {
        Metadata::new()
    }
}

impl PostingSource for std::vec::IntoIter<JobPosting> {}

/// Wraps any posting iterator with source metadata.
///
/// ```rust
/// use jobcorpus::{JobPosting, PostingSource, Postings};
///
/// let source = Postings::new(vec![JobPosting::new()].into_iter())
///     .with_metadata("name", "sample");
///
/// assert_eq!(source.metadata()["name"], "sample");
/// ```
#[derive(Debug, Clone)]
pub struct Postings<I> {
    inner: I,
    metadata: Metadata,
}

impl<I: Iterator<Item = JobPosting>> Postings<I> {
    /// Wrap an iterator with empty metadata.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            metadata: Metadata::new(),
        }
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl<I: Iterator<Item = JobPosting>> Iterator for Postings<I> {
    type Item = JobPosting;

    fn next(&mut self) -> Option<JobPosting> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: Iterator<Item = JobPosting>> PostingSource for Postings<I> {
    fn metadata(&self) -> Metadata {
        self.metadata.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting() -> JobPosting {
        [("a", "X"), ("b", "Y"), (ONET_SOC_CODE, "11-1011.00")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_project_keeps_only_listed_fields() {
        let projected = posting().project(&["b", "missing"]);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected.get("b"), Some("Y"));
        assert!(!projected.contains("missing"));
    }

    #[test]
    fn test_join_fields_follows_field_order() {
        assert_eq!(posting().join_fields(&["a", "b"]), "X Y");
        assert_eq!(posting().join_fields(&["b", "a"]), "Y X");
        assert_eq!(posting().join_fields(&["a", "zzz", "b"]), "X  Y");
    }

    #[test]
    fn test_join_required_reports_missing_field() {
        let err = posting().join_required(&["a", "zzz"]).unwrap_err();
        assert!(matches!(err, Error::MissingField(ref f) if f == "zzz"));
    }

    #[test]
    fn test_from_json_stringifies_scalars() {
        let posting = JobPosting::from_json(
            r#"{"description": "Hi", "baseSalary": 55000, "remote": true, "skills": null, "tags": ["a", "b"]}"#,
        )
        .unwrap();

        assert_eq!(posting.get("description"), Some("Hi"));
        assert_eq!(posting.get("baseSalary"), Some("55000"));
        assert_eq!(posting.get("remote"), Some("true"));
        assert_eq!(posting.get("skills"), None);
        assert_eq!(posting.get("tags"), Some(r#"["a","b"]"#));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(matches!(
            JobPosting::from_json("[1, 2]"),
            Err(Error::InvalidPosting(_))
        ));
        assert!(matches!(JobPosting::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_postings_metadata() {
        let source = Postings::new(vec![posting()].into_iter()).with_metadata("count", 1);
        assert_eq!(source.metadata()["count"], 1);
        assert_eq!(source.count(), 1);
    }
}
