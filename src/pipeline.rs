//! Lazy function composition over item sequences.
//!
//! A preprocessing pipeline is a list of item-level functions (strip HTML,
//! split sentences, tokenize, ...) that must be applied identically at
//! training and prediction time. Each function is *wrapped* into a sequence
//! transform and the transforms are *composed* left to right:
//!
//! ```text
//! source ──► wrap(f1) ──► wrap(f2) ──► ... ──► wrap(fN) ──► consumer
//!              │            │                    │
//!          skip None    skip None            skip None
//! ```
//!
//! ## The Empty Marker
//!
//! Sequences carry `Option<T>`. `None` is the empty marker: a wrapped stage
//! never sees it, the item simply disappears from the output. A stage may
//! itself return `None` to drop an item. This is filtering, not error
//! suppression: a stage that returns `Err` surfaces that error to the
//! consumer at the point the item is pulled.
//!
//! ## Laziness
//!
//! Nothing runs until the consumer pulls. Pulling K items through N stages
//! costs O(N·K) stage calls regardless of how long (or infinite) the source
//! is, and a pipeline can be built over many sources since [`Pipeline::build`]
//! only borrows it.

use std::fmt;
use std::marker::PhantomData;

use crate::Result;

/// A lazy sequence-to-sequence transform.
///
/// Items are `Result<Option<A>>`: `Ok(None)` is the empty marker and `Err`
/// is a failure travelling towards the consumer.
pub trait Transform<A: 'static> {
    /// Item type produced by this transform.
    type Output: 'static;

    /// Apply the transform lazily to `items`.
    fn apply<'a, I>(&'a self, items: I) -> impl Iterator<Item = Result<Option<Self::Output>>> + 'a
    where
        I: Iterator<Item = Result<Option<A>>> + 'a;
}

/// The transform that changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<A: 'static> Transform<A> for Identity {
    type Output = A;

    fn apply<'a, I>(&'a self, items: I) -> impl Iterator<Item = Result<Option<A>>> + 'a
    where
        I: Iterator<Item = Result<Option<A>>> + 'a,
    {
        items
    }
}

/// An item function lifted to a sequence transform. See [`wrap`].
#[derive(Clone, Copy)]
pub struct Wrap<F> {
    func: F,
}

/// Lift an item function into a lazy sequence transform.
///
/// Every non-empty item is passed to `func` and its result is yielded;
/// empty markers are skipped without calling `func`.
///
/// ```rust
/// use jobcorpus::pipeline::{wrap, Transform};
///
/// let double = wrap(|x: i32| Ok(Some(x * 2)));
/// let items: Vec<jobcorpus::Result<Option<i32>>> = vec![Ok(Some(1)), Ok(None), Ok(Some(3))];
/// let out: Vec<_> = double.apply(items.into_iter()).map(Result::unwrap).collect();
///
/// assert_eq!(out, vec![Some(2), Some(6)]);
/// ```
pub fn wrap<A, B, F>(func: F) -> Wrap<F>
where
    F: Fn(A) -> Result<Option<B>>,
{
    Wrap { func }
}

impl<A: 'static, B: 'static, F> Transform<A> for Wrap<F>
where
    F: Fn(A) -> Result<Option<B>>,
{
    type Output = B;

    fn apply<'a, I>(&'a self, items: I) -> impl Iterator<Item = Result<Option<B>>> + 'a
    where
        I: Iterator<Item = Result<Option<A>>> + 'a,
    {
        items.filter_map(move |item| match item {
            Ok(Some(value)) => Some((self.func)(value)),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        })
    }
}

impl<F> fmt::Debug for Wrap<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Wrap")
    }
}

/// Left-to-right composition: `second` consumes the output of `first`.
#[derive(Debug, Clone, Copy)]
pub struct Compose<S1, S2> {
    first: S1,
    second: S2,
}

impl<S1, S2> Compose<S1, S2> {
    /// Compose two transforms.
    pub fn new(first: S1, second: S2) -> Self {
        Self { first, second }
    }
}

impl<A: 'static, S1, S2> Transform<A> for Compose<S1, S2>
where
    S1: Transform<A>,
    S2: Transform<S1::Output>,
{
    type Output = S2::Output;

    fn apply<'a, I>(&'a self, items: I) -> impl Iterator<Item = Result<Option<S2::Output>>> + 'a
    where
        I: Iterator<Item = Result<Option<A>>> + 'a,
    {
        self.second.apply(self.first.apply(items))
    }
}

/// A documented, boxed item function over a single item type.
///
/// Used when the stage list is only known at runtime; see [`compose`].
pub struct Stage<T> {
    description: String,
    func: Wrap<Box<dyn Fn(T) -> Result<Option<T>>>>,
}

impl<T> Stage<T> {
    /// A fallible stage that may also drop items by returning `Ok(None)`.
    pub fn new(
        description: impl Into<String>,
        func: impl Fn(T) -> Result<Option<T>> + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            func: wrap(Box::new(func) as Box<dyn Fn(T) -> Result<Option<T>>>),
        }
    }

    /// An infallible stage that keeps every item.
    pub fn map(description: impl Into<String>, func: impl Fn(T) -> T + 'static) -> Self {
        Self::new(description, move |item| Ok(Some(func(item))))
    }

    /// What this stage does.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl<T> fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A runtime list of stages applied in order to each item.
#[derive(Debug)]
pub struct Stages<T>(Vec<Stage<T>>);

impl<T: 'static> Transform<T> for Stages<T> {
    type Output = T;

    fn apply<'a, I>(&'a self, items: I) -> impl Iterator<Item = Result<Option<T>>> + 'a
    where
        I: Iterator<Item = Result<Option<T>>> + 'a,
    {
        let items: Box<dyn Iterator<Item = Result<Option<T>>> + 'a> = Box::new(items);
        self.0
            .iter()
            .fold(items, |items, stage| -> Box<dyn Iterator<Item = Result<Option<T>>> + 'a> {
                Box::new(Transform::<T>::apply(&stage.func, items))
            })
    }
}

/// Compose a runtime list of stages into one pipeline.
///
/// An empty list gives the identity pipeline.
///
/// ```rust
/// use jobcorpus::pipeline::{compose, Stage};
///
/// let pipeline = compose(vec![
///     Stage::map("trim", |s: String| s.trim().to_string()),
///     Stage::map("lowercase", |s: String| s.to_lowercase()),
/// ]);
///
/// let out: Vec<String> = pipeline
///     .build(vec![Some("  Rust ".to_string()), None])
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(out, vec!["rust"]);
/// assert_eq!(pipeline.description(), ["trim", "lowercase"]);
/// ```
pub fn compose<T: 'static>(stages: impl IntoIterator<Item = Stage<T>>) -> Pipeline<T, Stages<T>> {
    let stages: Vec<Stage<T>> = stages.into_iter().collect();
    let descriptions = stages.iter().map(|s| s.description.clone()).collect();
    Pipeline {
        transform: Stages(stages),
        descriptions,
        input: PhantomData,
    }
}

/// A reusable, lazily evaluated preprocessing pipeline.
///
/// Stages are appended with [`stage`](Pipeline::stage),
/// [`optional_stage`](Pipeline::optional_stage) or
/// [`try_stage`](Pipeline::try_stage) and may change the item type.
///
/// ```rust
/// use jobcorpus::{text, JobPosting, Pipeline};
///
/// let pipeline = Pipeline::<JobPosting>::new()
///     .stage("join description and skills", |p: JobPosting| {
///         p.join_fields(&["description", "skills"])
///     })
///     .try_stage("strip html", |s: String| text::clean_html(&s).map(Some))
///     .stage("tokenize", |s: String| text::word_tokenize(&s));
///
/// let posting: JobPosting = [("description", "<b>Write</b> code"), ("skills", "rust")]
///     .into_iter()
///     .collect();
///
/// let tokens: Vec<Vec<String>> = pipeline
///     .build(vec![posting])
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(tokens, vec![vec!["Write", "code", "rust"]]);
/// ```
pub struct Pipeline<A, S = Identity> {
    transform: S,
    descriptions: Vec<String>,
    input: PhantomData<fn(A)>,
}

impl<A: 'static> Pipeline<A, Identity> {
    /// The identity pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transform: Identity,
            descriptions: Vec::new(),
            input: PhantomData,
        }
    }
}

impl<A: 'static> Default for Pipeline<A, Identity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: 'static, S: Transform<A>> Pipeline<A, S> {
    /// Append a stage that maps every item.
    #[must_use]
    pub fn stage<B, F>(
        self,
        description: impl Into<String>,
        func: F,
    ) -> Pipeline<A, Compose<S, Wrap<impl Fn(S::Output) -> Result<Option<B>>>>>
    where
        B: 'static,
        F: Fn(S::Output) -> B,
    {
        self.try_stage(description, move |item| Ok(Some(func(item))))
    }

    /// Append a stage that may drop items by returning `None`.
    #[must_use]
    pub fn optional_stage<B, F>(
        self,
        description: impl Into<String>,
        func: F,
    ) -> Pipeline<A, Compose<S, Wrap<impl Fn(S::Output) -> Result<Option<B>>>>>
    where
        B: 'static,
        F: Fn(S::Output) -> Option<B>,
    {
        self.try_stage(description, move |item| Ok(func(item)))
    }

    /// Append a fallible stage. Its errors reach the consumer unchanged.
    #[must_use]
    pub fn try_stage<B, F>(mut self, description: impl Into<String>, func: F) -> Pipeline<A, Compose<S, Wrap<F>>>
    where
        B: 'static,
        F: Fn(S::Output) -> Result<Option<B>>,
    {
        self.descriptions.push(description.into());
        Pipeline {
            transform: Compose::new(self.transform, wrap(func)),
            descriptions: self.descriptions,
            input: PhantomData,
        }
    }

    /// Apply the pipeline to `source`, lazily.
    ///
    /// Source items may be plain values or `Option`s; `None` items are
    /// skipped. The source is only advanced as the result is pulled.
    pub fn build<'a, I>(&'a self, source: I) -> impl Iterator<Item = Result<S::Output>> + 'a
    where
        I: IntoIterator,
        I::IntoIter: 'a,
        I::Item: Into<Option<A>>,
    {
        tracing::debug!(stages = self.descriptions.len(), "building pipeline");
        let items = source.into_iter().map(|item| Ok(item.into()));
        self.transform.apply(items).filter_map(Result::transpose)
    }

    /// Stage descriptions, in application order.
    #[must_use]
    pub fn description(&self) -> &[String] {
        &self.descriptions
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    /// Whether this is the identity pipeline.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

impl<A, S> fmt::Debug for Pipeline<A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.descriptions)
            .finish()
    }
}
