//! Property-based tests for pipelines and corpora.
//!
//! These tests verify invariants that must hold for any input:
//! - Identity: an empty pipeline yields its input unchanged
//! - Skipping: empty markers never reach a stage
//! - Laziness: stages run only for items that are pulled
//! - Join order: raw output follows the configured field order
//! - Tags: tags are consecutive and the lookup covers exactly the emitted documents

use std::cell::Cell;
use std::rc::Rc;

use jobcorpus::section::extract_section;
use jobcorpus::text::{clean_str, collapse_whitespace};
use jobcorpus::{
    compose, BasicCorpus, CorpusConfig, CorpusCreator, Doc2VecCorpus, Document, JobPosting, Pipeline, Stage,
};
use proptest::prelude::*;
use regex::Regex;

// =============================================================================
// Test Generators
// =============================================================================

/// Items with interspersed empty markers.
fn sparse_items() -> impl Strategy<Value = Vec<Option<i64>>> {
    prop::collection::vec(prop::option::weighted(0.7, -1_000i64..1_000), 0..50)
}

/// A short word-like value.
fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z]{1,10}").unwrap()
}

/// Postings with a description and, sometimes, an occupation code.
fn tagged_postings() -> impl Strategy<Value = Vec<(String, Option<String>)>> {
    prop::collection::vec((word(), prop::option::of(word())), 0..30)
}

fn posting_of(description: &str, code: Option<&str>) -> JobPosting {
    let mut posting = JobPosting::new();
    posting.insert("description", description);
    if let Some(code) = code {
        posting.insert("onet_soc_code", code);
    }
    posting
}

// =============================================================================
// Pipeline Properties
// =============================================================================

proptest! {
    #[test]
    fn empty_pipeline_is_identity(items in sparse_items()) {
        let pipeline = compose(Vec::<Stage<i64>>::new());
        let out: Vec<i64> = pipeline.build(items.clone()).collect::<Result<_, _>>().unwrap();
        let expected: Vec<i64> = items.into_iter().flatten().collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn empty_markers_never_reach_a_stage(items in sparse_items()) {
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);
        let pipeline = Pipeline::<i64>::new().stage("count", move |x: i64| {
            counter.set(counter.get() + 1);
            x
        });

        let out: Vec<i64> = pipeline.build(items.clone()).collect::<Result<_, _>>().unwrap();
        let present = items.iter().flatten().count();

        prop_assert_eq!(calls.get(), present);
        prop_assert_eq!(out.len(), present);
    }

    #[test]
    fn stages_apply_in_order(items in sparse_items(), k in -10i64..10) {
        let pipeline = Pipeline::<i64>::new()
            .stage("add", move |x: i64| x + k)
            .stage("double", |x: i64| x * 2);

        let out: Vec<i64> = pipeline.build(items.clone()).collect::<Result<_, _>>().unwrap();
        let expected: Vec<i64> = items.into_iter().flatten().map(|x| (x + k) * 2).collect();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn stages_run_only_for_pulled_items(values in prop::collection::vec(any::<i64>(), 0..50), take in 0usize..60) {
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);
        let pipeline = Pipeline::<i64>::new().stage("count", move |x: i64| {
            counter.set(counter.get() + 1);
            x
        });

        let pulled = pipeline.build(values.clone()).take(take).count();

        prop_assert_eq!(pulled, take.min(values.len()));
        prop_assert_eq!(calls.get(), pulled);
    }

    #[test]
    fn dropping_stage_filters(items in sparse_items()) {
        let pipeline = Pipeline::<i64>::new().optional_stage("evens", |x: i64| (x % 2 == 0).then_some(x));
        let out: Vec<i64> = pipeline.build(items.clone()).collect::<Result<_, _>>().unwrap();
        let expected: Vec<i64> = items.into_iter().flatten().filter(|x| x % 2 == 0).collect();
        prop_assert_eq!(out, expected);
    }
}

// =============================================================================
// Corpus Properties
// =============================================================================

proptest! {
    #[test]
    fn raw_join_follows_field_order(values in prop::collection::vec(word(), 1..6)) {
        let fields: Vec<String> = (0..values.len()).map(|i| format!("field{i}")).collect();
        let posting: JobPosting = fields.iter().cloned().zip(values.iter().cloned()).collect();

        let forward = BasicCorpus::new(CorpusConfig::with_fields(fields.clone()).raw());
        let reversed_fields: Vec<String> = fields.iter().rev().cloned().collect();
        let backward = BasicCorpus::new(CorpusConfig::with_fields(reversed_fields).raw());

        let forward = forward.corpus(vec![posting.clone()]).next().unwrap().unwrap();
        let backward = backward.corpus(vec![posting]).next().unwrap().unwrap();

        let reversed_values: Vec<String> = values.iter().rev().cloned().collect();
        prop_assert_eq!(forward, Document::Raw(values.join(" ")));
        prop_assert_eq!(backward, Document::Raw(reversed_values.join(" ")));
    }

    #[test]
    fn tags_are_consecutive_and_lookup_matches(postings in tagged_postings()) {
        let source: Vec<JobPosting> = postings
            .iter()
            .map(|(description, code)| posting_of(description, code.as_deref()))
            .collect();

        let creator = Doc2VecCorpus::new(CorpusConfig::with_fields(["description"]));
        let mut corpus = creator.corpus(source);

        let mut emitted = 0;
        for (expected_tag, document) in corpus.by_ref().enumerate() {
            prop_assert_eq!(document.unwrap().tags, vec![expected_tag]);
            emitted += 1;
        }

        prop_assert_eq!(emitted, postings.len());
        prop_assert_eq!(corpus.next_tag(), postings.len());
        prop_assert_eq!(corpus.lookup().len(), postings.len());
        for (tag, (_, code)) in postings.iter().enumerate() {
            prop_assert_eq!(&corpus.lookup()[&tag], code);
        }
    }

    #[test]
    fn rejected_postings_leave_no_trace(postings in prop::collection::vec((word(), any::<bool>()), 0..30)) {
        let source: Vec<JobPosting> = postings
            .iter()
            .map(|(value, complete)| {
                let field = if *complete { "description" } else { "skills" };
                let mut posting: JobPosting = [(field, value.as_str())].into_iter().collect();
                posting.insert("onet_soc_code", value.as_str());
                posting
            })
            .collect();

        let creator = Doc2VecCorpus::new(CorpusConfig::with_fields(["description"]));
        let mut corpus = creator.corpus(source);
        let ok: Vec<_> = corpus.by_ref().filter_map(Result::ok).collect();

        let complete = postings.iter().filter(|(_, complete)| *complete).count();
        prop_assert_eq!(ok.len(), complete);
        prop_assert_eq!(corpus.lookup().len(), complete);
        prop_assert_eq!(corpus.next_tag(), complete);
    }
}

// =============================================================================
// Text Properties
// =============================================================================

proptest! {
    #[test]
    fn clean_str_is_lowercase_and_single_spaced(text in ".{0,200}") {
        let cleaned = clean_str(&text);
        prop_assert_eq!(&cleaned, &cleaned.to_lowercase());
        prop_assert!(!cleaned.contains("  "));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }

    #[test]
    fn collapse_whitespace_is_idempotent(text in "[a-z \t\n]{0,100}") {
        let once = collapse_whitespace(&text);
        prop_assert_eq!(collapse_whitespace(&once), once);
    }

    #[test]
    fn section_words_come_from_the_text(lines in prop::collection::vec("[A-Za-z:+* -]{0,20}", 0..20)) {
        let text = lines.join("\n");
        let section = Regex::new("^[A-Z]").unwrap();
        let all: Vec<&str> = text.split_whitespace().collect();
        for word in extract_section(&text, &section) {
            prop_assert!(all.contains(&word.as_str()));
        }
    }
}
