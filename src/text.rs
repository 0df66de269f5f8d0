//! Text cleaning and tokenization primitives.
//!
//! These are the atomic operations corpus creators and pipelines are built
//! from. They are deliberately simple and deterministic:
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`clean_html`] | HTML fragment | visible text |
//! | [`lowercase_strip_punc`] | text | lowercase text without ASCII punctuation |
//! | [`clean_str`] | text | lowercase, tokenizer-friendly text |
//! | [`collapse_whitespace`] | text | single-spaced text |
//! | [`sentence_tokenize`] | text | sentences |
//! | [`word_tokenize`] | sentence | words and punctuation tokens |
//!
//! Sentence and word boundaries follow Unicode Standard Annex #29.
//! [`clean_str`] removes periods, so text it has cleaned only splits into
//! sentences on `!` and `?`.

use std::sync::LazyLock;

use html2text::config;
use html2text::render::text_renderer::TrivialDecorator;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::Result;

//
// clean_str
//
static DISALLOWED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9(),!?'`]").unwrap());
static CLITIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"('s|'ve|n't|'re|'d|'ll)").unwrap());
static PAD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([,!?()])").unwrap());
static MULTI_SPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Rendered lines longer than this are wrapped by the HTML renderer.
const RENDER_WIDTH: usize = 1 << 20;

/// Extract visible text from an HTML fragment.
///
/// Tags are dropped without decoration and character references are
/// decoded. Line breaks in the source survive as line breaks in the
/// output, so plain-text descriptions keep their line structure; block
/// elements may add further blank lines.
///
/// ```rust
/// use jobcorpus::text::clean_html;
///
/// assert_eq!(clean_html("<p>Salt &amp; pepper</p>").unwrap(), "Salt & pepper");
/// assert_eq!(clean_html("Intro\n\nSkills").unwrap(), "Intro\n\nSkills");
/// ```
///
/// # Errors
///
/// Returns [`Error::Html`](crate::Error::Html) if the renderer fails.
pub fn clean_html(html: &str) -> Result<String> {
    // Source newlines are whitespace to an HTML parser
    let html = html.replace('\n', "<br>");
    let text = config::with_decorator(TrivialDecorator::new())
        .allow_width_overflow()
        .string_from_read(html.as_bytes(), RENDER_WIDTH)?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// Lowercase `text` and remove ASCII punctuation.
///
/// ```rust
/// use jobcorpus::text::lowercase_strip_punc;
///
/// assert_eq!(lowercase_strip_punc("Software Developers, Applications"), "software developers applications");
/// ```
#[must_use]
pub fn lowercase_strip_punc(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Normalize text for word-embedding training.
///
/// Keeps letters, digits, parentheses, commas, `!`, `?`, apostrophes and
/// backticks (periods become spaces), splits English clitics
/// (`'s 've n't 're 'd 'll`) into their own tokens, pads `, ! ? ( )` with
/// spaces, collapses whitespace and lowercases.
///
/// ```rust
/// use jobcorpus::text::clean_str;
///
/// assert_eq!(clean_str("Don't stop, ever!"), "do n't stop , ever !");
/// assert_eq!(clean_str("Write code. Ship it."), "write code ship it");
/// ```
#[must_use]
pub fn clean_str(text: &str) -> String {
    let text = DISALLOWED_REGEX.replace_all(text, " ");
    let text = CLITIC_REGEX.replace_all(&text, " ${1}");
    let text = PAD_REGEX.replace_all(&text, " ${1} ");
    MULTI_SPACE_REGEX
        .replace_all(&text, " ")
        .trim()
        .to_lowercase()
}

/// Replace every run of whitespace with a single space and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into sentences (UAX #29), trimmed, without empty sentences.
///
/// ```rust
/// use jobcorpus::text::sentence_tokenize;
///
/// let sentences = sentence_tokenize("Hello world. How are you? I am fine.");
/// assert_eq!(sentences, ["Hello world.", "How are you?", "I am fine."]);
/// ```
#[must_use]
pub fn sentence_tokenize(text: &str) -> Vec<String> {
    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Split a sentence into word and punctuation tokens (UAX #29).
///
/// ```rust
/// use jobcorpus::text::word_tokenize;
///
/// assert_eq!(word_tokenize("Hello, world."), ["Hello", ",", "world", "."]);
/// ```
#[must_use]
pub fn word_tokenize(text: &str) -> Vec<String> {
    text.split_word_bounds()
        .filter(|w| !w.trim().is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_html_strips_tags() {
        let text = clean_html("<div><h1>Title</h1><p>Body <b>bold</b></p></div>").unwrap();
        assert!(!text.contains('<'));
        assert!(text.contains("Title"));
        assert!(text.contains("Body bold"));
    }

    #[test]
    fn test_clean_html_decodes_named_entities() {
        let text = clean_html("Caf&eacute; &copy; 2024 &euro;5 &rarr; team").unwrap();
        assert_eq!(text, "Café © 2024 €5 → team");
        assert_eq!(clean_html("&lt;b&gt; &#65;&#x42;").unwrap(), "<b> AB");
    }

    #[test]
    fn test_clean_html_keeps_line_breaks() {
        let text = clean_html("Intro\n\nRequirements:\n- Rust\n- SQL").unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), ["Intro", "", "Requirements:", "- Rust", "- SQL"]);
    }

    #[test]
    fn test_lowercase_strip_punc() {
        assert_eq!(lowercase_strip_punc("C++/Rust (Senior)!"), "crust senior");
        assert_eq!(lowercase_strip_punc(""), "");
    }

    #[test]
    fn test_clean_str_separates_punctuation() {
        assert_eq!(clean_str("<b>Great pay!</b> Good team?"), "b great pay ! b good team ?");
        assert_eq!(clean_str("v1.2 e.g. done."), "v1 2 e g done");
        assert_eq!(clean_str("We've got (benefits)"), "we 've got ( benefits )");
        assert_eq!(clean_str("   "), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn test_sentence_tokenize_after_clean_str() {
        let sentences = sentence_tokenize(&clean_str("Great pay! Good team? Apply now!"));
        assert_eq!(sentences, ["great pay !", "good team ?", "apply now !"]);
    }

    #[test]
    fn test_sentence_tokenize_empty() {
        assert!(sentence_tokenize("").is_empty());
        assert!(sentence_tokenize("  \n ").is_empty());
    }

    #[test]
    fn test_word_tokenize_drops_whitespace() {
        assert_eq!(word_tokenize("great  pay !"), ["great", "pay", "!"]);
        assert!(word_tokenize(" \t").is_empty());
    }
}
