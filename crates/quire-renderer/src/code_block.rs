//! Fenced block processors.
//!
//! Special fenced blocks (data tables, credit lists, ...) are handed to
//! registered processors before falling back to plain code block rendering.
//! Processors are checked in order; the first one that does not return
//! [`ProcessResult::PassThrough`] wins.
//!
//! # Example
//!
//! ```
//! use quire_renderer::{
//!     BoxError, CodeBlockProcessor, FencedBlock, OutputMode, ProcessResult,
//! };
//!
//! struct Shout;
//!
//! impl CodeBlockProcessor for Shout {
//!     fn process(
//!         &mut self,
//!         block: &FencedBlock<'_>,
//!         mode: OutputMode,
//!     ) -> Result<ProcessResult, BoxError> {
//!         if block.language != "shout" {
//!             return Ok(ProcessResult::PassThrough);
//!         }
//!         let text = block.source.trim().to_uppercase();
//!         Ok(ProcessResult::Inline(match mode {
//!             OutputMode::Html => format!("<p><strong>{text}</strong></p>"),
//!             OutputMode::Plain => text,
//!         }))
//!     }
//! }
//! ```

use std::collections::HashMap;

use crate::backend::OutputMode;

/// Boxed error returned by processors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of processing a fenced block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the block with this output, already in the backend's format.
    Inline(String),
    /// Not handled; render as a regular code block.
    PassThrough,
}

/// A fenced block offered to processors.
#[derive(Debug)]
pub struct FencedBlock<'a> {
    /// Language identifier from the fence (e.g. `datatable`).
    pub language: &'a str,
    /// `key=value` attributes following the language.
    pub attrs: &'a HashMap<String, String>,
    /// Raw block content.
    pub source: &'a str,
    /// Zero-based index of this block among all code blocks of the document.
    pub index: usize,
}

/// A processor failed on a fenced block.
#[derive(Debug, thiserror::Error)]
#[error("`{language}` block #{index}: {source}")]
pub struct ProcessError {
    /// Language of the failing block.
    pub language: String,
    /// Index of the failing block.
    pub index: usize,
    /// Underlying error.
    #[source]
    pub source: BoxError,
}

/// Trait for processing special fenced blocks.
pub trait CodeBlockProcessor {
    /// Process a fenced block for the given output mode.
    ///
    /// Returning an error aborts the whole render: processors report
    /// configuration mistakes this way rather than emitting partial output.
    fn process(
        &mut self,
        block: &FencedBlock<'_>,
        mode: OutputMode,
    ) -> Result<ProcessResult, BoxError>;
}

/// Parse a fence info string into language and attributes.
///
/// Format: `language [key=value ...]`. Surrounding quotes are stripped from
/// values; values cannot contain whitespace.
#[must_use]
pub(crate) fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let attrs = parts
        .filter_map(|part| part.split_once('='))
        .map(|(key, value)| {
            let value = value.trim_matches('"').trim_matches('\'');
            (key.to_owned(), value.to_owned())
        })
        .collect();

    (language, attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fence_info_language_only() {
        let (lang, attrs) = parse_fence_info("rust");
        assert_eq!(lang, "rust");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_with_attrs() {
        let (lang, attrs) = parse_fence_info("datatable id=tags caption='All'");
        assert_eq!(lang, "datatable");
        assert_eq!(attrs.get("id"), Some(&"tags".to_owned()));
        assert_eq!(attrs.get("caption"), Some(&"All".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_ignores_bare_words() {
        let (lang, attrs) = parse_fence_info("hsc linenums");
        assert_eq!(lang, "hsc");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_empty() {
        let (lang, attrs) = parse_fence_info("");
        assert_eq!(lang, "");
        assert!(attrs.is_empty());
    }
}
