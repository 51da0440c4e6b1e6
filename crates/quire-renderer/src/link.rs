//! Page-reference links.
//!
//! Content refers to other pages by a tail of their id (`bitmap`,
//! `tags/bitmap`) or by an absolute id (`/h1/tags/bitmap`), optionally with a
//! heading anchor (`bitmap#fields`). Resolution against the site's page index
//! is delegated to a [`LinkResolver`].

/// A resolved link to a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLink {
    /// Link target, including any heading anchor.
    pub url: String,
    /// Title of the target page in the requested language.
    pub title: String,
    /// Set on placeholder links produced in debug mode.
    pub unresolved: bool,
}

/// Page reference resolution failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No page id matches the reference.
    #[error("no page matches `{0}`")]
    NotFound(String),
    /// More than one page matches equally well.
    #[error("`{tail}` is ambiguous: {}", .candidates.join(", "))]
    Ambiguous {
        /// The reference as written.
        tail: String,
        /// Equally ranked page ids.
        candidates: Vec<String>,
    },
}

/// Resolves page references to links.
pub trait LinkResolver: Send + Sync {
    /// Resolve `id_tail`, optionally pointing at a heading on the target page.
    fn resolve(&self, id_tail: &str, heading: Option<&str>) -> Result<PageLink, ResolveError>;
}

/// Split `tail#heading` into its parts. An empty heading is treated as absent.
///
/// # Examples
///
/// ```
/// use quire_renderer::split_page_ref;
///
/// assert_eq!(split_page_ref("bitmap#fields"), ("bitmap", Some("fields")));
/// assert_eq!(split_page_ref("bitmap"), ("bitmap", None));
/// ```
#[must_use]
pub fn split_page_ref(reference: &str) -> (&str, Option<&str>) {
    match reference.split_once('#') {
        Some((tail, heading)) if !heading.is_empty() => (tail, Some(heading)),
        Some((tail, _)) => (tail, None),
        None => (reference, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_page_ref_trailing_hash() {
        assert_eq!(split_page_ref("bitmap#"), ("bitmap", None));
    }

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = ResolveError::Ambiguous {
            tail: "bitmap".to_owned(),
            candidates: vec!["/h1/bitmap".to_owned(), "/h2/bitmap".to_owned()],
        };
        assert_eq!(
            err.to_string(),
            "`bitmap` is ambiguous: /h1/bitmap, /h2/bitmap"
        );
    }
}
