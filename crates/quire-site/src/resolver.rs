//! Page reference resolution against the site index.

use std::sync::Arc;

use quire_renderer::{LinkResolver, PageLink, ResolveError};

use crate::i18n::Label;
use crate::model::PageIndex;
use crate::nav::page_url;

/// Resolves `~tail#heading` references for one page render.
///
/// Absolute references (`/h1/tags/bitmap`) must match a page id exactly.
/// Otherwise every page whose id ends in `/tail` is a candidate, and the one
/// sharing the most leading segments with the current page wins.
///
/// In debug mode failures produce an `[Unresolved]` placeholder link instead
/// of an error.
#[derive(Clone, Debug)]
pub struct PageResolver {
    index: Arc<PageIndex>,
    page_id: String,
    lang: String,
    default_lang: String,
    debug: bool,
}

impl PageResolver {
    #[must_use]
    pub fn new(
        index: Arc<PageIndex>,
        page_id: impl Into<String>,
        lang: impl Into<String>,
        default_lang: impl Into<String>,
    ) -> Self {
        Self {
            index,
            page_id: page_id.into(),
            lang: lang.into(),
            default_lang: default_lang.into(),
            debug: false,
        }
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Page id that `id_tail` refers to.
    ///
    /// # Errors
    ///
    /// [`ResolveError::NotFound`] when nothing matches and
    /// [`ResolveError::Ambiguous`] when the best matches tie.
    pub fn find(&self, id_tail: &str) -> Result<&str, ResolveError> {
        if id_tail.starts_with('/') {
            return self
                .index
                .get_id(id_tail)
                .ok_or_else(|| ResolveError::NotFound(id_tail.to_owned()));
        }

        let suffix = format!("/{}", id_tail.trim_matches('/'));
        let candidates: Vec<&str> = self
            .index
            .ids()
            .filter(|id| !id_tail.is_empty() && id.ends_with(&suffix))
            .collect();

        let best = candidates
            .iter()
            .map(|id| shared_segments(id, &self.page_id))
            .max()
            .unwrap_or_default();
        let mut best_matches: Vec<&str> = candidates
            .into_iter()
            .filter(|id| shared_segments(id, &self.page_id) == best)
            .collect();

        match best_matches.len() {
            0 => Err(ResolveError::NotFound(id_tail.to_owned())),
            1 => Ok(best_matches[0]),
            _ => {
                best_matches.sort_unstable();
                Err(ResolveError::Ambiguous {
                    tail: id_tail.to_owned(),
                    candidates: best_matches.into_iter().map(str::to_owned).collect(),
                })
            }
        }
    }
}

impl LinkResolver for PageResolver {
    fn resolve(&self, id_tail: &str, heading: Option<&str>) -> Result<PageLink, ResolveError> {
        match self.find(id_tail) {
            Ok(id) => {
                let mut url = page_url(id, &self.lang, &self.default_lang);
                if let Some(heading) = heading {
                    url.push('#');
                    url.push_str(heading);
                }
                Ok(PageLink {
                    url,
                    title: self.index.title(id, &self.lang, &self.default_lang),
                    unresolved: false,
                })
            }
            Err(error) if self.debug => {
                tracing::warn!(page = %self.page_id, reference = id_tail, %error, "unresolved page link");
                Ok(PageLink {
                    url: "#".to_owned(),
                    title: Label::Unresolved.text(&self.lang).to_owned(),
                    unresolved: true,
                })
            }
            Err(error) => Err(error),
        }
    }
}

fn shared_segments(a: &str, b: &str) -> usize {
    a.split('/')
        .filter(|s| !s.is_empty())
        .zip(b.split('/').filter(|s| !s.is_empty()))
        .take_while(|(x, y)| x == y)
        .count()
}
