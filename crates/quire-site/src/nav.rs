//! Navigation collections for a page.

use serde::Serialize;

use crate::model::PageIndex;

/// A titled link to another page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

/// A link to the same page in another language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LanguageLink {
    pub lang: String,
    pub title: String,
    pub url: String,
}

/// Everything the page template links to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageNav {
    /// Ancestors, root first.
    pub parents: Vec<NavLink>,
    pub children: Vec<NavLink>,
    pub related: Vec<NavLink>,
    pub languages: Vec<LanguageLink>,
}

/// Public URL of page `id` in `lang`.
///
/// # Examples
///
/// ```
/// use quire_site::page_url;
///
/// assert_eq!(page_url("/h1/tags", "en", "en"), "/h1/tags");
/// assert_eq!(page_url("/h1/tags", "es", "en"), "/es/h1/tags");
/// ```
#[must_use]
pub fn page_url(id: &str, lang: &str, default_lang: &str) -> String {
    if lang == default_lang {
        id.to_owned()
    } else {
        format!("/{lang}{id}")
    }
}

impl PageNav {
    /// Collect navigation for page `id` in `lang`.
    ///
    /// Related ids missing from the index and stub pages are left out.
    #[must_use]
    pub fn build(index: &PageIndex, id: &str, lang: &str, default_lang: &str) -> Self {
        let link = |target: &str| NavLink {
            title: index.title(target, lang, default_lang),
            url: page_url(target, lang, default_lang),
        };

        let Some(entry) = index.get(id) else {
            tracing::debug!(page = id, "page not in index, skipping navigation");
            return Self::default();
        };

        let related = entry
            .related
            .iter()
            .filter(|target| match index.get(target) {
                Some(related) => !related.stub,
                None => {
                    tracing::debug!(page = id, related = %target, "related page not in index");
                    false
                }
            })
            .map(|target| link(target.as_str()))
            .collect();

        let languages = entry
            .langs
            .iter()
            .filter(|other| other.as_str() != lang)
            .map(|other| LanguageLink {
                lang: other.clone(),
                title: index.title(id, other, default_lang),
                url: page_url(id, other, default_lang),
            })
            .collect();

        Self {
            parents: index.parents(id).into_iter().map(link).collect(),
            children: index
                .children(id, lang, default_lang)
                .into_iter()
                .map(link)
                .collect(),
            related,
            languages,
        }
    }
}
