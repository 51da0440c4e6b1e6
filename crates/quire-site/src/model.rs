//! Input model: front matter, page index and site bundles.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Person to contribution, in authored order.
pub type Thanks = IndexMap<String, String>;

/// Person to every contribution credited across the site.
pub type Credits = IndexMap<String, Vec<String>>;

/// Page front matter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontMatter {
    /// Page title; the index title is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Metabox image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Metabox image caption (markdown).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Metabox info text (markdown).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// `type` or `type:argument`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metabox_title: Option<String>,
    /// Extra search keywords.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub thanks: Thanks,
    /// Placeholder page with little or no content.
    pub stub: bool,
    /// Exclude the page from the search index.
    pub no_search: bool,
}

/// One page of the site graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageEntry {
    /// Language to title.
    pub titles: IndexMap<String, String>,
    /// Parent page id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Related page ids.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
    /// Languages the page is available in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub langs: Vec<String>,
    pub stub: bool,
}

/// The site graph, keyed by absolute page id (`/h1/tags/bitmap`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex {
    pages: IndexMap<String, PageEntry>,
}

impl PageIndex {
    #[must_use]
    pub fn new(pages: IndexMap<String, PageEntry>) -> Self {
        Self { pages }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PageEntry> {
        self.pages.get(id)
    }

    /// Stored key for `id`, borrowed from the index.
    #[must_use]
    pub fn get_id(&self, id: &str) -> Option<&str> {
        self.pages.get_key_value(id).map(|(key, _)| key.as_str())
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: PageEntry) {
        self.pages.insert(id.into(), entry);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageEntry)> {
        self.pages.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Title of `id` in `lang`.
    ///
    /// Falls back to the default-language title, then to the last id segment.
    #[must_use]
    pub fn title(&self, id: &str, lang: &str, default_lang: &str) -> String {
        self.get(id)
            .and_then(|entry| {
                entry
                    .titles
                    .get(lang)
                    .or_else(|| entry.titles.get(default_lang))
            })
            .cloned()
            .unwrap_or_else(|| quire_data::last_segment(id).to_owned())
    }

    /// Ancestors of `id`, root first. Stops at unknown ids and cycles.
    #[must_use]
    pub fn parents(&self, id: &str) -> Vec<&str> {
        let mut chain: Vec<&str> = Vec::new();
        let mut current = self.get(id).and_then(|entry| entry.parent.as_deref());
        while let Some(parent) = current {
            let Some(key) = self.get_id(parent) else {
                break;
            };
            if key == id || chain.contains(&key) {
                tracing::warn!(page = id, parent = key, "cycle in page parents");
                break;
            }
            chain.push(key);
            current = self.get(key).and_then(|entry| entry.parent.as_deref());
        }
        chain.reverse();
        chain
    }

    /// Non-stub pages whose parent is `id`, sorted by title in `lang`.
    #[must_use]
    pub fn children(&self, id: &str, lang: &str, default_lang: &str) -> Vec<&str> {
        let mut children: Vec<(String, &str)> = self
            .iter()
            .filter(|(_, entry)| !entry.stub && entry.parent.as_deref() == Some(id))
            .map(|(child, _)| (self.title(child, lang, default_lang).to_lowercase(), child))
            .collect();
        children.sort();
        children.into_iter().map(|(_, child)| child).collect()
    }
}

/// One page to render.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageInput {
    /// Absolute page id.
    pub id: String,
    /// Page language; the site default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub front: FrontMatter,
    /// Markdown body.
    pub body: String,
    /// Page-local data, deep-merged over the global data.
    pub data: Value,
}

impl PageInput {
    #[must_use]
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            ..Self::default()
        }
    }
}

/// Everything needed to build a site, as produced by a content loader.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteBundle {
    pub global: Value,
    pub index: PageIndex,
    pub pages: Vec<PageInput>,
    /// Site-wide credits; collected from page thanks when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_thanks: Option<Credits>,
}

impl SiteBundle {
    /// Explicit credits, or every page's thanks merged in page order.
    #[must_use]
    pub fn credits(&self) -> Credits {
        if let Some(credits) = &self.all_thanks {
            return credits.clone();
        }
        let mut credits = Credits::new();
        for page in &self.pages {
            for (person, contribution) in &page.front.thanks {
                let entry = credits.entry(person.clone()).or_default();
                if !entry.contains(contribution) {
                    entry.push(contribution.clone());
                }
            }
        }
        credits
    }
}
