//! Page render orchestration.

use std::sync::Arc;

use quire_data::deep_merge;
use quire_renderer::{
    HtmlBackend, LinkResolver, MarkdownRenderer, PlainBackend, RenderBackend, RenderError,
};
use quire_table::DataTableProcessor;
use serde_json::Value;

use crate::error::PageError;
use crate::metabox::{MetaboxContext, select_metabox};
use crate::model::{Credits, PageIndex, PageInput, SiteBundle};
use crate::nav::{PageNav, page_url};
use crate::outline::build_outline;
use crate::resolver::PageResolver;
use crate::search::SearchDocument;
use crate::template::{DocumentData, render_document};
use crate::thanks::{ThanksListProcessor, render_thanks, thanks_heading};

/// Maximum length of the meta description, in characters.
const DESCRIPTION_LENGTH: usize = 160;

/// Site-wide render options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Language of unprefixed URLs and title fallbacks.
    pub default_lang: String,
    /// Degrade unresolved page links to placeholders instead of failing.
    pub debug: bool,
    /// Game assumed for tags named without one.
    pub tag_group: String,
    /// Prefix for canonical URLs.
    pub base_url: Option<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            default_lang: "en".to_owned(),
            debug: false,
            tag_group: "common".to_owned(),
            base_url: None,
        }
    }
}

/// Output of [`Site::render_page`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    pub id: String,
    pub lang: String,
    /// Public URL of the page.
    pub url: String,
    pub title: String,
    /// Complete HTML document.
    pub html: String,
    /// `None` when the page opts out of search.
    pub search: Option<SearchDocument>,
}

/// Read-only state shared by every page render.
pub struct Site {
    global: Value,
    index: Arc<PageIndex>,
    credits: Arc<Credits>,
    settings: RenderSettings,
}

impl Site {
    #[must_use]
    pub fn new(global: Value, index: PageIndex, settings: RenderSettings) -> Self {
        Self {
            global,
            index: Arc::new(index),
            credits: Arc::new(Credits::new()),
            settings,
        }
    }

    /// Credits listed by ` ```thanks-list ` blocks.
    #[must_use]
    pub fn with_credits(mut self, credits: Credits) -> Self {
        self.credits = Arc::new(credits);
        self
    }

    /// Split a bundle into shared site state and the pages to render.
    #[must_use]
    pub fn from_bundle(bundle: SiteBundle, settings: RenderSettings) -> (Self, Vec<PageInput>) {
        let credits = bundle.credits();
        let site = Self::new(bundle.global, bundle.index, settings).with_credits(credits);
        (site, bundle.pages)
    }

    #[must_use]
    pub fn index(&self) -> &PageIndex {
        &self.index
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render one page to a document and search record.
    ///
    /// # Errors
    ///
    /// Fails on unresolved page links (outside debug mode), invalid tables
    /// and unknown `about` types.
    pub fn render_page(&self, page: &PageInput) -> Result<RenderedPage, PageError> {
        let default_lang = self.settings.default_lang.as_str();
        let lang = page.lang.as_deref().unwrap_or(default_lang);
        let render_error = |source: RenderError| PageError::Render {
            page: page.id.clone(),
            source,
        };

        let data = Arc::new(if page.data.is_null() {
            self.global.clone()
        } else {
            deep_merge(self.global.clone(), page.data.clone())
        });
        let resolver: Arc<dyn LinkResolver> = Arc::new(
            PageResolver::new(Arc::clone(&self.index), page.id.as_str(), lang, default_lang)
                .with_debug(self.settings.debug),
        );

        let body = self
            .renderer::<HtmlBackend>(&data, &resolver)
            .with_link_resolver(Arc::clone(&resolver))
            .render_markdown(&page.body)
            .map_err(render_error)?;
        let text = self
            .renderer::<PlainBackend>(&data, &resolver)
            .render_markdown(&page.body)
            .map_err(render_error)?
            .content
            .trim()
            .to_owned();

        let title = page
            .front
            .title
            .clone()
            .unwrap_or_else(|| self.index.title(&page.id, lang, default_lang));

        let metabox = select_metabox(
            &page.front,
            &title,
            &MetaboxContext {
                lang,
                tag_group: &self.settings.tag_group,
                data: &data,
                resolver: Some(&resolver),
            },
        )
        .map_err(|source| PageError::Metabox {
            page: page.id.clone(),
            source,
        })?;

        let mut headings = body.toc;
        if !page.front.thanks.is_empty() {
            headings.push(thanks_heading(lang));
        }
        let outline = build_outline(&headings);
        let nav = PageNav::build(&self.index, &page.id, lang, default_lang);
        let url = page_url(&page.id, lang, default_lang);
        let canonical_url = self
            .settings
            .base_url
            .as_deref()
            .map(|base| format!("{}{url}", base.trim_end_matches('/')));
        let stub = page.front.stub || self.index.get(&page.id).is_some_and(|entry| entry.stub);

        let html = render_document(&DocumentData {
            lang,
            title: &title,
            description: &describe(&text),
            canonical_url: canonical_url.as_deref(),
            nav: &nav,
            metabox: metabox.as_ref().map(|m| &m.props),
            body_html: &body.content,
            thanks_html: &render_thanks(&page.front.thanks, lang),
            outline: &outline,
            stub,
        });

        let search = (!page.front.no_search).then(|| SearchDocument {
            lang: lang.to_owned(),
            text,
            path: url.clone(),
            title: title.clone(),
            keywords: metabox
                .map(|m| m.keywords)
                .unwrap_or_default()
                .into_iter()
                .chain(page.front.keywords.iter().cloned())
                .collect(),
        });

        tracing::debug!(page = %page.id, lang, searchable = search.is_some(), "rendered page");

        Ok(RenderedPage {
            id: page.id.clone(),
            lang: lang.to_owned(),
            url,
            title,
            html,
            search,
        })
    }

    /// Renderer with the page's fenced block processors installed.
    fn renderer<B: RenderBackend>(
        &self,
        data: &Arc<Value>,
        resolver: &Arc<dyn LinkResolver>,
    ) -> MarkdownRenderer<B> {
        MarkdownRenderer::<B>::new()
            .with_processor(
                DataTableProcessor::new(Arc::clone(data)).with_link_resolver(Arc::clone(resolver)),
            )
            .with_processor(ThanksListProcessor::new(Arc::clone(&self.credits)))
    }
}

/// Whitespace-collapsed prefix of `text` for the meta description.
fn describe(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(DESCRIPTION_LENGTH)
        .collect()
}
