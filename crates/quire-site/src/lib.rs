//! Page rendering orchestration for quire.
//!
//! This crate turns page inputs (front matter, markdown body, page-local data)
//! into complete HTML documents and search records:
//! - [`Site`]: shared read-only state (global data, [`PageIndex`], credits)
//!   and the [`Site::render_page`] entry point
//! - [`PageResolver`]: resolves `~page` references against the index
//! - [`build_outline`]: nests a flat heading list into a [`NavHeading`] tree
//! - [`select_metabox`]: derives the summary panel from an `about` directive
//!
//! Rendering is pure and synchronous. A [`Site`] is `Sync`, so pages can be
//! rendered in parallel.
//!
//! # Quick Start
//!
//! ```
//! use quire_site::{PageIndex, PageInput, RenderSettings, Site};
//!
//! let site = Site::new(
//!     serde_json::Value::Null,
//!     PageIndex::default(),
//!     RenderSettings::default(),
//! );
//! let page = PageInput::new("/guide", "# Welcome\n\nHello.");
//! let rendered = site.render_page(&page).unwrap();
//! assert!(rendered.html.starts_with("<!DOCTYPE html>"));
//! assert!(rendered.search.is_some());
//! ```

mod error;
mod i18n;
mod metabox;
mod model;
mod nav;
mod outline;
mod page;
mod resolver;
mod search;
mod template;
mod thanks;

pub use error::PageError;
pub use i18n::Label;
pub use metabox::{
    AboutKind, Metabox, MetaboxContext, MetaboxError, MetaboxProps, MetaboxSection, select_metabox,
};
pub use model::{Credits, FrontMatter, PageEntry, PageIndex, PageInput, SiteBundle, Thanks};
pub use nav::{LanguageLink, NavLink, PageNav, page_url};
pub use outline::{NavHeading, build_outline};
pub use page::{RenderSettings, RenderedPage, Site};
pub use resolver::PageResolver;
pub use search::SearchDocument;
pub use thanks::{THANKS_ID, THANKS_LIST_LANGUAGE, ThanksListProcessor};

pub use quire_renderer::TocEntry;
