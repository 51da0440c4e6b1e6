//! Markdown renderer with HTML and plaintext backends.
//!
//! This crate provides a generic [`MarkdownRenderer`] that drives
//! `pulldown-cmark` events into a [`RenderBackend`]:
//! - [`HtmlBackend`]: semantic HTML5 for page bodies and table cells
//! - [`PlainBackend`]: whitespace-separated text for search records and previews
//!
//! Both backends share heading capture (unique ids plus a [`TocEntry`] list),
//! fenced block processors ([`CodeBlockProcessor`]) and page-reference links
//! (`[text](~page#heading)`, resolved through a [`LinkResolver`]).
//!
//! # Example
//!
//! ```
//! use quire_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new()
//!     .render_markdown("# Hello\n\n**Bold** text")
//!     .unwrap();
//! assert!(result.content.contains("<strong>Bold</strong>"));
//! assert_eq!(result.toc[0].id, "hello");
//! ```

mod backend;
mod code_block;
mod html;
mod link;
mod plain;
mod renderer;
mod state;
mod util;

pub use backend::{Element, OutputMode, RenderBackend};
pub use code_block::{BoxError, CodeBlockProcessor, FencedBlock, ProcessError, ProcessResult};
pub use html::HtmlBackend;
pub use link::{LinkResolver, PageLink, ResolveError, split_page_ref};
pub use plain::PlainBackend;
pub use renderer::{MarkdownRenderer, RenderError, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
pub use util::{render_inline, render_plain, strip_paragraph};
