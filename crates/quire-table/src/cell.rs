//! Cell formatting.

use std::fmt::Write;
use std::str::FromStr;
use std::sync::Arc;

use quire_data::{display, opt_truthy};
use quire_renderer::{
    HtmlBackend, LinkResolver, OutputMode, PageLink, RenderBackend, escape_html, render_inline,
    render_plain, split_page_ref,
};
use serde_json::Value;

use crate::error::TableError;

/// How a column's values are presented.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CellFormat {
    /// Inline markdown.
    #[default]
    Text,
    /// Verbatim inline code.
    Code,
    /// Page reference shown with the target's title. `anchor` is an alias.
    PageLink,
    /// Page reference shown with the reference text itself.
    PageLinkRaw,
    /// Fenced code block with an optional language.
    CodeBlock(Option<String>),
}

impl FromStr for CellFormat {
    type Err = TableError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "text" => Ok(Self::Text),
            "code" => Ok(Self::Code),
            "anchor" | "pageLink" => Ok(Self::PageLink),
            "pageLinkRaw" => Ok(Self::PageLinkRaw),
            "codeblock" => Ok(Self::CodeBlock(None)),
            _ => match tag.strip_prefix("codeblock-") {
                Some(lang) if !lang.is_empty() => Ok(Self::CodeBlock(Some(lang.to_owned()))),
                _ => Err(TableError::UnknownFormat(tag.to_owned())),
            },
        }
    }
}

/// Format one cell.
///
/// Falsy content is always empty. Page references that fail to resolve fall
/// back to the raw content.
///
/// # Errors
///
/// Returns [`TableError::Markdown`] when a `text` cell fails to render.
pub fn format_cell(
    format: &CellFormat,
    content: Option<&Value>,
    mode: OutputMode,
    resolver: Option<&Arc<dyn LinkResolver>>,
) -> Result<String, TableError> {
    if !opt_truthy(content) {
        return Ok(String::new());
    }
    let text = content.map(display).unwrap_or_default();

    let formatted = match (format, mode) {
        (CellFormat::Text, OutputMode::Html) => render_inline(&text, resolver.cloned())?,
        (CellFormat::Text, OutputMode::Plain) => render_plain(&text)?,
        (CellFormat::Code, OutputMode::Html) => {
            let mut out = String::new();
            HtmlBackend::inline_code(&text, &mut out);
            out
        }
        (CellFormat::PageLink, OutputMode::Html) => match resolve(&text, resolver) {
            Some(link) => anchor(&link.url, &link.title),
            None => escape_html(&text),
        },
        (CellFormat::PageLink, OutputMode::Plain) => {
            resolve(&text, resolver).map_or(text, |link| link.title)
        }
        (CellFormat::PageLinkRaw, OutputMode::Html) => match resolve(&text, resolver) {
            Some(link) => anchor(&link.url, &text),
            None => escape_html(&text),
        },
        (CellFormat::CodeBlock(lang), OutputMode::Html) => {
            let mut out = String::new();
            HtmlBackend::code_block(lang.as_deref(), &text, &mut out);
            out
        }
        (CellFormat::CodeBlock(_), OutputMode::Plain) => text + "\n",
        (CellFormat::Code | CellFormat::PageLinkRaw, OutputMode::Plain) => text,
    };
    Ok(formatted)
}

fn resolve(reference: &str, resolver: Option<&Arc<dyn LinkResolver>>) -> Option<PageLink> {
    let resolver = resolver?;
    let (tail, heading) = split_page_ref(reference);
    match resolver.resolve(tail, heading) {
        Ok(link) => Some(link),
        Err(e) => {
            tracing::debug!(reference, error = %e, "cell link unresolved, using raw text");
            None
        }
    }
}

fn anchor(url: &str, text: &str) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<a href="{}">{}</a>"#,
        escape_html(url),
        escape_html(text)
    );
    out
}
