//! Shared helpers for rendering fragments.

use std::sync::Arc;

use pulldown_cmark::HeadingLevel;

use crate::html::HtmlBackend;
use crate::link::LinkResolver;
use crate::plain::PlainBackend;
use crate::renderer::{MarkdownRenderer, RenderError};

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Remove the `<p>` wrapper when `html` is exactly one paragraph.
///
/// # Examples
///
/// ```
/// use quire_renderer::strip_paragraph;
///
/// assert_eq!(strip_paragraph("<p>Hello</p>"), "Hello");
/// assert_eq!(strip_paragraph("<p>a</p><p>b</p>"), "<p>a</p><p>b</p>");
/// ```
#[must_use]
pub fn strip_paragraph(html: &str) -> &str {
    match html
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner,
        _ => html,
    }
}

/// Render a short markdown fragment to inline HTML.
///
/// Used for table cells and metabox text, where a single paragraph should not
/// introduce block spacing.
pub fn render_inline(
    markdown: &str,
    resolver: Option<Arc<dyn LinkResolver>>,
) -> Result<String, RenderError> {
    let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
    if let Some(resolver) = resolver {
        renderer = renderer.with_link_resolver(resolver);
    }
    let result = renderer.render_markdown(markdown)?;
    Ok(strip_paragraph(&result.content).to_owned())
}

/// Render a markdown fragment to trimmed plaintext.
pub fn render_plain(markdown: &str) -> Result<String, RenderError> {
    let result = MarkdownRenderer::<PlainBackend>::new().render_markdown(markdown)?;
    Ok(result.content.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_inline_strips_single_paragraph() {
        assert_eq!(
            render_inline("Some *emphasis*", None).unwrap(),
            "Some <em>emphasis</em>"
        );
    }

    #[test]
    fn test_render_inline_keeps_block_content() {
        let html = render_inline("- a\n- b", None).unwrap();
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_render_plain_trims() {
        assert_eq!(render_plain("  **Bold** text\n\n").unwrap(), "Bold text");
    }

    #[test]
    fn test_strip_paragraph_not_wrapped() {
        assert_eq!(strip_paragraph("plain"), "plain");
    }
}
