//! HTML backend for markdown rendering.

use std::fmt::Write;

use pulldown_cmark::Alignment;

use crate::backend::{Element, OutputMode, RenderBackend};
use crate::state::escape_html;

/// HTML render backend.
///
/// Produces semantic HTML5: `<pre><code class="language-x">` for code
/// blocks, `id` attributes on headings and `style="text-align:..."` on
/// aligned table cells.
pub struct HtmlBackend;

fn align_style(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => r#" style="text-align:left""#,
        Alignment::Center => r#" style="text-align:center""#,
        Alignment::Right => r#" style="text-align:right""#,
        Alignment::None => "",
    }
}

impl RenderBackend for HtmlBackend {
    const MODE: OutputMode = OutputMode::Html;

    fn open(element: Element, out: &mut String) {
        match element {
            Element::Paragraph => out.push_str("<p>"),
            Element::BlockQuote => out.push_str("<blockquote>"),
            Element::List {
                ordered: true,
                start: 1,
            } => out.push_str("<ol>"),
            Element::List {
                ordered: true,
                start,
            } => {
                let _ = write!(out, r#"<ol start="{start}">"#);
            }
            Element::List { ordered: false, .. } => out.push_str("<ul>"),
            Element::Item => out.push_str("<li>"),
            Element::DefinitionList => out.push_str("<dl>"),
            Element::DefinitionTitle => out.push_str("<dt>"),
            Element::DefinitionBody => out.push_str("<dd>"),
            Element::Table => out.push_str("<table>"),
            Element::TableHead => out.push_str("<thead><tr>"),
            Element::TableRow => out.push_str("<tr>"),
            Element::TableCell { head, align } => {
                let tag = if head { "th" } else { "td" };
                let _ = write!(out, "<{tag}{}>", align_style(align));
            }
            Element::Emphasis => out.push_str("<em>"),
            Element::Strong => out.push_str("<strong>"),
            Element::Strikethrough => out.push_str("<s>"),
            Element::Superscript => out.push_str("<sup>"),
            Element::Subscript => out.push_str("<sub>"),
        }
    }

    fn close(element: Element, out: &mut String) {
        out.push_str(match element {
            Element::Paragraph => "</p>",
            Element::BlockQuote => "</blockquote>",
            Element::List { ordered: true, .. } => "</ol>",
            Element::List { ordered: false, .. } => "</ul>",
            Element::Item => "</li>",
            Element::DefinitionList => "</dl>",
            Element::DefinitionTitle => "</dt>",
            Element::DefinitionBody => "</dd>",
            Element::Table => "</tbody></table>",
            Element::TableHead => "</tr></thead><tbody>",
            Element::TableRow => "</tr>",
            Element::TableCell { head: true, .. } => "</th>",
            Element::TableCell { head: false, .. } => "</td>",
            Element::Emphasis => "</em>",
            Element::Strong => "</strong>",
            Element::Strikethrough => "</s>",
            Element::Superscript => "</sup>",
            Element::Subscript => "</sub>",
        });
    }

    fn text(text: &str, out: &mut String) {
        out.push_str(&escape_html(text));
    }

    fn inline_code(code: &str, out: &mut String) {
        let _ = write!(out, "<code>{}</code>", escape_html(code));
    }

    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        match lang {
            Some(lang) => {
                let _ = write!(
                    out,
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    escape_html(content)
                );
            }
            None => {
                let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
            }
        }
    }

    fn heading(level: u8, id: &str, inner: &str, out: &mut String) {
        let _ = write!(
            out,
            r#"<h{level} id="{}">{}</h{level}>"#,
            escape_html(id),
            inner.trim()
        );
    }

    fn link_open(href: &str, out: &mut String) {
        let _ = write!(out, r#"<a href="{}">"#, escape_html(href));
    }

    fn placeholder_link_open(href: &str, out: &mut String) {
        let _ = write!(out, r#"<a class="unresolved" href="{}">"#, escape_html(href));
    }

    fn link_close(out: &mut String) {
        out.push_str("</a>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        let _ = write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        );
    }

    fn raw_html(html: &str, out: &mut String) {
        out.push_str(html);
    }

    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        HtmlBackend::code_block(Some("hsc"), "(begin)", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-hsc">(begin)</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_escapes_content() {
        let mut out = String::new();
        HtmlBackend::code_block(None, "a < b", &mut out);
        assert_eq!(out, "<pre><code>a &lt; b</code></pre>");
    }

    #[test]
    fn test_ordered_list_with_start() {
        let mut out = String::new();
        let list = Element::List {
            ordered: true,
            start: 3,
        };
        HtmlBackend::open(list, &mut out);
        HtmlBackend::close(list, &mut out);
        assert_eq!(out, r#"<ol start="3"></ol>"#);
    }

    #[test]
    fn test_aligned_head_cell() {
        let mut out = String::new();
        let cell = Element::TableCell {
            head: true,
            align: Alignment::Center,
        };
        HtmlBackend::open(cell, &mut out);
        HtmlBackend::close(cell, &mut out);
        assert_eq!(out, r#"<th style="text-align:center"></th>"#);
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        HtmlBackend::image("a.png", "Alt", "Title", &mut out);
        assert_eq!(out, r#"<img src="a.png" title="Title" alt="Alt">"#);
    }

    #[test]
    fn test_heading_trims_inner() {
        let mut out = String::new();
        HtmlBackend::heading(2, "intro", " Intro ", &mut out);
        assert_eq!(out, r#"<h2 id="intro">Intro</h2>"#);
    }
}
