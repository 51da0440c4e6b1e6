//! Render backend trait for format-specific output.
//!
//! The renderer tracks document structure (headings, code blocks, tables,
//! image alt text); backends decide what each construct looks like in the
//! output format.

use pulldown_cmark::Alignment;

/// Output format produced by a backend.
///
/// Passed to [`CodeBlockProcessor`](crate::CodeBlockProcessor)s so a single
/// processor can serve both the page body and the search text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// HTML fragment.
    Html,
    /// Plaintext for search indexing.
    Plain,
}

/// Structural element opened and closed around inline content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element {
    Paragraph,
    BlockQuote,
    /// List; `start` is the first number of an ordered list.
    List { ordered: bool, start: u64 },
    Item,
    DefinitionList,
    DefinitionTitle,
    DefinitionBody,
    Table,
    TableHead,
    TableRow,
    TableCell { head: bool, align: Alignment },
    Emphasis,
    Strong,
    Strikethrough,
    Superscript,
    Subscript,
}

/// Backend trait for format-specific rendering operations.
pub trait RenderBackend {
    /// Output format of this backend.
    const MODE: OutputMode;

    /// Write the opening of an element.
    fn open(element: Element, out: &mut String);

    /// Write the closing of an element.
    fn close(element: Element, out: &mut String);

    /// Write a run of text.
    fn text(text: &str, out: &mut String);

    /// Write inline code.
    fn inline_code(code: &str, out: &mut String);

    /// Write a fenced or indented code block.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Write a complete heading. `inner` was produced by this backend.
    fn heading(level: u8, id: &str, inner: &str, out: &mut String);

    /// Write the opening of a link.
    fn link_open(href: &str, out: &mut String);

    /// Write the opening of a placeholder for a page link that did not
    /// resolve.
    fn placeholder_link_open(href: &str, out: &mut String) {
        Self::link_open(href, out);
    }

    /// Write the closing of a link.
    fn link_close(out: &mut String);

    /// Write an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Write raw HTML found in the source.
    fn raw_html(html: &str, out: &mut String);

    /// Write a soft line break.
    fn soft_break(out: &mut String) {
        out.push('\n');
    }

    /// Write a hard line break.
    fn hard_break(out: &mut String);

    /// Write a horizontal rule.
    fn horizontal_rule(out: &mut String);

    /// Write a task list marker.
    fn task_list_marker(checked: bool, out: &mut String);
}
