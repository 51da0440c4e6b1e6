//! Plaintext backend for search text extraction.

use crate::backend::{Element, OutputMode, RenderBackend};

/// Plaintext render backend.
///
/// Drops all markup. Block elements end on a line break, table cells are
/// separated by spaces and images contribute their alt text.
pub struct PlainBackend;

/// Start a new line unless the output is empty or already on one.
fn line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

impl RenderBackend for PlainBackend {
    const MODE: OutputMode = OutputMode::Plain;

    fn open(element: Element, out: &mut String) {
        if matches!(
            element,
            Element::Paragraph
                | Element::BlockQuote
                | Element::List { .. }
                | Element::Item
                | Element::Table
        ) {
            line_break(out);
        }
    }

    fn close(element: Element, out: &mut String) {
        match element {
            Element::TableCell { .. } => out.push(' '),
            Element::Paragraph
            | Element::BlockQuote
            | Element::Item
            | Element::DefinitionTitle
            | Element::DefinitionBody
            | Element::TableHead
            | Element::TableRow => line_break(out),
            _ => {}
        }
    }

    fn text(text: &str, out: &mut String) {
        out.push_str(text);
    }

    fn inline_code(code: &str, out: &mut String) {
        out.push_str(code);
    }

    fn code_block(_lang: Option<&str>, content: &str, out: &mut String) {
        line_break(out);
        out.push_str(content);
        line_break(out);
    }

    fn heading(_level: u8, _id: &str, inner: &str, out: &mut String) {
        line_break(out);
        out.push_str(inner.trim());
        out.push('\n');
    }

    fn link_open(_href: &str, _out: &mut String) {}

    fn link_close(_out: &mut String) {}

    fn image(_src: &str, alt: &str, _title: &str, out: &mut String) {
        out.push_str(alt);
    }

    fn raw_html(_html: &str, _out: &mut String) {}

    fn soft_break(out: &mut String) {
        out.push(' ');
    }

    fn hard_break(out: &mut String) {
        out.push('\n');
    }

    fn horizontal_rule(out: &mut String) {
        line_break(out);
    }

    fn task_list_marker(_checked: bool, _out: &mut String) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_ends_on_newline() {
        let mut out = String::from("intro");
        PlainBackend::code_block(Some("hsc"), "(begin)", &mut out);
        assert_eq!(out, "intro\n(begin)\n");
    }

    #[test]
    fn test_cells_are_space_separated() {
        let mut out = String::new();
        let cell = Element::TableCell {
            head: false,
            align: pulldown_cmark::Alignment::None,
        };
        PlainBackend::text("a", &mut out);
        PlainBackend::close(cell, &mut out);
        PlainBackend::text("b", &mut out);
        PlainBackend::close(cell, &mut out);
        PlainBackend::close(Element::TableRow, &mut out);
        assert_eq!(out, "a b \n");
    }
}
