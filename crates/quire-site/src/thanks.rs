//! Acknowledgements and site-wide credits.

use std::fmt::Write;
use std::sync::Arc;

use quire_renderer::{
    BoxError, CodeBlockProcessor, FencedBlock, OutputMode, ProcessResult, TocEntry, escape_html,
};

use crate::i18n::Label;
use crate::model::{Credits, Thanks};

/// Anchor id of the acknowledgements section.
pub const THANKS_ID: &str = "acknowledgements";

/// Fence language handled by [`ThanksListProcessor`].
pub const THANKS_LIST_LANGUAGE: &str = "thanks-list";

/// Outline entry for the acknowledgements section.
pub(crate) fn thanks_heading(lang: &str) -> TocEntry {
    TocEntry {
        level: 1,
        title: Label::Acknowledgements.text(lang).to_owned(),
        id: THANKS_ID.to_owned(),
    }
}

/// HTML for a page's acknowledgements section. Empty when there are no thanks.
pub(crate) fn render_thanks(thanks: &Thanks, lang: &str) -> String {
    if thanks.is_empty() {
        return String::new();
    }
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<section class="thanks"><h1 id="{THANKS_ID}">{}</h1><ul>"#,
        Label::Acknowledgements.text(lang)
    );
    for (person, contribution) in thanks {
        let _ = write!(
            html,
            "<li><strong>{}</strong>: {}</li>",
            escape_html(person),
            escape_html(contribution)
        );
    }
    html.push_str("</ul></section>");
    html
}

/// Replaces ` ```thanks-list ` blocks with the site-wide credits.
pub struct ThanksListProcessor {
    credits: Arc<Credits>,
}

impl ThanksListProcessor {
    #[must_use]
    pub fn new(credits: Arc<Credits>) -> Self {
        Self { credits }
    }
}

impl CodeBlockProcessor for ThanksListProcessor {
    fn process(
        &mut self,
        block: &FencedBlock<'_>,
        mode: OutputMode,
    ) -> Result<ProcessResult, BoxError> {
        if block.language != THANKS_LIST_LANGUAGE {
            return Ok(ProcessResult::PassThrough);
        }
        let mut out = String::new();
        match mode {
            OutputMode::Html => {
                out.push_str(r#"<ul class="thanks-list">"#);
                for (person, contributions) in self.credits.iter() {
                    let _ = write!(
                        out,
                        "<li><strong>{}</strong>: {}</li>",
                        escape_html(person),
                        escape_html(&contributions.join(", "))
                    );
                }
                out.push_str("</ul>");
            }
            OutputMode::Plain => {
                for (person, contributions) in self.credits.iter() {
                    let _ = writeln!(out, "{person}: {}", contributions.join(", "));
                }
            }
        }
        Ok(ProcessResult::Inline(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quire_renderer::{HtmlBackend, MarkdownRenderer, PlainBackend};

    fn credits() -> Arc<Credits> {
        let mut credits = Credits::new();
        credits.insert("Ana".into(), vec!["Research".into(), "Editing".into()]);
        credits.insert("Bo & Co".into(), vec!["Images".into()]);
        Arc::new(credits)
    }

    #[test]
    fn test_render_thanks_section() {
        let mut thanks = Thanks::new();
        thanks.insert("Ana".into(), "Research <3".into());
        assert_eq!(
            render_thanks(&thanks, "en"),
            r#"<section class="thanks"><h1 id="acknowledgements">Acknowledgements</h1><ul><li><strong>Ana</strong>: Research &lt;3</li></ul></section>"#
        );
        assert_eq!(render_thanks(&Thanks::new(), "en"), "");
    }

    #[test]
    fn test_thanks_heading_localized() {
        assert_eq!(thanks_heading("es").title, "Agradecimientos");
        assert_eq!(thanks_heading("es").id, THANKS_ID);
    }

    #[test]
    fn test_thanks_list_html() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_processor(ThanksListProcessor::new(credits()))
            .render_markdown("```thanks-list\n```")
            .unwrap();
        assert_eq!(
            result.content,
            r#"<ul class="thanks-list"><li><strong>Ana</strong>: Research, Editing</li><li><strong>Bo &amp; Co</strong>: Images</li></ul>"#
        );
    }

    #[test]
    fn test_thanks_list_plain() {
        let result = MarkdownRenderer::<PlainBackend>::new()
            .with_processor(ThanksListProcessor::new(credits()))
            .render_markdown("```thanks-list\n```")
            .unwrap();
        assert_eq!(result.content, "Ana: Research, Editing\nBo & Co: Images\n");
    }
}
