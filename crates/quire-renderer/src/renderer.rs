//! Generic markdown renderer with pluggable backend.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::backend::{Element, OutputMode, RenderBackend};
use crate::code_block::{
    CodeBlockProcessor, FencedBlock, ProcessError, ProcessResult, parse_fence_info,
};
use crate::link::{LinkResolver, ResolveError, split_page_ref};
use crate::state::{Capture, HeadingState, TableState, TocEntry};
use crate::util::heading_level_to_num;

/// Info string of an open fenced block.
struct Fence {
    language: Option<String>,
    attrs: HashMap<String, String>,
}

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered output in the backend's format.
    pub content: String,
    /// Every heading of the document, in order.
    pub toc: Vec<TocEntry>,
}

/// Error returned when a render cannot complete.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A `~page` link could not be resolved.
    #[error("unresolved page link `~{reference}`: {source}")]
    Link {
        /// The reference after the `~`.
        reference: String,
        #[source]
        source: ResolveError,
    },
    /// A fenced block processor failed.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Generic markdown renderer with pluggable backend.
///
/// Handles document structure (headings, code blocks, tables, images) and
/// delegates output to the [`RenderBackend`].
///
/// # Page links
///
/// Link destinations starting with `~` are page references. With a
/// [`LinkResolver`] installed, HTML output replaces them with the resolved
/// URL and a failed resolution aborts the render. Plaintext output drops link
/// targets and never resolves.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: Capture<Fence>,
    table: TableState,
    /// Alt text, keyed by image `(src, title)`.
    image: Capture<(String, String)>,
    heading: HeadingState,
    processors: Vec<Box<dyn CodeBlockProcessor>>,
    resolver: Option<Arc<dyn LinkResolver>>,
    /// Label appended to the open link when it is a placeholder.
    placeholder: Option<String>,
    code_block_index: usize,
    gfm: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: Capture::default(),
            table: TableState::default(),
            image: Capture::default(),
            heading: HeadingState::default(),
            processors: Vec::new(),
            resolver: None,
            placeholder: None,
            code_block_index: 0,
            gfm: true,
            _backend: PhantomData,
        }
    }

    /// Enable or disable GitHub Flavored Markdown (tables, strikethrough,
    /// task lists).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Add a fenced block processor.
    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Resolve `~page` links through `resolver`.
    #[must_use]
    pub fn with_link_resolver(mut self, resolver: Arc<dyn LinkResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Parser options for the configured markdown flavor.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Parse and render markdown text.
    pub fn render_markdown(&mut self, markdown: &str) -> Result<RenderResult, RenderError> {
        let parser = Parser::new_ext(markdown, self.parser_options());
        self.render(parser)
    }

    /// Render markdown events.
    pub fn render<'a, I>(&mut self, events: I) -> Result<RenderResult, RenderError>
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event)?;
        }

        Ok(RenderResult {
            content: std::mem::take(&mut self.output),
            toc: self.heading.take_toc(),
        })
    }

    /// Output buffer for inline content: the heading being captured, if any.
    fn sink(&mut self) -> &mut String {
        if self.heading.is_active() {
            self.heading.inner_buffer()
        } else {
            &mut self.output
        }
    }

    fn process_event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        match event {
            Event::Start(tag) => self.start_tag(tag)?,
            Event::End(tag) => self.end_tag(tag)?,
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => B::raw_html(&html, self.sink()),
            Event::SoftBreak => B::soft_break(self.sink()),
            Event::HardBreak => B::hard_break(self.sink()),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) -> Result<(), RenderError> {
        match tag {
            Tag::Paragraph => B::open(Element::Paragraph, &mut self.output),
            Tag::Heading { level, .. } => self.heading.start(heading_level_to_num(level)),
            Tag::BlockQuote(_) => B::open(Element::BlockQuote, &mut self.output),
            Tag::CodeBlock(kind) => {
                let fence = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => {
                        let (lang, attrs) = parse_fence_info(info);
                        Fence {
                            language: (!lang.is_empty()).then_some(lang),
                            attrs,
                        }
                    }
                    _ => Fence {
                        language: None,
                        attrs: HashMap::new(),
                    },
                };
                self.code.open(fence);
            }
            Tag::List(start) => B::open(
                Element::List {
                    ordered: start.is_some(),
                    start: start.unwrap_or(1),
                },
                &mut self.output,
            ),
            Tag::Item => B::open(Element::Item, &mut self.output),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => B::open(Element::DefinitionList, &mut self.output),
            Tag::DefinitionListTitle => B::open(Element::DefinitionTitle, &mut self.output),
            Tag::DefinitionListDefinition => B::open(Element::DefinitionBody, &mut self.output),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                B::open(Element::Table, &mut self.output);
            }
            Tag::TableHead => {
                self.table.start_head();
                B::open(Element::TableHead, &mut self.output);
            }
            Tag::TableRow => {
                self.table.start_row();
                B::open(Element::TableRow, &mut self.output);
            }
            Tag::TableCell => {
                let cell = self.current_cell();
                B::open(cell, &mut self.output);
            }
            Tag::Emphasis => B::open(Element::Emphasis, self.sink()),
            Tag::Strong => B::open(Element::Strong, self.sink()),
            Tag::Strikethrough => B::open(Element::Strikethrough, self.sink()),
            Tag::Superscript => B::open(Element::Superscript, self.sink()),
            Tag::Subscript => B::open(Element::Subscript, self.sink()),
            Tag::Link { dest_url, .. } => {
                let (href, placeholder) = self.link_target(&dest_url)?;
                if placeholder.is_some() {
                    B::placeholder_link_open(&href, self.sink());
                } else {
                    B::link_open(&href, self.sink());
                }
                self.placeholder = placeholder;
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image.open((dest_url.to_string(), title.to_string()));
            }
        }
        Ok(())
    }

    fn end_tag(&mut self, tag: TagEnd) -> Result<(), RenderError> {
        match tag {
            TagEnd::Paragraph => B::close(Element::Paragraph, &mut self.output),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.complete() {
                    B::heading(heading.level, &heading.id, &heading.inner, &mut self.output);
                }
            }
            TagEnd::BlockQuote(_) => B::close(Element::BlockQuote, &mut self.output),
            TagEnd::CodeBlock => self.finish_code_block()?,
            TagEnd::List(ordered) => {
                B::close(Element::List { ordered, start: 1 }, &mut self.output);
            }
            TagEnd::Item => B::close(Element::Item, &mut self.output),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => B::close(Element::DefinitionList, &mut self.output),
            TagEnd::DefinitionListTitle => B::close(Element::DefinitionTitle, &mut self.output),
            TagEnd::DefinitionListDefinition => {
                B::close(Element::DefinitionBody, &mut self.output);
            }
            TagEnd::Table => B::close(Element::Table, &mut self.output),
            TagEnd::TableHead => {
                B::close(Element::TableHead, &mut self.output);
                self.table.end_head();
            }
            TagEnd::TableRow => B::close(Element::TableRow, &mut self.output),
            TagEnd::TableCell => {
                let cell = self.current_cell();
                B::close(cell, &mut self.output);
                self.table.next_cell();
            }
            TagEnd::Emphasis => B::close(Element::Emphasis, self.sink()),
            TagEnd::Strong => B::close(Element::Strong, self.sink()),
            TagEnd::Strikethrough => B::close(Element::Strikethrough, self.sink()),
            TagEnd::Superscript => B::close(Element::Superscript, self.sink()),
            TagEnd::Subscript => B::close(Element::Subscript, self.sink()),
            TagEnd::Link => {
                if let Some(label) = self.placeholder.take() {
                    B::text(&format!(" {label}"), self.sink());
                }
                B::link_close(self.sink());
            }
            TagEnd::Image => {
                if let Some(((src, title), alt)) = self.image.close() {
                    B::image(&src, &alt, &title, self.sink());
                }
            }
        }
        Ok(())
    }

    fn current_cell(&self) -> Element {
        Element::TableCell {
            head: self.table.is_in_head(),
            align: self.table.current_alignment(),
        }
    }

    /// Resolve a link destination. Only `~` references in HTML mode change.
    ///
    /// Returns the href and, for placeholder links, the label to show.
    fn link_target(&self, dest: &str) -> Result<(String, Option<String>), RenderError> {
        let (Some(reference), Some(resolver), OutputMode::Html) =
            (dest.strip_prefix('~'), &self.resolver, B::MODE)
        else {
            return Ok((dest.to_owned(), None));
        };

        let (tail, heading) = split_page_ref(reference);
        resolver
            .resolve(tail, heading)
            .map(|link| {
                let label = link.unresolved.then_some(link.title);
                (link.url, label)
            })
            .map_err(|source| RenderError::Link {
                reference: reference.to_owned(),
                source,
            })
    }

    /// Offer the finished block to processors, else render it as code.
    fn finish_code_block(&mut self) -> Result<(), RenderError> {
        let Some((Fence { language, attrs }, content)) = self.code.close() else {
            return Ok(());
        };
        let index = self.code_block_index;
        self.code_block_index += 1;

        if let Some(language) = language.as_deref() {
            let block = FencedBlock {
                language,
                attrs: &attrs,
                source: &content,
                index,
            };
            for processor in &mut self.processors {
                let result = processor
                    .process(&block, B::MODE)
                    .map_err(|source| ProcessError {
                        language: language.to_owned(),
                        index,
                        source,
                    })?;
                if let ProcessResult::Inline(rendered) = result {
                    self.output.push_str(&rendered);
                    return Ok(());
                }
            }
        }

        B::code_block(language.as_deref(), &content, &mut self.output);
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.code.is_open() {
            self.code.push_str(text);
        } else if self.image.is_open() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            B::text(text, self.heading.inner_buffer());
        } else {
            B::text(text, &mut self.output);
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_open() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        B::inline_code(code, self.sink());
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_block::BoxError;
    use crate::link::PageLink;
    use crate::{HtmlBackend, PlainBackend};
    use pretty_assertions::assert_eq;

    fn render_html(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new()
            .render_markdown(markdown)
            .unwrap()
    }

    fn render_text(markdown: &str) -> String {
        MarkdownRenderer::<PlainBackend>::new()
            .render_markdown(markdown)
            .unwrap()
            .content
    }

    struct StaticResolver;

    impl LinkResolver for StaticResolver {
        fn resolve(&self, id_tail: &str, heading: Option<&str>) -> Result<PageLink, ResolveError> {
            if id_tail != "bitmap" {
                return Err(ResolveError::NotFound(id_tail.to_owned()));
            }
            let url = match heading {
                Some(h) => format!("/h1/tags/bitmap#{h}"),
                None => "/h1/tags/bitmap".to_owned(),
            };
            Ok(PageLink {
                url,
                title: "bitmap".to_owned(),
                unresolved: false,
            })
        }
    }

    struct UpperProcessor;

    impl CodeBlockProcessor for UpperProcessor {
        fn process(
            &mut self,
            block: &FencedBlock<'_>,
            mode: OutputMode,
        ) -> Result<ProcessResult, BoxError> {
            match (block.language, mode) {
                ("upper", OutputMode::Html) => Ok(ProcessResult::Inline(format!(
                    "<div>{}</div>",
                    block.source.trim().to_uppercase()
                ))),
                ("upper", OutputMode::Plain) => {
                    Ok(ProcessResult::Inline(block.source.to_uppercase()))
                }
                ("broken", _) => Err("bad block".into()),
                _ => Ok(ProcessResult::PassThrough),
            }
        }
    }

    #[test]
    fn test_html_basic_paragraph() {
        assert_eq!(render_html("Hello, world!").content, "<p>Hello, world!</p>");
    }

    #[test]
    fn test_html_heading_with_id() {
        let result = render_html("## Section Title");
        assert_eq!(
            result.content,
            r#"<h2 id="section-title">Section Title</h2>"#
        );
        assert_eq!(
            result.toc,
            vec![TocEntry {
                level: 2,
                title: "Section Title".to_owned(),
                id: "section-title".to_owned(),
            }]
        );
    }

    #[test]
    fn test_every_heading_is_recorded() {
        let result = render_html("# A\n\n## B\n\n# C");
        let levels: Vec<u8> = result.toc.iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![1, 2, 1]);
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let result = render_html("## FAQ\n\n## FAQ\n\n## FAQ");
        let ids: Vec<&str> = result.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["faq", "faq-1", "faq-2"]);
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render_html("## Install `tool`");
        assert!(result.content.contains("<code>tool</code>"));
        assert_eq!(result.toc[0].title, "Install tool");
    }

    #[test]
    fn test_heading_with_emphasis_keeps_markup() {
        let result = render_html("## A *b*");
        assert_eq!(result.content, r#"<h2 id="a-b">A <em>b</em></h2>"#);
    }

    #[test]
    fn test_html_code_block() {
        let result = render_html("```hsc\n(begin)\n```");
        assert!(result.content.contains(r#"class="language-hsc""#));
        assert!(result.content.contains("(begin)"));
    }

    #[test]
    fn test_html_table() {
        let result = render_html("| A | B |\n|:--|---|\n| 1 | 2 |");
        assert!(result.content.contains("<table><thead><tr>"));
        assert!(result.content.contains(r#"<th style="text-align:left">A</th>"#));
        assert!(result.content.contains("<td>2</td>"));
        assert!(result.content.ends_with("</tbody></table>"));
    }

    #[test]
    fn test_html_image() {
        let result = render_html("![Alt text](image.png)");
        assert!(
            result
                .content
                .contains(r#"<img src="image.png" alt="Alt text">"#)
        );
    }

    #[test]
    fn test_lists() {
        let result = render_html("- Item 1\n- Item 2");
        assert_eq!(result.content, "<ul><li>Item 1</li><li>Item 2</li></ul>");

        let result = render_html("3. Third\n4. Fourth");
        assert!(result.content.starts_with(r#"<ol start="3">"#));
    }

    #[test]
    fn test_task_list_html() {
        let result = render_html("- [ ] Open\n- [x] Done");
        assert!(result.content.contains(r#"<input type="checkbox" disabled>"#));
        assert!(
            result
                .content
                .contains(r#"<input type="checkbox" checked disabled>"#)
        );
    }

    #[test]
    fn test_plain_drops_markup() {
        let text = render_text("# Title\n\nSome **bold** and [a link](https://x.org).\n\n- one\n- two");
        assert_eq!(text, "Title\nSome bold and a link.\none\ntwo\n");
    }

    #[test]
    fn test_plain_table_rows() {
        let text = render_text("| A | B |\n|---|---|\n| 1 | 2 |");
        assert_eq!(text.trim(), "A B \n1 2");
    }

    #[test]
    fn test_page_link_resolved() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_link_resolver(Arc::new(StaticResolver))
            .render_markdown("See [bitmaps](~bitmap#fields).")
            .unwrap();
        assert_eq!(
            result.content,
            r#"<p>See <a href="/h1/tags/bitmap#fields">bitmaps</a>.</p>"#
        );
    }

    #[test]
    fn test_page_link_failure_aborts() {
        let err = MarkdownRenderer::<HtmlBackend>::new()
            .with_link_resolver(Arc::new(StaticResolver))
            .render_markdown("[x](~missing)")
            .unwrap_err();
        assert!(matches!(err, RenderError::Link { ref reference, .. } if reference == "missing"));
    }

    struct PlaceholderResolver;

    impl LinkResolver for PlaceholderResolver {
        fn resolve(&self, _id_tail: &str, _heading: Option<&str>) -> Result<PageLink, ResolveError> {
            Ok(PageLink {
                url: "#".to_owned(),
                title: "[Unresolved]".to_owned(),
                unresolved: true,
            })
        }
    }

    #[test]
    fn test_placeholder_link_is_marked() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_link_resolver(Arc::new(PlaceholderResolver))
            .render_markdown("See [x](~missing) and [y](https://example.com).")
            .unwrap();
        assert_eq!(
            result.content,
            r##"<p>See <a class="unresolved" href="#">x [Unresolved]</a> and <a href="https://example.com">y</a>.</p>"##
        );
    }

    #[test]
    fn test_page_link_not_resolved_in_plain_mode() {
        let result = MarkdownRenderer::<PlainBackend>::new()
            .with_link_resolver(Arc::new(StaticResolver))
            .render_markdown("[x](~missing)")
            .unwrap();
        assert_eq!(result.content, "x\n");
    }

    #[test]
    fn test_regular_links_untouched() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_link_resolver(Arc::new(StaticResolver))
            .render_markdown("[x](https://example.com)")
            .unwrap();
        assert!(result.content.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn test_processor_inline_per_mode() {
        let markdown = "```upper\nhello\n```";
        let html = MarkdownRenderer::<HtmlBackend>::new()
            .with_processor(UpperProcessor)
            .render_markdown(markdown)
            .unwrap();
        assert_eq!(html.content, "<div>HELLO</div>");

        let plain = MarkdownRenderer::<PlainBackend>::new()
            .with_processor(UpperProcessor)
            .render_markdown(markdown)
            .unwrap();
        assert_eq!(plain.content, "HELLO\n");
    }

    #[test]
    fn test_processor_passthrough() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_processor(UpperProcessor)
            .render_markdown("```rust\nfn main() {}\n```")
            .unwrap();
        assert!(result.content.contains(r#"class="language-rust""#));
    }

    #[test]
    fn test_processor_error_aborts() {
        let err = MarkdownRenderer::<HtmlBackend>::new()
            .with_processor(UpperProcessor)
            .render_markdown("```upper\na\n```\n\n```broken\nb\n```")
            .unwrap_err();
        let RenderError::Process(err) = err else {
            panic!("expected a processor error");
        };
        assert_eq!(err.language, "broken");
        assert_eq!(err.index, 1);
        assert_eq!(err.to_string(), "`broken` block #1: bad block");
    }

    #[test]
    fn test_code_block_without_language_skips_processors() {
        let result = MarkdownRenderer::<HtmlBackend>::new()
            .with_processor(UpperProcessor)
            .render_markdown("```\nplain text\n```")
            .unwrap();
        assert_eq!(result.content, "<pre><code>plain text\n</code></pre>");
    }
}
