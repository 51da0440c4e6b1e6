//! Event-tracking state shared by all backends.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Raw text collected inside a container, such as a code block body or the
/// alt text of an image. `M` is whatever the opening tag carried.
pub(crate) struct Capture<M> {
    open: Option<M>,
    buffer: String,
}

impl<M> Default for Capture<M> {
    fn default() -> Self {
        Self {
            open: None,
            buffer: String::new(),
        }
    }
}

impl<M> Capture<M> {
    pub(crate) fn open(&mut self, meta: M) {
        self.open = Some(meta);
        self.buffer.clear();
    }

    /// Close the capture. `None` if it was not open.
    pub(crate) fn close(&mut self) -> Option<(M, String)> {
        let meta = self.open.take()?;
        Some((meta, std::mem::take(&mut self.buffer)))
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Position inside a table.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    pub(crate) fn current_alignment(&self) -> Alignment {
        self.alignments
            .get(self.cell_index)
            .copied()
            .unwrap_or(Alignment::None)
    }
}

/// A heading discovered while rendering, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text without markup.
    pub title: String,
    /// Anchor id, unique within the document.
    pub id: String,
}

/// A heading that has been fully captured.
pub(crate) struct CompletedHeading {
    pub(crate) level: u8,
    pub(crate) id: String,
    pub(crate) inner: String,
}

/// Heading capture and id allocation.
#[derive(Default)]
pub(crate) struct HeadingState {
    current_level: Option<u8>,
    /// Plain text of the current heading (for the entry title and slug).
    text: String,
    /// Backend output of the current heading's inline content.
    inner: String,
    toc: Vec<TocEntry>,
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.inner.clear();
    }

    /// Finish the current heading and record its entry.
    pub(crate) fn complete(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let title = text.trim().to_owned();
        let id = self.allocate_id(&title);

        self.toc.push(TocEntry {
            level,
            title,
            id: id.clone(),
        });

        Some(CompletedHeading {
            level,
            id,
            inner: std::mem::take(&mut self.inner),
        })
    }

    /// `base`, `base-1`, `base-2`, ... for repeated headings.
    fn allocate_id(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn inner_buffer(&mut self) -> &mut String {
        &mut self.inner
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Convert text to a URL-safe slug.
///
/// Lowercases ASCII alphanumerics, collapses whitespace, dashes and
/// underscores into single dashes and drops everything else. Distinct inputs
/// may collide; callers that need uniqueness must arrange it themselves.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }
    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
