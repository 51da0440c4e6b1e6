//! Colored status lines on stderr.

use std::fmt::Display;

use console::{Style, Term};

/// Status reporter for CLI commands.
///
/// Everything goes to stderr so `quire render` can stream the page to stdout.
pub(crate) struct Output {
    term: Term,
    label: Style,
    done: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().cyan().bold(),
            done: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    /// `   Bundle: site.json` style key/value line.
    pub(crate) fn field(&self, key: &str, value: impl Display) {
        self.line(&format!("{:>8}: {value}", self.label.apply_to(key)));
    }

    /// Start of a long-running step.
    pub(crate) fn step(&self, msg: &str) {
        self.line(&self.label.apply_to(msg).to_string());
    }

    pub(crate) fn done(&self, msg: &str) {
        self.line(&self.done.apply_to(msg).to_string());
    }

    pub(crate) fn warn(&self, msg: &str) {
        self.line(&format!("{} {msg}", self.warn.apply_to("warning:")));
    }

    /// One page failed; the run continues.
    pub(crate) fn page_failed(&self, err: impl Display) {
        self.line(&format!("{} {err}", self.fail.apply_to("failed:")));
    }

    /// The command failed.
    pub(crate) fn fatal(&self, err: impl Display) {
        self.line(&self.fail.apply_to(format!("Error: {err}")).to_string());
    }
}
