//! Table error type.

use quire_renderer::RenderError;

/// Error returned when a table cannot be built or rendered.
///
/// All variants are configuration errors in page content; none are
/// recovered from.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The table definition is not valid YAML for [`DataTableProps`](crate::DataTableProps).
    #[error("invalid table definition: {0}")]
    Props(#[from] serde_yaml::Error),
    /// The table declares no columns.
    #[error("table has no columns")]
    NoColumns,
    /// `linkCol` points past the last column.
    #[error("linkCol {index} is out of range for {count} columns")]
    LinkColumnOutOfRange {
        /// Configured link column.
        index: usize,
        /// Number of declared columns.
        count: usize,
    },
    /// A column uses a format tag that does not exist.
    #[error("unknown cell format `{0}`")]
    UnknownFormat(String),
    /// Markdown in a `text` cell failed to render.
    #[error("failed to render cell: {0}")]
    Markdown(#[from] RenderError),
}
