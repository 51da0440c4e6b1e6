//! Data tables projected from page data.
//!
//! A table is declared in page content as a fenced block:
//!
//! ````markdown
//! ```datatable
//! dataPath: tags/h1
//! rowSortKey: key
//! linkCol: 0
//! columns:
//!   - name: Tag
//!     key: key
//!   - name: ID
//!     key: value/id
//!     format: code
//! ```
//! ````
//!
//! Rendering runs in four steps:
//! 1. [`gather_rows`]: resolve data paths, normalize mappings into
//!    `{key, value}` rows, sort, reverse and filter
//! 2. [`DataTable::row_id`]: assign each row its anchor id
//! 3. [`DataTable::build_index`]: jump index for large sorted tables
//! 4. [`format_cell`]: format each cell as HTML or plaintext
//!
//! [`DataTableProcessor`] plugs this into the markdown renderer.

mod cell;
mod error;
mod identity;
mod processor;
mod props;
mod render;
mod rows;

pub use cell::{CellFormat, format_cell};
pub use error::TableError;
pub use identity::{INDEX_MIN_ROWS, IndexEntry};
pub use processor::{DATATABLE_LANGUAGE, DataTableProcessor};
pub use props::{Column, DataPath, DataTableProps, LinkCol, LinkMode};
pub use render::DataTable;
pub use rows::gather_rows;
