//! Table definition schema.

use serde::Deserialize;
use serde_json::Value;

/// One data path or several.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DataPath {
    One(String),
    Many(Vec<String>),
}

impl DataPath {
    /// The configured paths, in source order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        match self {
            Self::One(path) => std::slice::from_ref(path),
            Self::Many(paths) => paths,
        }
    }
}

/// `linkCol` as written: a flag or a column index.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LinkCol {
    Flag(bool),
    Index(usize),
}

/// How rows are made linkable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkMode {
    /// Rows carry ids but nothing links to them.
    None,
    /// An extra leading cell holds a jump anchor.
    JumpCell,
    /// The content of this column is wrapped in a jump anchor.
    Column(usize),
}

/// A table column.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Column {
    /// Header text.
    pub name: String,
    /// Path to the cell value within a row.
    pub key: String,
    /// Inline CSS for the column's cells.
    #[serde(default)]
    pub style: Option<String>,
    /// Format tag; `text` when absent.
    #[serde(default)]
    pub format: Option<String>,
}

/// Table definition as declared in page content.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DataTableProps {
    /// Where rows come from in the page data.
    pub data_path: DataPath,
    /// Explicit table id; derived from the data paths otherwise.
    #[serde(default)]
    pub id: Option<String>,
    /// Row path to sort by.
    #[serde(default)]
    pub row_sort_key: Option<String>,
    /// Reverse rows after sorting.
    #[serde(default)]
    pub row_sort_reverse: bool,
    /// Row path to filter on.
    #[serde(default)]
    pub row_filter_key: Option<String>,
    /// Value the filter field must equal or contain.
    #[serde(default)]
    pub row_filter_value: Option<Value>,
    /// Invert the filter.
    #[serde(default)]
    pub row_filter_not: bool,
    #[serde(default)]
    pub link_col: Option<LinkCol>,
    /// Row path used to build content-based row ids.
    #[serde(default)]
    pub link_slug_key: Option<String>,
    #[serde(default)]
    pub no_clear: bool,
    #[serde(default)]
    pub wrap_pre: bool,
    pub columns: Vec<Column>,
}

impl DataTableProps {
    /// Parse a YAML table definition.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    #[must_use]
    pub fn link_mode(&self) -> LinkMode {
        match self.link_col {
            None | Some(LinkCol::Flag(false)) => LinkMode::None,
            Some(LinkCol::Flag(true)) => LinkMode::JumpCell,
            Some(LinkCol::Index(index)) => LinkMode::Column(index),
        }
    }

    /// Explicit id, else the last segment of each data path joined by `-`.
    #[must_use]
    pub fn table_id(&self) -> String {
        if let Some(id) = &self.id {
            return id.clone();
        }
        self.data_path
            .paths()
            .iter()
            .map(|path| quire_data::last_segment(path))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Row path whose value names each row, if rows are content-addressed.
    ///
    /// A jump cell without `linkSlugKey` falls back to positional ids; a link
    /// column defaults to its own key.
    #[must_use]
    pub fn slug_key(&self) -> Option<&str> {
        match self.link_mode() {
            LinkMode::None => None,
            LinkMode::JumpCell => self.link_slug_key.as_deref(),
            LinkMode::Column(index) => self
                .link_slug_key
                .as_deref()
                .or_else(|| self.columns.get(index).map(|c| c.key.as_str())),
        }
    }

    /// CSS classes for the table element.
    #[must_use]
    pub fn table_classes(&self) -> String {
        [(self.no_clear, "no-clear"), (self.wrap_pre, "wrap-pre")]
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, class)| *class)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
