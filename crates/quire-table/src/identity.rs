//! Row anchor ids and the jump index.

use std::borrow::Cow;

use quire_data::{display, lookup};
use quire_renderer::slugify;
use serde_json::Value;

use crate::props::{DataTableProps, LinkMode};

/// Tables shorter than this never get a jump index.
pub const INDEX_MIN_ROWS: usize = 100;

/// One entry of the jump index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    /// Upper-cased first character of the sort key.
    pub label: String,
    /// Id of the first row starting with `label`.
    pub row_id: String,
}

/// Anchor id for the row at `index` (zero-based).
///
/// Positional ids are only stable within one render. Content-addressed ids
/// are not de-duplicated.
pub(crate) fn row_id(table_id: &str, props: &DataTableProps, row: &Value, index: usize) -> String {
    match props.slug_key() {
        Some(key) => {
            let value = lookup(row, key).map(display).unwrap_or_default();
            slugify(&format!("{table_id}-{value}"))
        }
        None => format!("{table_id}-{}", index + 1),
    }
}

/// Build the jump index for rows already in display order.
///
/// Assumes rows are sorted alphabetically by the sort key; unsorted rows
/// produce a noisy index.
pub(crate) fn build_index(
    table_id: &str,
    props: &DataTableProps,
    rows: &[Cow<'_, Value>],
) -> Vec<IndexEntry> {
    let Some(sort_key) = &props.row_sort_key else {
        return Vec::new();
    };
    if props.link_mode() == LinkMode::None || rows.len() < INDEX_MIN_ROWS {
        return Vec::new();
    }

    let mut entries = Vec::new();
    let mut previous: Option<String> = None;
    for (index, row) in rows.iter().enumerate() {
        let initial = lookup(row, sort_key)
            .map(display)
            .and_then(|text| text.chars().next())
            .map(|c| c.to_uppercase().collect::<String>());
        let Some(label) = initial else {
            continue;
        };
        if previous.as_ref() != Some(&label) {
            entries.push(IndexEntry {
                label: label.clone(),
                row_id: row_id(table_id, props, row, index),
            });
            previous = Some(label);
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn props(yaml: &str) -> DataTableProps {
        DataTableProps::from_yaml(yaml).unwrap()
    }

    fn rows(count: usize) -> Vec<Cow<'static, Value>> {
        (0..count)
            .map(|i| {
                let letter = char::from(b'a' + u8::try_from(i / 40).unwrap());
                Cow::Owned(json!({"name": format!("{letter}{i:03}")}))
            })
            .collect()
    }

    #[test]
    fn test_positional_id_without_link_column() {
        let p = props("dataPath: t\ncolumns: [{name: N, key: name}]");
        assert_eq!(row_id("t", &p, &json!({"name": "x"}), 4), "t-5");
    }

    #[test]
    fn test_jump_cell_without_slug_key_is_positional() {
        let p = props("dataPath: t\nlinkCol: true\ncolumns: [{name: N, key: name}]");
        assert_eq!(row_id("t", &p, &json!({"name": "x"}), 0), "t-1");
    }

    #[test]
    fn test_link_column_slugs_its_key() {
        let p = props("dataPath: t\nlinkCol: 0\ncolumns: [{name: N, key: name}]");
        assert_eq!(
            row_id("tags", &p, &json!({"name": "Bitmap Data"}), 0),
            "tags-bitmap-data"
        );
    }

    #[test]
    fn test_explicit_slug_key() {
        let p = props(
            "dataPath: t\nlinkCol: true\nlinkSlugKey: value/id\ncolumns: [{name: N, key: key}]",
        );
        let row = json!({"key": "bitmap", "value": {"id": "bitm"}});
        assert_eq!(row_id("h1", &p, &row, 7), "h1-bitm");
    }

    #[test]
    fn test_index_below_threshold_is_empty() {
        let p = props("dataPath: t\nrowSortKey: name\nlinkCol: 0\ncolumns: [{name: N, key: name}]");
        assert!(build_index("t", &p, &rows(INDEX_MIN_ROWS - 1)).is_empty());
    }

    #[test]
    fn test_index_at_threshold() {
        let p = props("dataPath: t\nrowSortKey: name\nlinkCol: 0\ncolumns: [{name: N, key: name}]");
        let index = build_index("t", &p, &rows(INDEX_MIN_ROWS));
        assert_eq!(
            index,
            vec![
                IndexEntry { label: "A".into(), row_id: "t-a000".into() },
                IndexEntry { label: "B".into(), row_id: "t-b040".into() },
                IndexEntry { label: "C".into(), row_id: "t-c080".into() },
            ]
        );
    }

    #[test]
    fn test_index_skips_rows_without_sort_value() {
        let p = props("dataPath: t\nrowSortKey: name\nlinkCol: 0\ncolumns: [{name: N, key: name}]");
        let mut table = rows(INDEX_MIN_ROWS);
        table.insert(10, Cow::Owned(json!({"other": 1})));
        let labels: Vec<String> = build_index("t", &p, &table)
            .into_iter()
            .map(|entry| entry.label)
            .collect();
        assert_eq!(labels, ["A", "B", "C"]);
    }

    #[test]
    fn test_index_requires_sort_key_and_link() {
        let no_sort = props("dataPath: t\nlinkCol: 0\ncolumns: [{name: N, key: name}]");
        assert!(build_index("t", &no_sort, &rows(150)).is_empty());
        let no_link = props("dataPath: t\nrowSortKey: name\ncolumns: [{name: N, key: name}]");
        assert!(build_index("t", &no_link, &rows(150)).is_empty());
    }
}
