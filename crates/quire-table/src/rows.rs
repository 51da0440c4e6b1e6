//! Row gathering: resolve, normalize, sort, reverse, filter.

use std::borrow::Cow;
use std::cmp::Ordering;

use quire_data::{display, get_path, loose_eq, lookup, opt_truthy, split_path, strict_eq};
use serde_json::{Map, Value};

use crate::props::DataTableProps;

/// Collect the rows of a table from `data`.
///
/// Sequences are borrowed as-is; mappings become owned `{key, value}` rows in
/// authored order. Missing or scalar paths contribute nothing.
#[must_use]
pub fn gather_rows<'a>(data: &'a Value, props: &DataTableProps) -> Vec<Cow<'a, Value>> {
    let mut rows: Vec<Cow<'a, Value>> = props
        .data_path
        .paths()
        .iter()
        .flat_map(|path| source_rows(data, path))
        .collect();

    if let Some(sort_key) = &props.row_sort_key {
        let keys = split_path(sort_key);
        // Stable, so rows with equal keys keep source order.
        rows.sort_by_cached_key(|row| SortKey::of(get_path(row, &keys)));
        if props.row_sort_reverse {
            rows.reverse();
        }
    }

    if let Some(filter_key) = &props.row_filter_key {
        let keys = split_path(filter_key);
        let expected = props.row_filter_value.as_ref();
        rows.retain(|row| matches_filter(get_path(row, &keys), expected) != props.row_filter_not);
    }

    rows
}

fn source_rows<'a>(data: &'a Value, path: &str) -> Vec<Cow<'a, Value>> {
    match lookup(data, path) {
        Some(Value::Array(items)) => items.iter().map(Cow::Borrowed).collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| {
                let mut row = Map::new();
                row.insert("key".to_owned(), Value::String(key.clone()));
                row.insert("value".to_owned(), value.clone());
                Cow::Owned(Value::Object(row))
            })
            .collect(),
        Some(other) => {
            tracing::debug!(path, kind = ?other, "table source is not a sequence or mapping");
            Vec::new()
        }
        None => {
            tracing::debug!(path, "table source not found");
            Vec::new()
        }
    }
}

fn matches_filter(field: Option<&Value>, expected: Option<&Value>) -> bool {
    let Some(expected) = expected else {
        return opt_truthy(field);
    };
    match field {
        Some(Value::Array(items)) => items.iter().any(|item| strict_eq(item, expected)),
        Some(value) => loose_eq(value, expected),
        None => false,
    }
}

/// Total order over sort-key values: missing < bool < number < string.
#[derive(Clone, Debug, PartialEq)]
enum SortKey {
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Bool(b)) => Self::Bool(*b),
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Missing, Self::Number),
            Some(Value::String(s)) => Self::Text(s.to_uppercase()),
            Some(other) => Self::Text(display(other).to_uppercase()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}
