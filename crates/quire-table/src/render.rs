//! Validated tables and their HTML and plaintext renderings.

use std::fmt::Write;
use std::sync::Arc;

use quire_data::lookup;
use quire_renderer::{LinkResolver, OutputMode, escape_html};
use serde_json::Value;

use crate::cell::{CellFormat, format_cell};
use crate::error::TableError;
use crate::identity::{IndexEntry, build_index, row_id};
use crate::props::{DataTableProps, LinkMode};
use crate::rows::gather_rows;

/// A table definition that passed validation.
#[derive(Clone, Debug)]
pub struct DataTable {
    props: DataTableProps,
    formats: Vec<CellFormat>,
}

impl DataTable {
    /// Validate `props`.
    ///
    /// # Errors
    ///
    /// Fails when there are no columns, `linkCol` is out of range, or a
    /// column names an unknown format.
    pub fn new(props: DataTableProps) -> Result<Self, TableError> {
        if props.columns.is_empty() {
            return Err(TableError::NoColumns);
        }
        if let LinkMode::Column(index) = props.link_mode()
            && index >= props.columns.len()
        {
            return Err(TableError::LinkColumnOutOfRange {
                index,
                count: props.columns.len(),
            });
        }
        let formats = props
            .columns
            .iter()
            .map(|column| {
                column
                    .format
                    .as_deref()
                    .map_or(Ok(CellFormat::Text), str::parse)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { props, formats })
    }

    /// Parse and validate a YAML table definition.
    ///
    /// # Errors
    ///
    /// See [`DataTable::new`]; malformed YAML yields [`TableError::Props`].
    pub fn from_yaml(source: &str) -> Result<Self, TableError> {
        Self::new(DataTableProps::from_yaml(source)?)
    }

    #[must_use]
    pub fn props(&self) -> &DataTableProps {
        &self.props
    }

    /// Anchor id for the row at `index` (zero-based) of this table.
    #[must_use]
    pub fn row_id(&self, row: &Value, index: usize) -> String {
        row_id(&self.props.table_id(), &self.props, row, index)
    }

    /// Jump index over the gathered rows of `data`.
    #[must_use]
    pub fn build_index(&self, data: &Value) -> Vec<IndexEntry> {
        let rows = gather_rows(data, &self.props);
        build_index(&self.props.table_id(), &self.props, &rows)
    }

    /// Render as an HTML fragment.
    ///
    /// # Errors
    ///
    /// Propagates markdown failures from `text` cells.
    pub fn render_html(
        &self,
        data: &Value,
        resolver: Option<&Arc<dyn LinkResolver>>,
    ) -> Result<String, TableError> {
        let props = &self.props;
        let table_id = props.table_id();
        let rows = gather_rows(data, props);
        let index = build_index(&table_id, props, &rows);
        let link_mode = props.link_mode();

        let mut html = String::from(r#"<div class="table-wrapper">"#);

        if !index.is_empty() {
            let links = index
                .iter()
                .map(|entry| {
                    format!(
                        r##"<a href="#{}">{}</a>"##,
                        escape_html(&entry.row_id),
                        escape_html(&entry.label)
                    )
                })
                .collect::<Vec<_>>()
                .join(" · ");
            let _ = write!(html, r#"<p class="table-index">{links}</p>"#);
        }

        let classes = props.table_classes();
        if classes.is_empty() {
            html.push_str("<table>");
        } else {
            let _ = write!(html, r#"<table class="{classes}">"#);
        }

        html.push_str("<thead><tr>");
        for (i, column) in props.columns.iter().enumerate() {
            if i == 0 && link_mode == LinkMode::JumpCell {
                html.push_str(r#"<th colspan="2">"#);
            } else {
                html.push_str("<th>");
            }
            html.push_str(&escape_html(&column.name));
            html.push_str("</th>");
        }
        html.push_str("</tr></thead><tbody>");

        for (i, row) in rows.iter().enumerate() {
            let id = escape_html(&row_id(&table_id, props, row, i));
            let _ = write!(html, r#"<tr id="{id}">"#);
            if link_mode == LinkMode::JumpCell {
                let _ = write!(html, r##"<td><a class="jump-anchor" href="#{id}">#</a></td>"##);
            }
            for (c, (column, format)) in props.columns.iter().zip(&self.formats).enumerate() {
                let mut content =
                    format_cell(format, lookup(row, &column.key), OutputMode::Html, resolver)?;
                if link_mode == LinkMode::Column(c) {
                    content = format!(r##"<a class="jump-anchor" href="#{id}">{content}</a>"##);
                }
                match &column.style {
                    Some(style) => {
                        let _ = write!(html, r#"<td style="{}">"#, escape_html(style));
                    }
                    None => html.push_str("<td>"),
                }
                html.push_str(&content);
                html.push_str("</td>");
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody></table></div>");
        Ok(html)
    }

    /// Render as plaintext for search records.
    ///
    /// # Errors
    ///
    /// Propagates markdown failures from `text` cells.
    pub fn render_plain(
        &self,
        data: &Value,
        resolver: Option<&Arc<dyn LinkResolver>>,
    ) -> Result<String, TableError> {
        let props = &self.props;
        let header = props
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let body = gather_rows(data, props)
            .iter()
            .map(|row| {
                props
                    .columns
                    .iter()
                    .zip(&self.formats)
                    .map(|(column, format)| {
                        format_cell(format, lookup(row, &column.key), OutputMode::Plain, resolver)
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(|cells| cells.join(" "))
            })
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");

        Ok(format!("{header}\n{body}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tags() -> Value {
        json!({
            "tags": {
                "h1": {
                    "bitmap": {"id": "bitm", "parent": null},
                    "model": {"id": "mode", "parent": "obje"},
                }
            }
        })
    }

    #[test]
    fn test_validation_rejects_empty_columns() {
        let err = DataTable::from_yaml("dataPath: a\ncolumns: []").unwrap_err();
        assert!(matches!(err, TableError::NoColumns));
    }

    #[test]
    fn test_validation_rejects_out_of_range_link_col() {
        let err = DataTable::from_yaml("dataPath: a\nlinkCol: 2\ncolumns: [{name: A, key: a}]")
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::LinkColumnOutOfRange { index: 2, count: 1 }
        ));
    }

    #[test]
    fn test_validation_rejects_unknown_format() {
        let err = DataTable::from_yaml("dataPath: a\ncolumns: [{name: A, key: a, format: huge}]")
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown cell format `huge`");
    }

    #[test]
    fn test_render_html_basic() {
        let table = DataTable::from_yaml(
            "dataPath: tags/h1\ncolumns:\n  - {name: Tag, key: key}\n  - {name: ID, key: value/id, format: code, style: 'width: 4em'}",
        )
        .unwrap();
        assert_eq!(
            table.render_html(&tags(), None).unwrap(),
            concat!(
                r#"<div class="table-wrapper"><table><thead><tr><th>Tag</th><th>ID</th></tr></thead><tbody>"#,
                r#"<tr id="h1-1"><td>bitmap</td><td style="width: 4em"><code>bitm</code></td></tr>"#,
                r#"<tr id="h1-2"><td>model</td><td style="width: 4em"><code>mode</code></td></tr>"#,
                "</tbody></table></div>"
            )
        );
    }

    #[test]
    fn test_render_html_jump_cell() {
        let table = DataTable::from_yaml(
            "dataPath: tags/h1\nlinkCol: true\nlinkSlugKey: key\nnoClear: true\ncolumns: [{name: Tag, key: key}]",
        )
        .unwrap();
        let html = table.render_html(&tags(), None).unwrap();
        assert!(html.contains(r#"<table class="no-clear">"#));
        assert!(html.contains(r#"<th colspan="2">Tag</th>"#));
        assert!(html.contains(
            r##"<tr id="h1-bitmap"><td><a class="jump-anchor" href="#h1-bitmap">#</a></td><td>bitmap</td></tr>"##
        ));
    }

    #[test]
    fn test_render_html_link_column() {
        let table = DataTable::from_yaml(
            "dataPath: tags/h1\nlinkCol: 1\ncolumns:\n  - {name: Tag, key: key}\n  - {name: ID, key: value/id}",
        )
        .unwrap();
        let html = table.render_html(&tags(), None).unwrap();
        assert!(html.contains("<th>Tag</th><th>ID</th>"));
        assert!(html.contains(
            r##"<tr id="h1-mode"><td>model</td><td><a class="jump-anchor" href="#h1-mode">mode</a></td></tr>"##
        ));
    }

    #[test]
    fn test_render_html_index_nav() {
        let rows: Vec<Value> = (0..120)
            .map(|i| json!({"name": format!("{}{i:03}", if i < 60 { "a" } else { "b" })}))
            .collect();
        let data = json!({ "things": rows });
        let table = DataTable::from_yaml(
            "dataPath: things\nrowSortKey: name\nlinkCol: 0\ncolumns: [{name: Name, key: name}]",
        )
        .unwrap();
        let html = table.render_html(&data, None).unwrap();
        assert!(html.contains(
            r##"<p class="table-index"><a href="#things-a000">A</a> · <a href="#things-b060">B</a></p>"##
        ));
        assert_eq!(table.build_index(&data).len(), 2);
    }

    #[test]
    fn test_render_plain() {
        let table = DataTable::from_yaml(
            "dataPath: tags/h1\nlinkCol: true\ncolumns:\n  - {name: Tag, key: key}\n  - {name: Parent, key: value/parent, format: code}",
        )
        .unwrap();
        assert_eq!(
            table.render_plain(&tags(), None).unwrap(),
            "Tag Parent\nbitmap \nmodel obje"
        );
    }

    #[test]
    fn test_render_empty_source() {
        let table = DataTable::from_yaml("dataPath: none\ncolumns: [{name: A, key: a}]").unwrap();
        assert_eq!(table.render_plain(&json!({}), None).unwrap(), "A\n");
        assert!(table.render_html(&json!({}), None).unwrap().contains("<tbody></tbody>"));
    }

    #[test]
    fn test_row_id_uses_table_id() {
        let table = DataTable::from_yaml("dataPath: a/b\ncolumns: [{name: A, key: a}]").unwrap();
        assert_eq!(table.row_id(&json!({}), 4), "b-5");
    }
}
