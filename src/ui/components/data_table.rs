use dioxus::prelude::*;

use crate::domain::entities::column::ColumnDef;
use crate::domain::entities::record::{display_value, Record};
use crate::ui::state::overview_state::RowSnapshot;

const SHIMMER_ROWS: usize = 8;
const INVOKE_LABEL_FIELD: &str = "name";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub key: String,
    pub label: String,
    pub cells: Vec<String>,
}

/// Rows keep their own `key` field when present, otherwise their position.
pub fn derive_table_rows(rows: &[Record], columns: &[ColumnDef]) -> Vec<TableRow> {
    rows.iter()
        .enumerate()
        .map(|(idx, record)| {
            let key = match display_value(record, "key") {
                key if key.is_empty() => idx.to_string(),
                key => key,
            };
            TableRow {
                key,
                label: display_value(record, INVOKE_LABEL_FIELD),
                cells: columns
                    .iter()
                    .map(|column| display_value(record, &column.field_name))
                    .collect(),
            }
        })
        .collect()
}

fn header_cell_style(column: &ColumnDef) -> String {
    let cursor = if column.sortable { "pointer" } else { "default" };
    format!(
        "text-align: left; padding: 8px 10px; border-bottom: 1px solid #edebe9; position: sticky; top: 0; background: #fff; cursor: {cursor}; {}",
        column.width_style()
    )
}

#[component]
pub fn DataTable(
    columns: Vec<ColumnDef>,
    rows: RowSnapshot,
    loading: bool,
    on_sort: EventHandler<String>,
    on_item_invoked: EventHandler<String>,
) -> Element {
    let table_rows = use_memo(use_reactive!(|rows, columns| {
        derive_table_rows(&rows.rows, &columns)
    }));
    let table_rows = table_rows();
    let show_shimmer = loading && table_rows.is_empty();
    let body_opacity = if loading { "0.5" } else { "1" };
    let column_count = columns.len().max(1);

    rsx! {
        div {
            style: "width: 100%;",
            table {
                style: "width: 100%; border-collapse: collapse; table-layout: auto;",
                thead {
                    tr {
                        {columns.iter().map(|column| {
                            let field_name = column.field_name.clone();
                            let sortable = column.sortable;
                            let style = header_cell_style(column);
                            let text = format!("{}{}", column.label, column.sort_indicator());
                            rsx!(
                                th {
                                    key: "{column.key}",
                                    style: "{style}",
                                    onclick: move |_| {
                                        if sortable {
                                            on_sort.call(field_name.clone());
                                        }
                                    },
                                    "{text}"
                                }
                            )
                        })}
                    }
                }
                tbody {
                    style: "opacity: {body_opacity};",
                    if show_shimmer {
                        for idx in 0..SHIMMER_ROWS {
                            tr {
                                key: "shimmer-{idx}",
                                td {
                                    colspan: "{column_count}",
                                    style: "padding: 8px 10px;",
                                    div { style: "height: 14px; border-radius: 2px; background: linear-gradient(90deg, #f3f2f1, #e1dfdd, #f3f2f1);" }
                                }
                            }
                        }
                    }
                    {table_rows.into_iter().map(|row| {
                        let label = row.label.clone();
                        rsx!(
                            tr {
                                key: "{row.key}",
                                style: "border-bottom: 1px solid #f3f2f1;",
                                ondoubleclick: move |_| on_item_invoked.call(label.clone()),
                                for (col_idx, cell) in row.cells.iter().enumerate() {
                                    td {
                                        key: "{col_idx}",
                                        style: "padding: 8px 10px;",
                                        "{cell}"
                                    }
                                }
                            }
                        )
                    })}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().expect("fixture should be an object")
    }

    #[test]
    fn cells_follow_column_order() {
        let columns = vec![ColumnDef::new("size", "Size"), ColumnDef::new("name", "Name")];
        let rows = vec![record(json!({ "name": "alpha", "size": 3, "key": "a-1" }))];

        let derived = derive_table_rows(&rows, &columns);

        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].cells, vec!["3".to_string(), "alpha".to_string()]);
        assert_eq!(derived[0].key, "a-1");
        assert_eq!(derived[0].label, "alpha");
    }

    #[test]
    fn rows_without_key_use_position() {
        let columns = vec![ColumnDef::new("name", "Name")];
        let rows = vec![record(json!({ "name": "a" })), record(json!({ "name": "b" }))];

        let derived = derive_table_rows(&rows, &columns);

        let keys: Vec<&str> = derived.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(keys, vec!["0", "1"]);
    }
}
