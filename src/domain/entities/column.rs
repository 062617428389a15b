use serde::Deserialize;

use crate::domain::entities::query::SortOrder;

fn default_sortable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub key: String,
    pub field_name: String,
    pub label: String,
    #[serde(default)]
    pub min_width: Option<u32>,
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default = "default_sortable")]
    pub sortable: bool,
    #[serde(skip)]
    pub is_sorted: bool,
    #[serde(skip)]
    pub is_sorted_descending: bool,
}

impl ColumnDef {
    pub fn new(field_name: impl Into<String>, label: impl Into<String>) -> Self {
        let field_name = field_name.into();
        Self {
            key: field_name.clone(),
            field_name,
            label: label.into(),
            min_width: None,
            max_width: None,
            sortable: true,
            is_sorted: false,
            is_sorted_descending: false,
        }
    }

    pub fn sort_indicator(&self) -> &'static str {
        match (self.is_sorted, self.is_sorted_descending) {
            (false, _) => "",
            (true, false) => " ▲",
            (true, true) => " ▼",
        }
    }

    pub fn width_style(&self) -> String {
        let mut style = String::new();
        if let Some(min) = self.min_width {
            style.push_str(&format!("min-width: {min}px;"));
        }
        if let Some(max) = self.max_width {
            style.push_str(&format!("max-width: {max}px;"));
        }
        style
    }
}

pub fn apply_sort_indicators(columns: &[ColumnDef], order: Option<&SortOrder>) -> Vec<ColumnDef> {
    columns
        .iter()
        .map(|column| {
            let active = order.filter(|order| order.field == column.field_name);
            ColumnDef {
                is_sorted: active.is_some(),
                is_sorted_descending: active.is_some_and(|order| order.descending),
                ..column.clone()
            }
        })
        .collect()
}
