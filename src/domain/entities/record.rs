use serde::Deserialize;
use serde_json::{Map, Value};

pub type Record = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page_count: u32,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageResponse {
    #[serde(rename = "_data")]
    pub rows: Vec<Record>,
    #[serde(rename = "_meta")]
    pub meta: PageMeta,
}

pub fn display_value(record: &Record, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
