use std::sync::Arc;

use crate::domain::entities::column::{apply_sort_indicators, ColumnDef};
use crate::domain::entities::query::{
    toggle_sort, FilterDescriptor, PageRequest, QuerySignature, SortOrder,
};
use crate::domain::entities::record::{PageResponse, Record};

pub const DEFAULT_LOADING_TEXT: &str = "Loading Data...";
pub const DEFAULT_SEARCH_LOADING_TEXT: &str = "Loading search results...";
pub const DEFAULT_DATA_END_TEXT: &str = "Yay! You have seen it all";
pub const NO_MORE_RESULTS_TEXT: &str = "No more results found!";
const SEARCH_FOOTER_ROW_THRESHOLD: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Replace,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub mode: FetchMode,
    pub request: PageRequest,
}

/// Rows handed to the table. Equality is by `version` only, so the table
/// re-derives its cells exactly when the accumulated set was replaced or extended.
#[derive(Debug, Clone, Default)]
pub struct RowSnapshot {
    pub version: u64,
    pub rows: Arc<Vec<Record>>,
}

impl PartialEq for RowSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Replaced { rows: usize },
    Appended { rows: usize },
    Stale,
}

pub struct OverviewState {
    base_columns: Vec<ColumnDef>,
    columns: Vec<ColumnDef>,
    order_by: Option<SortOrder>,
    filters: Vec<FilterDescriptor>,
    search: String,
    page: u32,
    total_page_count: u32,
    total_count: Option<u64>,
    full_data_count: u64,
    rows: Arc<Vec<Record>>,
    data_version: u64,
    generation: u64,
    in_flight: Option<(u64, FetchMode)>,
    error: Option<String>,
}

impl OverviewState {
    pub fn new(columns: Vec<ColumnDef>, default_sorted_field: Option<&str>) -> Self {
        let order_by = default_sorted_field.and_then(SortOrder::parse);
        Self {
            columns: apply_sort_indicators(&columns, order_by.as_ref()),
            base_columns: columns,
            order_by,
            filters: Vec::new(),
            search: String::new(),
            page: 1,
            total_page_count: 0,
            total_count: None,
            full_data_count: 0,
            rows: Arc::new(Vec::new()),
            data_version: 0,
            generation: 0,
            in_flight: None,
            error: None,
        }
    }

    pub fn signature(&self) -> QuerySignature {
        QuerySignature {
            order_by: self.order_by.clone(),
            filters: self.filters.clone(),
            search: self.search.clone(),
        }
    }

    pub fn start_initial_load(&mut self) -> Option<FetchTicket> {
        self.restart()
    }

    pub fn toggle_sort(&mut self, field: &str) -> Option<FetchTicket> {
        if self.error.is_some() {
            return None;
        }
        self.order_by = Some(toggle_sort(self.order_by.as_ref(), field));
        self.restart()
    }

    pub fn set_filters(&mut self, filters: Vec<FilterDescriptor>) -> Option<FetchTicket> {
        if self.filters == filters {
            return None;
        }
        self.filters = filters;
        self.restart()
    }

    pub fn set_search(&mut self, text: &str) -> Option<FetchTicket> {
        if self.search == text {
            return None;
        }
        self.search = text.to_string();
        self.restart()
    }

    /// Whether `load_more` would issue a fetch right now.
    pub fn can_load_more(&self) -> bool {
        self.has_more() && self.in_flight.is_none() && self.error.is_none()
    }

    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.can_load_more() {
            return None;
        }
        self.in_flight = Some((self.generation, FetchMode::Append));
        Some(FetchTicket {
            generation: self.generation,
            mode: FetchMode::Append,
            request: PageRequest {
                page: self.page,
                signature: self.signature(),
            },
        })
    }

    fn restart(&mut self) -> Option<FetchTicket> {
        if self.error.is_some() {
            return None;
        }
        self.generation += 1;
        self.page = 1;
        self.in_flight = Some((self.generation, FetchMode::Replace));
        Some(FetchTicket {
            generation: self.generation,
            mode: FetchMode::Replace,
            request: PageRequest {
                page: 1,
                signature: self.signature(),
            },
        })
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.error.is_none() && ticket.generation == self.generation
    }

    pub fn apply_page(&mut self, ticket: &FetchTicket, response: PageResponse) -> ApplyOutcome {
        if !self.is_current(ticket) {
            return ApplyOutcome::Stale;
        }

        let received = response.rows.len();
        let outcome = match ticket.mode {
            FetchMode::Replace => {
                self.rows = Arc::new(response.rows);
                self.columns = apply_sort_indicators(&self.base_columns, self.order_by.as_ref());
                ApplyOutcome::Replaced { rows: received }
            }
            FetchMode::Append => {
                Arc::make_mut(&mut self.rows).extend(response.rows);
                ApplyOutcome::Appended { rows: received }
            }
        };

        self.data_version += 1;
        self.page = ticket.request.page + 1;
        self.total_page_count = response.meta.page_count;
        self.total_count = Some(response.meta.total_count);
        if !ticket.request.signature.is_narrowed() {
            self.full_data_count = response.meta.total_count;
        }
        self.in_flight = None;
        outcome
    }

    /// Returns `false` when the failure belongs to a superseded query.
    pub fn apply_error(&mut self, ticket: &FetchTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.error = Some(message.into());
        self.in_flight = None;
        true
    }

    pub fn loading(&self) -> bool {
        matches!(self.in_flight, Some((_, FetchMode::Replace)))
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_more(&self) -> bool {
        self.total_count.is_some() && self.page <= self.total_page_count
    }

    pub fn count_label(&self) -> Option<String> {
        let total = self.total_count?;
        if self.signature().is_narrowed() {
            Some(format!("{total} of {}", self.full_data_count))
        } else {
            Some(total.to_string())
        }
    }

    pub fn footer_message(&self, loading_text: Option<&str>, data_end_text: Option<&str>) -> String {
        let searching = !self.search.is_empty();
        let default_loading = if searching {
            DEFAULT_SEARCH_LOADING_TEXT
        } else {
            DEFAULT_LOADING_TEXT
        };
        let loading_label = loading_text.unwrap_or(default_loading);

        if self.loading() || self.has_more() || self.total_count.is_none() {
            loading_label.to_string()
        } else if searching && self.rows.len() < SEARCH_FOOTER_ROW_THRESHOLD {
            NO_MORE_RESULTS_TEXT.to_string()
        } else {
            data_end_text.unwrap_or(DEFAULT_DATA_END_TEXT).to_string()
        }
    }

    pub fn snapshot(&self) -> RowSnapshot {
        RowSnapshot {
            version: self.data_version,
            rows: self.rows.clone(),
        }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn filters(&self) -> &[FilterDescriptor] {
        &self.filters
    }

    #[cfg(test)]
    pub fn order_by(&self) -> Option<&SortOrder> {
        self.order_by.as_ref()
    }

    #[cfg(test)]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[cfg(test)]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[cfg(test)]
    pub fn total_page_count(&self) -> u32 {
        self.total_page_count
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    #[cfg(test)]
    pub fn data_version(&self) -> u64 {
        self.data_version
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::record::PageMeta;
    use serde_json::json;

    fn rows(prefix: &str, count: usize) -> Vec<Record> {
        (0..count)
            .map(|idx| {
                json!({ "name": format!("{prefix}-{idx}") })
                    .as_object()
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }

    fn page(prefix: &str, count: usize, page_count: u32, total_count: u64) -> PageResponse {
        PageResponse {
            rows: rows(prefix, count),
            meta: PageMeta {
                page_count,
                total_count,
            },
        }
    }

    fn loaded_state() -> OverviewState {
        let mut state = OverviewState::new(vec![ColumnDef::new("name", "Name")], None);
        let ticket = state.start_initial_load().expect("initial load should start");
        state.apply_page(&ticket, page("all", 10, 5, 100));
        state
    }

    #[test]
    fn load_more_is_not_offered_while_a_page_is_in_flight() {
        let mut state = loaded_state();
        assert!(state.can_load_more());

        let ticket = state.load_more().expect("second page should be requested");
        assert!(!state.can_load_more(), "second page is still in flight");
        assert!(state.load_more().is_none());

        state.apply_page(&ticket, page("p2", 10, 2, 20));
        assert!(!state.can_load_more(), "page 3 exceeds the page count");
    }

    #[test]
    fn count_is_unknown_before_first_page() {
        let state = OverviewState::new(Vec::new(), None);

        assert_eq!(state.count_label(), None);
        assert!(!state.has_more());
    }

    #[test]
    fn default_sort_may_carry_descending_prefix() {
        let state = OverviewState::new(vec![ColumnDef::new("name", "Name")], Some("-name"));

        assert_eq!(state.order_by(), Some(&SortOrder::descending("name")));
        assert!(state.columns()[0].is_sorted_descending);
    }

    #[test]
    fn load_more_appends_and_advances_cursor() {
        let mut state = loaded_state();

        let ticket = state.load_more().expect("second page should be available");
        assert_eq!(ticket.request.page, 2);
        assert_eq!(ticket.mode, FetchMode::Append);
        assert!(!state.loading(), "appending should not shimmer the table");

        let outcome = state.apply_page(&ticket, page("all", 10, 5, 100));

        assert_eq!(outcome, ApplyOutcome::Appended { rows: 10 });
        assert_eq!(state.rows().len(), 20);
        assert_eq!(state.page(), 3);
    }

    #[test]
    fn only_one_load_more_in_flight() {
        let mut state = loaded_state();

        assert!(state.load_more().is_some());
        assert!(
            state.load_more().is_none(),
            "a second page request must wait for the first"
        );
    }

    #[test]
    fn replace_bumps_data_version_even_with_same_length() {
        let mut state = loaded_state();
        let before = state.snapshot();

        let ticket = state.toggle_sort("name").expect("sort should refetch");
        state.apply_page(&ticket, page("sorted", 10, 5, 100));

        assert_ne!(state.snapshot(), before);
        assert_eq!(state.rows().len(), 10);
    }

    #[test]
    fn unchanged_filters_do_not_refetch() {
        let mut state = loaded_state();

        assert!(state.set_filters(Vec::new()).is_none());
        assert!(state.set_search("").is_none());
    }

    #[test]
    fn stale_error_is_ignored() {
        let mut state = loaded_state();
        let old = state.set_search("a").expect("search should refetch");
        let _current = state.set_search("ab").expect("search should refetch");

        assert!(!state.apply_error(&old, "boom"));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn error_is_terminal() {
        let mut state = loaded_state();
        let ticket = state.load_more().expect("second page should be available");

        assert!(state.apply_error(&ticket, "Network Error"));

        assert_eq!(state.error(), Some("Network Error"));
        assert!(state.load_more().is_none());
        assert!(state.toggle_sort("name").is_none());
        assert!(state
            .set_filters(vec![FilterDescriptor::new("a", "b")])
            .is_none());
    }

    #[test]
    fn footer_follows_loading_and_end_states() {
        let mut state = OverviewState::new(Vec::new(), None);
        let ticket = state.start_initial_load().expect("initial load should start");
        assert_eq!(state.footer_message(None, None), DEFAULT_LOADING_TEXT);

        state.apply_page(&ticket, page("all", 3, 1, 3));
        assert_eq!(state.footer_message(None, None), DEFAULT_DATA_END_TEXT);
        assert_eq!(state.footer_message(None, Some("done")), "done");

        let ticket = state.set_search("x").expect("search should refetch");
        assert_eq!(state.footer_message(None, None), DEFAULT_SEARCH_LOADING_TEXT);
        assert_eq!(state.footer_message(Some("wait"), None), "wait");

        state.apply_page(&ticket, page("hit", 2, 1, 2));
        assert_eq!(state.footer_message(None, None), NO_MORE_RESULTS_TEXT);
    }
}
