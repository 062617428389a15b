use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::column::ColumnDef;
use crate::ui::state::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::ui::state::overview_state::OverviewState;

pub struct AppState {
    pub overview: Signal<OverviewState>,
    pub search_debouncer: Signal<Debouncer<String>>,
    pub status: Signal<Option<String>>,
}

impl AppState {
    pub fn new(columns: Vec<ColumnDef>, default_sorted_field: Option<String>) -> Self {
        Self {
            overview: use_signal(move || {
                OverviewState::new(columns, default_sorted_field.as_deref())
            }),
            search_debouncer: use_signal(|| Debouncer::new(SEARCH_DEBOUNCE)),
            status: use_signal(|| None::<String>),
        }
    }
}
