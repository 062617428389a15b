use std::sync::Arc;
use std::time::{Duration, Instant};

use dioxus::prelude::*;

use crate::domain::entities::column::ColumnDef;
use crate::domain::entities::query::FilterDescriptor;
use crate::infra::http::client::{HttpPageSource, HttpSourceConfig};
use crate::platform::desktop::dialogs::{notify, pick_export_path};
use crate::ui::components::breadcrumbs::Breadcrumbs;
use crate::ui::components::data_table::DataTable;
use crate::ui::components::toolbar::Toolbar;
use crate::ui::state::app_state::AppState;
use crate::ui::state::infinite_scroll::is_near_bottom;
use crate::ui::state::overview_state::{ApplyOutcome, FetchTicket, OverviewState};
use crate::usecase::services::export_service::{default_export_file_name, ExportService};
use crate::usecase::services::overview_service::OverviewService;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Props, Clone, PartialEq)]
pub struct OverviewProps {
    pub title: Vec<String>,
    pub data_source: String,
    pub token: String,
    pub with_filter: bool,
    pub columns: Vec<ColumnDef>,
    pub filter_field: String,
    #[props(default)]
    pub loading_text: Option<String>,
    #[props(default)]
    pub data_end_text: Option<String>,
    #[props(default)]
    pub default_sorted_field: Option<String>,
    #[props(default)]
    pub search_placeholder: Option<String>,
    #[props(default = DEFAULT_REQUEST_TIMEOUT)]
    pub request_timeout: Duration,
    #[props(default = DEFAULT_CONNECT_TIMEOUT)]
    pub connect_timeout: Duration,
}

type SharedService = Option<Arc<OverviewService>>;

fn build_service(props: &OverviewProps) -> Result<Arc<OverviewService>, String> {
    let source = HttpPageSource::new(HttpSourceConfig {
        data_source: props.data_source.clone(),
        token: props.token.clone(),
        filter_field: props.filter_field.clone(),
        request_timeout: props.request_timeout,
        connect_timeout: props.connect_timeout,
    })
    .map_err(|err| err.to_string())?;
    Ok(Arc::new(OverviewService::new(Arc::new(source))))
}

fn dispatch(mut overview: Signal<OverviewState>, service: Arc<OverviewService>, ticket: FetchTicket) {
    spawn(async move {
        let result = service
            .load_page(&ticket.request, ticket.generation)
            .await;
        let mut state = overview.write();
        match result {
            Ok(response) => {
                if state.apply_page(&ticket, response) == ApplyOutcome::Stale {
                    tracing::debug!(
                        generation = ticket.generation,
                        page = ticket.request.page,
                        "discarded stale page"
                    );
                }
            }
            Err(err) => {
                if !state.apply_error(&ticket, err.to_string()) {
                    tracing::debug!(
                        generation = ticket.generation,
                        page = ticket.request.page,
                        "discarded stale failure"
                    );
                }
            }
        }
    });
}

fn run_ticket(overview: Signal<OverviewState>, service: &SharedService, ticket: Option<FetchTicket>) {
    if let (Some(service), Some(ticket)) = (service.clone(), ticket) {
        dispatch(overview, service, ticket);
    }
}

fn request_more(mut overview: Signal<OverviewState>, service: &SharedService) {
    // Peek first so idle scroll events leave the signal clean.
    if !overview.peek().can_load_more() {
        return;
    }
    let ticket = overview.write().load_more();
    run_ticket(overview, service, ticket);
}

#[component]
pub fn Overview(props: OverviewProps) -> Element {
    let AppState {
        mut overview,
        mut search_debouncer,
        mut status,
    } = AppState::new(props.columns.clone(), props.default_sorted_field.clone());

    let service = use_hook(|| build_service(&props));
    let shared: SharedService = service.as_ref().ok().cloned();

    let service_for_init = shared.clone();
    use_effect(move || {
        let ticket = overview.write().start_initial_load();
        run_ticket(overview, &service_for_init, ticket);
    });

    if let Err(message) = &service {
        return rsx! { b { "{message}" } };
    }
    let error = overview.read().error().map(str::to_string);
    if let Some(message) = error {
        return rsx! { b { "{message}" } };
    }

    let service_for_search = shared.clone();
    let on_search = move |text: String| {
        search_debouncer.write().push(text, Instant::now());
        let service = service_for_search.clone();
        let window = search_debouncer.peek().window();
        spawn(async move {
            tokio::time::sleep(window).await;
            let Some(text) = search_debouncer.write().poll(Instant::now()) else {
                return;
            };
            let ticket = overview.write().set_search(&text);
            run_ticket(overview, &service, ticket);
        });
    };

    let service_for_filter = shared.clone();
    let on_filter = move |filters: Vec<FilterDescriptor>| {
        let ticket = overview.write().set_filters(filters);
        run_ticket(overview, &service_for_filter, ticket);
    };

    let service_for_sort = shared.clone();
    let on_sort = move |field: String| {
        let ticket = overview.write().toggle_sort(&field);
        run_ticket(overview, &service_for_sort, ticket);
    };

    let service_for_scroll = shared.clone();
    let service_for_sentinel = shared.clone();

    let title_for_export = props.title.clone();
    let on_export = move |_: ()| {
        let default_name = default_export_file_name(&title_for_export);
        let Some(path) = pick_export_path(&default_name) else {
            status.set(Some("Export cancelled".to_string()));
            return;
        };
        let state = overview.read();
        let message = match ExportService.export_csv(&path, state.columns(), state.rows()) {
            Ok(result) => format!("Exported {} rows to {}", result.row_count, path.display()),
            Err(err) => format!("Export failed: {err:#}"),
        };
        status.set(Some(message));
    };

    let state = overview.read();
    let count = state.count_label();
    let loading = state.loading();
    let fetching = state.is_fetching();
    let has_more = state.has_more();
    let filters = state.filters().to_vec();
    let columns = state.columns().to_vec();
    let snapshot = state.snapshot();
    let footer = state.footer_message(props.loading_text.as_deref(), props.data_end_text.as_deref());
    drop(state);

    rsx! {
        div {
            style: "display: flex; flex-direction: column; height: 100vh; padding: 0 16px; box-sizing: border-box; font-family: 'Segoe UI', sans-serif;",
            Breadcrumbs { title: props.title.clone(), count: count }
            Toolbar {
                filters: filters,
                on_search: on_search,
                on_filter: on_filter,
                with_filter: props.with_filter,
                disabled: loading,
                search_placeholder: props.search_placeholder.clone(),
                on_create: move |_: ()| notify("Create new", "I'll be used to create a new project!"),
                on_export: on_export,
            }
            if let Some(message) = status() {
                p { style: "color: #605e5c; margin: 4px 0;", "{message}" }
            }
            div {
                style: "flex: 1; overflow-y: auto;",
                onscroll: move |event| {
                    let data = event.data();
                    if is_near_bottom(
                        data.scroll_top() as f64,
                        data.scroll_height() as f64,
                        data.client_height() as f64,
                    ) {
                        request_more(overview, &service_for_scroll);
                    }
                },
                DataTable {
                    columns: columns,
                    rows: snapshot,
                    loading: loading,
                    on_sort: on_sort,
                    on_item_invoked: move |name: String| notify("Item invoked", &format!("Item invoked: {name}")),
                }
                div {
                    style: "text-align: center; margin-top: 32px; margin-bottom: 32px;",
                    if loading || has_more {
                        p { "{footer}" }
                        if has_more && !fetching {
                            button {
                                onclick: move |_| request_more(overview, &service_for_sentinel),
                                "Load more"
                            }
                        }
                    } else {
                        p { b { "{footer}" } }
                    }
                }
            }
        }
    }
}
