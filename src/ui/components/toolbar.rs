use dioxus::prelude::*;

use crate::domain::entities::query::{add_filter, remove_filters_by_value, FilterDescriptor};
use crate::ui::components::filter_panel::{FilterChip, FilterPanel};
use crate::ui::components::search_input::SearchInput;

const PRIMARY_BUTTON_STYLE: &str = "background: #0078d4; color: #fff; border: none; padding: 6px 16px; border-radius: 2px; cursor: pointer; margin-right: 8px;";
const COMMAND_BUTTON_STYLE: &str = "background: transparent; border: none; padding: 6px 12px; cursor: pointer;";

/// Controlled view: `filters` is owned by the caller and every change goes out
/// through `on_filter` as the full new list.
#[component]
pub fn Toolbar(
    filters: Vec<FilterDescriptor>,
    on_search: EventHandler<String>,
    on_filter: EventHandler<Vec<FilterDescriptor>>,
    with_filter: bool,
    disabled: bool,
    search_placeholder: Option<String>,
    on_create: EventHandler<()>,
    on_export: EventHandler<()>,
) -> Element {
    let mut panel_open = use_signal(|| false);
    let mut export_menu_open = use_signal(|| false);
    let has_filters = !filters.is_empty();
    let filters_for_apply = filters.clone();
    let filters_for_chips = filters.clone();

    rsx! {
        if with_filter {
            FilterPanel {
                open: panel_open(),
                on_apply: move |next: FilterDescriptor| {
                    let updated = add_filter(&filters_for_apply, next);
                    if updated != filters_for_apply {
                        on_filter.call(updated);
                    }
                },
                on_dismiss: move |_: ()| panel_open.set(false),
            }
        }
        div {
            style: "display: flex; justify-content: space-between; align-items: center; gap: 5px; padding: 4px 0;",
            div {
                style: "display: flex; align-items: center;",
                button {
                    style: PRIMARY_BUTTON_STYLE,
                    onclick: move |_| on_create.call(()),
                    "Create new"
                }
                SearchInput {
                    on_change: move |text: String| on_search.call(text),
                    disabled: disabled,
                    underline: !has_filters,
                    placeholder: search_placeholder.clone(),
                }
                if has_filters {
                    div {
                        style: "display: flex; flex-wrap: wrap; align-items: center; margin-left: 8px;",
                        for (idx, filter) in filters_for_chips.iter().enumerate() {
                            FilterChip {
                                key: "{idx}-{filter.value}",
                                id: filter.value.clone(),
                                on_close: {
                                    let current = filters_for_chips.clone();
                                    move |id: String| on_filter.call(remove_filters_by_value(&current, &id))
                                },
                            }
                        }
                        div {
                            style: "cursor: pointer; color: #0078d4; margin-left: 8px;",
                            onclick: move |_| on_filter.call(Vec::new()),
                            "Remove filters"
                        }
                    }
                }
            }
            div {
                style: "display: flex; align-items: center; position: relative;",
                if with_filter {
                    button {
                        style: if has_filters { PRIMARY_BUTTON_STYLE } else { COMMAND_BUTTON_STYLE },
                        disabled: disabled && !has_filters,
                        onclick: move |_| panel_open.set(true),
                        "Filter"
                    }
                }
                button {
                    style: COMMAND_BUTTON_STYLE,
                    onclick: move |_| {
                        let open = export_menu_open();
                        export_menu_open.set(!open);
                    },
                    "Exporteer"
                }
                if export_menu_open() {
                    div {
                        style: "position: absolute; right: 0; top: 32px; min-width: 160px; background: #fff; border: 1px solid #bbb; border-radius: 4px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                        div {
                            style: "padding: 8px 10px; cursor: pointer;",
                            onclick: move |_| {
                                export_menu_open.set(false);
                                on_export.call(());
                            },
                            "CSV file"
                        }
                    }
                }
            }
        }
    }
}
