use dioxus::prelude::*;

use crate::domain::entities::query::FilterDescriptor;

#[component]
pub fn FilterPanel(
    open: bool,
    on_apply: EventHandler<FilterDescriptor>,
    on_dismiss: EventHandler<()>,
) -> Element {
    let mut field = use_signal(String::new);
    let mut value = use_signal(String::new);

    if !open {
        return rsx! {};
    }

    rsx! {
        div {
            style: "position: fixed; top: 0; right: 0; bottom: 0; width: 320px; background: #fff; border-left: 1px solid #bbb; box-shadow: -8px 0 24px rgba(0,0,0,0.15); padding: 16px; z-index: 1200; display: flex; flex-direction: column; gap: 12px;",
            h3 { "Filter" }
            label {
                "Field"
                input {
                    style: "display: block; width: 100%;",
                    value: "{field}",
                    oninput: move |event| field.set(event.value()),
                }
            }
            label {
                "Value"
                input {
                    style: "display: block; width: 100%;",
                    value: "{value}",
                    oninput: move |event| value.set(event.value()),
                }
            }
            div {
                style: "display: flex; gap: 8px;",
                button {
                    onclick: move |_| {
                        on_apply.call(FilterDescriptor::new(field(), value()));
                        value.set(String::new());
                    },
                    "Apply"
                }
                button {
                    onclick: move |_| on_dismiss.call(()),
                    "Close"
                }
            }
        }
    }
}

#[component]
pub fn FilterChip(id: String, on_close: EventHandler<String>) -> Element {
    let chip_id = id.clone();

    rsx! {
        span {
            style: "display: inline-flex; align-items: center; gap: 4px; padding: 2px 8px; margin: 2px; border-radius: 12px; background: #edebe9;",
            "{id}"
            button {
                style: "border: none; background: transparent; cursor: pointer;",
                onclick: move |_| on_close.call(chip_id.clone()),
                "×"
            }
        }
    }
}
