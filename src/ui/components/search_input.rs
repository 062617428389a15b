use dioxus::prelude::*;

const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search";

#[component]
pub fn SearchInput(
    on_change: EventHandler<String>,
    disabled: bool,
    underline: bool,
    placeholder: Option<String>,
) -> Element {
    let mut value = use_signal(String::new);
    let placeholder = placeholder.unwrap_or_else(|| DEFAULT_SEARCH_PLACEHOLDER.to_string());
    let border = if underline {
        "border: none; border-bottom: 1px solid #8a8886;"
    } else {
        "border: none;"
    };

    rsx! {
        input {
            r#type: "search",
            style: "{border} padding: 4px 8px; min-width: 240px; outline: none;",
            disabled: disabled,
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |event| {
                let text = event.value();
                value.set(text.clone());
                on_change.call(text);
            },
        }
    }
}
