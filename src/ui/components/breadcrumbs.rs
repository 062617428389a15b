use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreadcrumbItem {
    pub label: String,
    pub is_current: bool,
}

pub fn breadcrumb_items(title: &[String]) -> Vec<BreadcrumbItem> {
    let last = title.len().saturating_sub(1);
    title
        .iter()
        .enumerate()
        .map(|(idx, label)| BreadcrumbItem {
            label: label.clone(),
            is_current: idx == last,
        })
        .collect()
}

/// Trail of `title` labels followed by `(count)`, or a shimmer while the count is unknown.
#[component]
pub fn Breadcrumbs(title: Vec<String>, count: Option<String>) -> Element {
    let items = breadcrumb_items(&title);

    rsx! {
        div {
            style: "display: flex; align-items: center; gap: 8px; padding: 8px 0;",
            nav {
                style: "display: flex; align-items: center; gap: 4px; font-size: 18px;",
                for (idx, item) in items.into_iter().enumerate() {
                    span {
                        key: "{idx}",
                        style: if item.is_current { "font-weight: 600;" } else { "color: #605e5c;" },
                        "{item.label}"
                        if !item.is_current {
                            span { style: "padding: 0 4px;", "›" }
                        }
                    }
                }
            }
            if let Some(count) = count {
                div { style: "color: #605e5c;", "({count})" }
            } else {
                div {
                    style: "width: 50px; height: 12px; align-self: center; border-radius: 2px; background: linear-gradient(90deg, #ffffff, #a3a2a0, #ffffff);",
                }
            }
        }
    }
}
