use dioxus::prelude::*;

mod config;

mod domain {
    pub mod entities {
        pub mod column;
        pub mod query;
        pub mod record;
    }
}

mod infra {
    pub mod export {
        pub mod csv;
    }
    pub mod http {
        pub mod client;
        pub mod query_params;
    }
}

mod platform {
    pub mod desktop {
        pub mod dialogs;
    }
}

mod ui {
    pub mod components {
        pub mod breadcrumbs;
        pub mod data_table;
        pub mod filter_panel;
        pub mod overview;
        pub mod search_input;
        pub mod toolbar;
    }
    pub mod state {
        pub mod app_state;
        pub mod debounce;
        pub mod infinite_scroll;
        pub mod overview_state;
    }
}

mod usecase {
    pub mod ports {
        pub mod page_source;
    }
    pub mod services {
        pub mod export_service;
        pub mod overview_service;
    }
}


use crate::config::{default_webview_data_dir, AppConfig};
use crate::ui::components::overview::Overview;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn main() {
    init_tracing();

    let mut desktop_config = dioxus::desktop::Config::new()
        .with_window(dioxus::desktop::WindowBuilder::new().with_title("Overview"));
    match default_webview_data_dir() {
        Ok(dir) => desktop_config = desktop_config.with_data_directory(dir),
        Err(err) => tracing::warn!(error = %err, "using default webview data directory"),
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(desktop_config)
        .launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| AppConfig::load().map_err(|err| format!("{err:#}")));

    let config = match config {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "failed to load configuration");
            return rsx! {
                div {
                    p { "Unable to load configuration: {err}" }
                }
            };
        }
    };

    rsx! {
        Overview {
            title: config.title.clone(),
            data_source: config.data_source.clone(),
            token: config.token.clone(),
            with_filter: config.with_filter,
            columns: config.columns.clone(),
            filter_field: config.filter_field.clone(),
            loading_text: config.loading_text.clone(),
            data_end_text: config.data_end_text.clone(),
            default_sorted_field: config.default_sorted_field.clone(),
            search_placeholder: config.search_placeholder.clone(),
            request_timeout: config.request_timeout(),
            connect_timeout: config.connect_timeout(),
        }
    }
}
