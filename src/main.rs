#![windows_subsystem = "windows"]
mod address;
mod amount;
mod components;
mod draft;
mod helper_hooks;
mod rewards;
mod state_management;
mod utils;
mod views;

mod prelude {
    pub use super::components::alerts::{alert_error, alert_info, alert_success, alert_warn};
    pub use super::helper_hooks::prelude::*;
    pub use super::state_management::prelude::*;
    pub use dioxus::prelude::*;
}

use serde::{Deserialize, Serialize};

use components::alerts::AlertsContainer;
use prelude::*;

use views::{
    account_import::AccountImportView, account_list::AccountListView,
    confirmations::ConfirmationsView, earning::EarningView, main_layout::MainLayout,
    send_fund::SendFundView,
};

#[derive(Clone, Routable, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[rustfmt::skip]
pub enum Route {
    #[layout(MainLayout)]
        #[route("/")]
        AccountListView {},
        #[route("/accounts/import")]
        AccountImportView {},
        #[route("/transaction/send?:token")]
        SendFundView { token: String },
        #[route("/earning")]
        EarningView {},
        #[route("/confirmations")]
        ConfirmationsView {},
    #[end_layout]
    #[route("/:..route")]
    PageNotFound { route: Vec<String> },
}

static TITLE: &'static str = "Omni Wallet";

#[allow(non_snake_case)]
fn App() -> Element {
    log::debug!("App reload");

    crate::state_management::use_init_services();

    use_drop(|| log::debug!("App Dropped"));

    rsx! {
        document::Title { "{TITLE}" }
        document::Stylesheet { href: asset!("/assets/main.css") }

        div {
            id: "app",
            class: "text-base",
            class: if matches!(prelude::state_management::THEME(), Theme::Dark) { "dark" },
            AlertsContainer {}
            Router::<Route> {}
        }
    }
}

#[component]
fn PageNotFound(route: Vec<String>) -> Element {
    rsx! {
        h1 { "Page not found" }
        p { "We are terribly sorry, but the page you requested doesn't exist." }
        pre { color: "red", "log:\nattemped to navigate to: {route:?}" }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    log::info!("starting app");
    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, WindowBuilder};
        LaunchBuilder::desktop()
            .with_cfg(
                Config::new().with_menu(None).with_window(
                    WindowBuilder::new()
                        .with_title(TITLE)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1280, 800))
                        .with_resizable(true),
                ),
            )
            .launch(App)
    }
    #[cfg(not(feature = "desktop"))]
    {
        LaunchBuilder::new().launch(App)
    }
}
