use crate::prelude::*;

use crate::{
    components::svg::{DrawSvg, Moon, Sun, SvgSize::Size5},
    Route,
};

#[component]
pub fn MainLayout() -> Element {
    log::debug!("MainLayout reload");

    use_drop(|| log::debug!("MainLayout Dropped"));

    rsx! {
        div { class: "relative min-h-dvh",
            header { class: "bg-base-100 fixed top-0 w-full z-20 shadow-lg shadow-base-content/10",
                NavBar {}
            }
            main { class: "pt-16 pb-16 mx-8", Outlet::<Route> {} }
            footer { class: "absolute bottom-px w-full h-12 px-8 z-0",
                div { class: "h-px border-t border-solid border-gray-500" }
                Footer {}
            }
        }
    }
}

#[component]
fn NavBar() -> Element {
    let pending_count = use_memo(move || state_management::PENDING_CONFIRMATIONS().len());
    let selected_account = helper_hooks::use_memo_selected_account();

    rsx! {
        div { class: "navbar",
            div { class: "navbar-start flex items-center gap-2",
                Link { class: "text-xl font-black px-2", to: Route::AccountListView {}, "Omni Wallet" }
                if let Some(account) = selected_account() {
                    span { class: "badge badge-outline", "{account.name}" }
                }
            }
            div { class: "navbar-center flex gap-2",
                Link { class: "btn btn-ghost", to: Route::AccountListView {}, "Accounts" }
                Link {
                    class: "btn btn-ghost",
                    to: Route::SendFundView { token: String::new() },
                    "Send"
                }
                Link { class: "btn btn-ghost", to: Route::EarningView {}, "Earning" }
                Link {
                    class: "btn btn-ghost",
                    to: Route::ConfirmationsView {},
                    "Confirmations"
                    if pending_count() > 0 {
                        span { class: "badge badge-warning", "{pending_count()}" }
                    }
                }
            }
            div { class: "navbar-end",
                ThemeSwitcher {}
            }
        }
    }
}

#[component]
fn ThemeSwitcher() -> Element {
    let toggle = move |_| {
        let next = match *state_management::THEME.peek() {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        *state_management::THEME.write() = next;
    };

    rsx! {
        button { class: "btn btn-ghost btn-circle", onclick: toggle,
            if matches!(state_management::THEME(), Theme::Dark) {
                DrawSvg::<Sun> { size: Size5 }
            } else {
                DrawSvg::<Moon> { size: Size5 }
            }
        }
    }
}

#[component]
fn Footer() -> Element {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    rsx! {
        div { class: "h-full flex items-center justify-between text-xs text-base-content/60",
            div { "Omni Wallet v{VERSION}" }
            div { "All operations stay on this device." }
        }
    }
}
