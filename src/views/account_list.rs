use crate::prelude::*;

use crate::{
    components::{
        copy::CopyableAddress,
        svg::{DrawSvg, Download, Wallet},
    },
    utils::CCStr,
    Route,
};

use super::account_create::SeedPhraseModal;

#[component]
pub fn AccountListView() -> Element {
    log::debug!("AccountListView Rendered");

    let accounts = use_memo(move || state_management::ACCOUNTS());
    let registry = use_memo(move || state_management::REGISTRY());
    let create_modal_open = use_signal(|| false);

    use_drop(|| log::debug!("AccountListView Dropped"));

    rsx! {
        super::TitledView {
            title: CCStr::from("Accounts"),
            subtitle: CCStr::from("Create, import and select the accounts this wallet manages."),
            div { class: "flex flex-col gap-4 max-w-3xl mx-auto",
                if accounts.read().is_empty() {
                    div { class: "text-center text-base-content/60 p-8",
                        "No account yet. Create one from a new recovery phrase, or import an existing one."
                    }
                }
                for account in accounts().into_iter() {
                    AccountCard { account: account.clone(), registry }
                }

                div { class: "flex gap-4 justify-center mt-4",
                    button {
                        class: "btn btn-primary",
                        onclick: {
                            let mut create_modal_open = create_modal_open;
                            move |_| *create_modal_open.write() = true
                        },
                        DrawSvg::<Wallet> {}
                        "Create account"
                    }
                    button {
                        class: "btn btn-primary btn-outline",
                        onclick: move |_| {
                            navigator().push(Route::AccountImportView {});
                        },
                        DrawSvg::<Download> {}
                        "Import account"
                    }
                }
            }

            SeedPhraseModal { is_open: create_modal_open }
        }
    }
}

#[component]
fn AccountCard(account: Account, registry: ReadOnlySignal<RegistrySnapshot>) -> Element {
    let is_selected = use_memo({
        let address = account.address.clone();
        move || {
            state_management::SELECTED_ACCOUNT()
                .is_some_and(|selected| selected == address)
        }
    });

    let origin_network = account
        .origin_genesis_hash
        .as_ref()
        .and_then(|gh| registry.read().find_chain_by_genesis_hash(gh).cloned())
        .map(|c| c.name);

    let select = {
        let address = account.address.clone();
        move |_| {
            *state_management::SELECTED_ACCOUNT.write() = Some(address.clone());
        }
    };

    rsx! {
        div {
            class: "card border shadow-md cursor-pointer hover:border-primary",
            class: if is_selected() { "border-primary" } else { "border-base-content/10" },
            onclick: select,
            div { class: "card-body flex-row items-center justify-between py-4",
                div { class: "flex flex-col gap-1",
                    div { class: "flex items-center gap-2",
                        span { class: "card-title", "{account.name}" }
                        span { class: "badge badge-outline", "{account.kind}" }
                        if account.is_read_only {
                            span { class: "badge badge-ghost", "read-only" }
                        }
                        if let Some(network) = origin_network {
                            span { class: "badge badge-primary badge-outline", {network} }
                        }
                    }
                    CopyableAddress { address: account.address.clone() }
                }
                if is_selected() {
                    span { class: "badge badge-primary", "selected" }
                }
            }
        }
    }
}
