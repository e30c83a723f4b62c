use crate::prelude::*;

use crate::{
    address::AddressKind,
    components::{
        inputs::{use_future_error_feedback, InputField, RadioChoice, RadioChoices, SelectField},
        misc::BackButton,
        svg::{DrawSvg, Download},
    },
    utils::CCStr,
    Route,
};

fn build_suri(seed: &str, path: &str) -> String {
    let seed = seed.trim();
    let path = path.trim();
    if path.is_empty() {
        seed.to_owned()
    } else {
        format!("{seed}//{path}")
    }
}

/// Import an account from an existing mnemonic, with an optional hard
/// derivation path and network binding.
#[component]
pub fn AccountImportView() -> Element {
    log::debug!("AccountImportView Rendered");

    let keyring_service = state_management::use_keyring_service();
    let registry = use_memo(move || state_management::REGISTRY());

    let mut seed = use_signal(String::new);
    let path = use_signal(String::new);
    let mut advanced = use_signal(|| false);
    let genesis = use_signal(CCStr::default);
    let kind = use_signal(|| AddressKind::Substrate);
    let name = use_signal(String::new);

    let mut validated: Signal<Option<ValidatedAccount>> = use_signal(|| None);
    let mut seed_error: Signal<Option<CCStr>> = use_signal(|| None);
    let mut importing = use_signal(|| false);
    let mut generations = use_signal(Generations::default);

    // Live validation through the keyring; the latest input wins, a
    // superseded validation response is discarded.
    use_effect(move || {
        let suri = build_suri(&seed(), &path());
        let kind = kind();
        let has_path = !path.peek().trim().is_empty();
        let ticket = generations.write().next();

        if seed.peek().trim().is_empty() {
            validated.set(None);
            seed_error.set(None);
            return;
        }

        spawn(async move {
            let result = state_management::validate_seed(keyring_service, suri, kind).await;
            if !generations.peek().is_current(ticket) {
                return;
            }
            match result {
                Ok(account) => {
                    validated.set(Some(account));
                    seed_error.set(None);
                }
                Err(_) => {
                    validated.set(None);
                    seed_error.set(Some(CCStr::from(if has_path {
                        "Invalid mnemonic seed or derivation path"
                    } else {
                        "Invalid mnemonic seed"
                    })));
                }
            }
        });
    });

    let genesis_options = use_memo(move || {
        let mut options = vec![(CCStr::default(), "Any network".to_owned())];
        let mut chains: Vec<_> = registry
            .read()
            .chain_info_map
            .values()
            .filter(|c| !c.evm_compatible)
            .cloned()
            .collect();
        chains.sort_by(|a, b| a.name.cmp(&b.name));
        options.extend(
            chains
                .into_iter()
                .map(|c| (c.genesis_hash.clone(), c.name.to_string())),
        );
        options
    });

    let name_error = use_memo(move || {
        name.read()
            .trim()
            .is_empty()
            .then(|| CCStr::from("Account name is required"))
    });

    let can_import =
        use_memo(move || validated.read().is_some() && name_error.read().is_none() && !importing());

    let (seed_error_display, mut signal_activity, onfocusout) =
        use_future_error_feedback(seed_error.into());

    let on_import = move |_| async move {
        *importing.write() = true;

        let suri = build_suri(&seed.peek(), &path.peek());
        let origin_genesis_hash = {
            let genesis = genesis.peek();
            (!genesis.is_empty()).then(|| genesis.clone())
        };
        match state_management::create_account(
            keyring_service,
            name.peek().clone(),
            suri,
            vec![*kind.peek()],
            origin_genesis_hash,
        )
        .await
        {
            Ok(_) => {
                alert_success("Account imported");
                log::info!("Account imported");
                navigator().push(Route::AccountListView {});
            }
            Err(e) => {
                log::error!("Could not import the account: {e}");
                alert_error(e.to_string());
            }
        }

        *importing.write() = false;
    };

    use_drop(|| log::debug!("AccountImportView Dropped"));

    rsx! {
        super::TitledView {
            title: CCStr::from("Import Account"),
            subtitle: CCStr::from("Restore an account from its recovery phrase."),
            left: rsx! {
                BackButton { route: Route::AccountListView {} }
            },
            div { class: "flex flex-col gap-4 max-w-2xl mx-auto",
                fieldset { class: "fieldset",
                    legend { class: "fieldset-legend", "Existing 12 or 24-word mnemonic seed" }
                    textarea {
                        class: "textarea textarea-bordered font-mono w-full",
                        class: if seed_error_display().is_some() { "textarea-error" },
                        rows: "3",
                        placeholder: "Enter your recovery phrase...",
                        value: "{seed}",
                        oninput: move |evt| {
                            signal_activity();
                            seed.set(evt.value());
                        },
                        onfocusout,
                    }
                    div {
                        class: "fieldset-label",
                        class: if seed_error_display().is_some() { "text-error" },
                        if let Some(e) = seed_error_display() {
                            {e}
                        } else if let Some(account) = validated() {
                            "Address: {account.address}"
                        } else {
                            "The words are separated by single spaces."
                        }
                    }
                }

                RadioChoices { count: 2,
                    RadioChoice::<AddressKind> {
                        name: "account-type",
                        state: kind,
                        value: AddressKind::Substrate,
                        title: "Substrate",
                        subtitle: "SS58 address, for Polkadot-family networks.",
                    }
                    RadioChoice::<AddressKind> {
                        name: "account-type",
                        state: kind,
                        value: AddressKind::Evm,
                        title: "EVM",
                        subtitle: "0x address, for EVM-compatible networks.",
                    }
                }

                SelectField {
                    title: "Network",
                    items: genesis_options(),
                    value: genesis,
                }

                div {
                    class: "cursor-pointer text-base-content/60 uppercase text-sm",
                    onclick: move |_| {
                        let toggled = !*advanced.peek();
                        advanced.set(toggled);
                    },
                    if advanced() { "▼ advanced" } else { "▶ advanced" }
                }
                if advanced() {
                    InputField::<String> {
                        title: "Derivation path",
                        value: path,
                        placeholder: "e.g. stash",
                        value_error: None::<CCStr>,
                    }
                }

                InputField::<String> {
                    title: "Account name",
                    value: name,
                    placeholder: "A display name for this account...",
                    value_error: name_error,
                }

                button {
                    class: "btn btn-primary",
                    disabled: !can_import(),
                    onclick: on_import,
                    if importing() {
                        span { class: "loading loading-spinner loading-sm mr-2" }
                        "Importing..."
                    } else {
                        DrawSvg::<Download> {}
                        "Import"
                    }
                }
            }
        }
    }
}
