use crate::prelude::*;

use crate::{
    components::{
        balance::FreeBalanceDisplay,
        inputs::{AccountSelect, AddressField, AmountField, ChainSelect, TokenSelect},
        svg::{DrawSvg, Send},
    },
    draft::TransferDraft,
    utils::CCStr,
    Route,
};

/// Same-chain and cross-chain transfer form.
///
/// `token` optionally restricts the token selector to one token or one
/// multi-chain asset group (e.g. when coming from a token detail
/// screen).
#[component]
pub fn SendFundView(token: String) -> Element {
    log::debug!("SendFundView Rendered");

    let bridge_service = state_management::use_bridge_service();

    // Captured once on mount, like the navigation parameter it is
    let token_group_slug = use_hook(|| (!token.is_empty()).then(|| CCStr::from(token.as_str())));

    // The transfer draft, split into field signals. It lives only in
    // this view and is discarded on navigation.
    let mut from = use_signal(|| {
        state_management::SELECTED_ACCOUNT
            .peek()
            .clone()
            .unwrap_or_default()
    });
    let mut token_slug = use_signal(CCStr::default);
    let mut chain = use_signal(CCStr::default);
    let mut dest_chain = use_signal(CCStr::default);
    let mut to = use_signal(String::new);
    let value = use_signal(String::new);

    let mut loading = use_signal(|| false);
    let mut ignore_warnings = use_signal(|| false);

    let registry = use_memo(move || state_management::REGISTRY());
    let accounts = use_memo(move || state_management::ACCOUNTS());

    let token_items = use_memo({
        let token_group_slug = token_group_slug.clone();
        move || {
            state_management::token_items(
                &from(),
                &accounts.read(),
                &registry.read(),
                token_group_slug.as_deref(),
            )
        }
    });

    let dest_chain_items =
        use_memo(move || state_management::token_destinations(&token_slug(), &registry.read()));

    let decimals = use_memo(move || registry.read().asset_decimals(&token_slug()));

    // The selected account can arrive after the form when the keyring
    // is still loading on a direct navigation
    use_effect(move || {
        if let Some(selected) = state_management::SELECTED_ACCOUNT() {
            if from.peek().is_empty() {
                from.set(selected);
            }
        }
    });

    // Token auto-selection: runs when no token is selected yet, or when
    // the current one drops out of the filtered list.
    use_effect(move || {
        let items = token_items();
        if items.is_empty() {
            return;
        }
        let current = token_slug.peek().clone();
        if !current.is_empty() && items.iter().any(|i| i.slug == current) {
            return;
        }

        let selected = {
            let registry = registry.peek();
            let accounts = accounts.peek();
            let account = Account::find(&accounts, &from.peek());
            state_management::default_token(account, &items, &registry).cloned()
        };
        if let Some(item) = selected {
            token_slug.set(item.slug.clone());
            chain.set(item.origin_chain.clone());
            dest_chain.set(item.origin_chain.clone());
        }
    });

    // A new sender, token or destination invalidates the recipient
    use_effect(move || {
        let _ = (from(), token_slug(), dest_chain());
        to.set(String::new());
    });

    // Any field change voids a previously armed warning override
    use_effect(move || {
        let _ = (from(), token_slug(), dest_chain(), to(), value());
        ignore_warnings.set(false);
    });

    // The selected token dictates the origin chain, and resets the
    // destination to a same-chain transfer.
    use_effect(move || {
        let token_slug = token_slug();
        if let Some(asset) = registry.peek().asset(&token_slug) {
            chain.set(asset.origin_chain.clone());
            dest_chain.set(asset.origin_chain.clone());
        }
    });

    let recipient_error = use_memo(move || {
        let is_same_chain = chain() == dest_chain();
        let dest_is_evm = registry.read().is_chain_evm(&dest_chain());
        crate::draft::validate_recipient(&from(), &to(), is_same_chain, dest_is_evm)
            .err()
            .map(|e| CCStr::from(e.to_string()))
    });

    let amount_error = use_memo(move || {
        crate::draft::validate_amount(&value())
            .err()
            .map(|e| CCStr::from(e.to_string()))
    });

    let form_valid = use_memo(move || {
        !token_slug.read().is_empty()
            && recipient_error.read().is_none()
            && amount_error.read().is_none()
    });

    let max_transfer = helper_hooks::use_free_balance(from.into(), token_slug.into());
    let max_value = use_memo(move || max_transfer().map(|fb| fb.value.clone()));

    let submit = move |_| async move {
        if *loading.peek() {
            return;
        }

        if Account::find(&accounts.peek(), &from.peek()).is_some_and(|a| a.is_read_only) {
            alert_error("The account you are using is read-only, you cannot send assets with it");
            return;
        }

        let draft = TransferDraft {
            from: from.peek().clone(),
            token: token_slug.peek().clone(),
            chain: chain.peek().clone(),
            dest_chain: dest_chain.peek().clone(),
            to: to.peek().clone(),
            value: value.peek().clone(),
        };
        let dest_is_evm = registry.peek().is_chain_evm(&draft.dest_chain);
        if let Err(e) = draft.validate(dest_is_evm) {
            alert_error(e.to_string());
            return;
        }

        *loading.write() = true;
        let with_warnings = *ignore_warnings.peek();

        let response = if draft.is_same_chain() {
            state_management::make_transfer(
                bridge_service,
                TransferRequest {
                    from: draft.from.clone(),
                    to: CCStr::from(draft.to.as_str()),
                    network_key: draft.chain.clone(),
                    token_slug: draft.token.clone(),
                    value: CCStr::from(draft.value.as_str()),
                    ignore_warnings: with_warnings,
                },
            )
            .await
        } else {
            state_management::make_cross_chain_transfer(
                bridge_service,
                CrossChainTransferRequest {
                    from: draft.from.clone(),
                    to: CCStr::from(draft.to.as_str()),
                    origin_network_key: draft.chain.clone(),
                    destination_network_key: draft.dest_chain.clone(),
                    token_slug: draft.token.clone(),
                    value: CCStr::from(draft.value.as_str()),
                    ignore_warnings: with_warnings,
                },
            )
            .await
        };

        if let Some(error) = response.errors.first() {
            log::error!("Transfer failed: {error}");
            alert_error(error.clone());
        } else if let Some(warning) = response.warnings.first() {
            log::warn!("Transfer warning: {warning}");
            alert_warn(warning.clone());
            ignore_warnings.set(true);
        } else if let Some(extrinsic_hash) = response.extrinsic_hash {
            let msg = format!("Transfer submitted: {extrinsic_hash}");
            alert_success(msg.as_str());
            log::info!("{msg}");
            navigator().push(Route::AccountListView {});
        }

        *loading.write() = false;
    };

    use_drop(|| log::debug!("SendFundView Dropped"));

    rsx! {
        super::TitledView {
            title: CCStr::from("Transfer"),
            subtitle: CCStr::from("You are doing a token transfer with the following information."),
            div { class: "flex flex-col gap-2 max-w-2xl mx-auto",
                AccountSelect {
                    title: "Send from account",
                    accounts,
                    value: from,
                    disabled: accounts.read().is_empty(),
                }

                div { class: "grid grid-cols-2 gap-4",
                    TokenSelect {
                        title: "Token",
                        items: token_items,
                        value: token_slug,
                        disabled: token_items.read().is_empty(),
                    }
                    AmountField {
                        title: "Amount",
                        decimals,
                        value,
                        max_value,
                        value_error: amount_error,
                    }
                }

                AddressField {
                    title: "Send to account",
                    value: to,
                    placeholder: "Recipient address",
                    value_error: recipient_error,
                }

                ChainSelect {
                    title: "Destination chain",
                    items: dest_chain_items,
                    value: dest_chain,
                    disabled: dest_chain_items.read().is_empty(),
                }

                FreeBalanceDisplay { address: from, token_slug }

                button {
                    class: "btn btn-primary mt-4",
                    disabled: loading() || !form_valid(),
                    onclick: submit,
                    if loading() {
                        span { class: "loading loading-spinner loading-sm mr-2" }
                        "Transferring..."
                    } else {
                        DrawSvg::<Send> {}
                        "Transfer"
                    }
                }
            }
        }
    }
}
