use crate::prelude::*;

use crate::address::AddressKind;
use crate::components::{
    modal::ConfigModal,
    svg::{CheckCircle, DrawSvg},
    word_phrase::WordPhrase,
};

/// Account creation from a freshly generated recovery phrase.
///
/// A new phrase is requested every time the modal opens and wiped as
/// soon as it closes, whatever the outcome: the phrase never outlives
/// the modal.
#[component]
pub fn SeedPhraseModal(is_open: Signal<bool>) -> Element {
    log::debug!("SeedPhraseModal Rendered");

    let keyring_service = state_management::use_keyring_service();

    let mut seed_phrase: Signal<Option<SecretPhrase>> = use_signal(|| None);
    let mut loading = use_signal(|| false);
    let mut create_seed_trigger = use_signal(|| 0u64);
    let mut generations = use_signal(Generations::default);

    use_effect(move || {
        let _ = create_seed_trigger();
        if !is_open() {
            return;
        }
        seed_phrase.set(None);
        let ticket = generations.write().next();
        spawn(async move {
            let created = state_management::create_seed(keyring_service, 12).await;
            if !generations.peek().is_current(ticket) {
                return;
            }
            match created {
                Ok(phrase) => seed_phrase.set(Some(phrase)),
                Err(e) => {
                    log::error!("Could not generate a recovery phrase: {e}");
                    alert_error(e.to_string());
                }
            }
        });
    });

    let mut wipe_and_close = move || {
        seed_phrase.set(None);
        *create_seed_trigger.write() += 1;
        is_open.set(false);
    };

    let on_submit = move |_| async move {
        let Some(phrase) = seed_phrase.peek().clone() else {
            return;
        };
        *loading.write() = true;

        let name = state_management::default_account_name(&state_management::ACCOUNTS.peek());
        match state_management::create_account(
            keyring_service,
            name,
            phrase.as_str().to_owned(),
            vec![AddressKind::Substrate, AddressKind::Evm],
            None,
        )
        .await
        {
            Ok(accounts) => {
                let msg = format!("Account created with {} addresses", accounts.len());
                alert_success(msg.as_str());
                log::info!("{msg}");
            }
            Err(e) => {
                log::error!("Could not create the account: {e}");
                alert_error(e.to_string());
            }
        }

        *loading.write() = false;
        wipe_and_close();
    };

    use_drop(|| log::debug!("SeedPhraseModal Dropped"));

    rsx! {
        ConfigModal {
            is_open,
            title: "Your recovery phrase",
            onclose: move |_| wipe_and_close(),
            div { class: "flex flex-col gap-4 max-w-xl",
                div { class: "text-center text-base-content/60",
                    "Keep your recovery phrase in a safe place, and never disclose it. \
                     Anyone with this phrase can take control of your assets."
                }
                WordPhrase { phrase: seed_phrase }
                button {
                    class: "btn btn-primary w-full",
                    disabled: seed_phrase.read().is_none() || loading(),
                    onclick: on_submit,
                    if loading() {
                        span { class: "loading loading-spinner loading-sm mr-2" }
                        "Creating..."
                    } else {
                        DrawSvg::<CheckCircle> {}
                        "I have saved it somewhere safe"
                    }
                }
            }
        }
    }
}
