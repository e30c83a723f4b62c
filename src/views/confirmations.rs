use crate::prelude::*;

use crate::{
    components::svg::{Cancel, CheckCircle, DrawSvg},
    utils::{timestamp_to_string, CCStr},
};

/// Queue of pending signing requests. Approving or rejecting resolves
/// the request through the bridge and unblocks the transaction that
/// raised it.
#[component]
pub fn ConfirmationsView() -> Element {
    log::debug!("ConfirmationsView Rendered");

    let confirmations = use_memo(move || state_management::PENDING_CONFIRMATIONS());

    use_drop(|| log::debug!("ConfirmationsView Dropped"));

    rsx! {
        super::TitledView {
            title: CCStr::from("Confirmations"),
            subtitle: CCStr::from("Review and sign the requests waiting for your approval."),
            div { class: "flex flex-col gap-4 max-w-2xl mx-auto",
                if confirmations.read().is_empty() {
                    div { class: "text-center text-base-content/60 p-8",
                        "No pending request."
                    }
                }
                for confirmation in confirmations().into_iter() {
                    ConfirmationCard { confirmation }
                }
            }
        }
    }
}

#[component]
fn ConfirmationCard(confirmation: ConfirmationRequest) -> Element {
    let bridge_service = state_management::use_bridge_service();
    let mut resolving = use_signal(|| false);

    let payload = serde_json::to_string_pretty(&confirmation.payload)
        .unwrap_or_else(|_| confirmation.payload.to_string());

    let resolve = {
        let id = confirmation.id.clone();
        move |approved: bool| {
            let id = id.clone();
            async move {
                *resolving.write() = true;
                match state_management::complete_confirmation(bridge_service, id, approved).await {
                    Ok(()) => {
                        if approved {
                            alert_success("Request approved");
                        } else {
                            alert_info("Request rejected");
                        }
                    }
                    Err(e) => {
                        log::error!("Could not complete the confirmation: {e}");
                        alert_error(e.to_string());
                        *resolving.write() = false;
                    }
                }
                // On success the card disappears with the queue entry
            }
        }
    };

    rsx! {
        div { class: "card border border-base-content/10 shadow-md",
            div { class: "card-body",
                div { class: "flex items-center justify-between",
                    h2 { class: "card-title", "Signature request" }
                    span { class: "badge badge-outline capitalize", "{confirmation.origin}" }
                }
                div { class: "text-xs text-base-content/60",
                    "Requested at {timestamp_to_string(confirmation.requested_at)}"
                }
                pre { class: "bg-base-200 rounded-lg p-4 text-xs font-mono overflow-x-auto",
                    {payload}
                }
                div { class: "card-actions justify-end",
                    button {
                        class: "btn btn-outline",
                        disabled: resolving(),
                        onclick: {
                            let resolve = resolve.clone();
                            move |_| resolve(false)
                        },
                        DrawSvg::<Cancel> {}
                        "Reject"
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: resolving(),
                        onclick: {
                            let resolve = resolve.clone();
                            move |_| resolve(true)
                        },
                        if resolving() {
                            span { class: "loading loading-spinner loading-sm mr-2" }
                            "Signing..."
                        } else {
                            DrawSvg::<CheckCircle> {}
                            "Approve"
                        }
                    }
                }
            }
        }
    }
}
