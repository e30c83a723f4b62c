use crate::prelude::*;

use crate::amount::to_display_units;
use crate::utils::CCStr;

/// Transferable balance of the sender for the selected token, fed by
/// the stale-guarded balance fetch.
#[component]
pub fn FreeBalanceDisplay(
    address: ReadOnlySignal<CCStr>,
    token_slug: ReadOnlySignal<CCStr>,
) -> Element {
    let balance = helper_hooks::use_free_balance(address, token_slug);

    rsx! {
        div { class: "text-sm text-base-content/60 flex items-center gap-1",
            "Sender transferable balance:"
            if let Some(fb) = balance() {
                span { class: "font-semibold text-base-content",
                    "{to_display_units(&fb.value, fb.decimals)} {fb.symbol}"
                }
            } else {
                span { class: "loading loading-dots loading-xs" }
            }
        }
    }
}
