use crate::prelude::*;

use crate::{
    components::svg::{ContentCopy, DrawSvg, SvgSize::Size5},
    utils::CCStr,
};

#[component]
pub fn CopyToClipboardButtonIcon(value: CCStr, disabled: Option<bool>) -> Element {
    let clipboard_service = state_management::use_clipboard_service();
    rsx! {
        button {
            class: "btn btn-circle btn-xs",
            onclick: move |_| {
                state_management::copy_to_clipboard(clipboard_service, value.as_ref());
            },
            disabled,
            DrawSvg::<ContentCopy> { size: Size5 }
        }
    }
}

/// Address display with its copy shortcut, shortened to fit lists.
#[component]
pub fn CopyableAddress(address: CCStr) -> Element {
    let short = crate::utils::ellipsed_address(&address);
    rsx! {
        div { class: "flex items-center gap-2",
            span { class: "font-mono text-sm", title: "{address}", {short} }
            CopyToClipboardButtonIcon { value: address.clone() }
        }
    }
}
