use crate::prelude::*;

use crate::components::svg::{ContentCopy, DrawSvg, SvgSize::Size5};

/// Recovery phrase word grid. The phrase only ever lives in the state
/// of the modal displaying it.
#[component]
pub fn WordPhrase(phrase: ReadOnlySignal<Option<SecretPhrase>>) -> Element {
    let clipboard_service = state_management::use_clipboard_service();

    rsx! {
        div { class: "flex flex-col gap-4",
            if let Some(phrase) = phrase() {
                div { class: "grid grid-cols-2 sm:grid-cols-3 gap-2",
                    for (index, word) in phrase.words().enumerate() {
                        div { class: "flex items-center gap-2 border border-base-content/20 rounded-lg px-3 py-1",
                            span { class: "text-xs text-base-content/40", "{index + 1}" }
                            span { class: "font-mono", "{word}" }
                        }
                    }
                }
                button {
                    class: "btn btn-ghost btn-sm self-center",
                    onclick: {
                        let phrase = phrase.clone();
                        move |_| {
                            state_management::copy_to_clipboard(clipboard_service, phrase.as_str());
                        }
                    },
                    DrawSvg::<ContentCopy> { size: Size5 }
                    "Copy to clipboard"
                }
            } else {
                div { class: "flex justify-center p-8",
                    span { class: "loading loading-spinner loading-lg" }
                }
            }
        }
    }
}
