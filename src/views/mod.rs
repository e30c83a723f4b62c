use crate::prelude::*;

use crate::utils::CCStr;

pub mod account_create;
pub mod account_import;
pub mod account_list;
pub mod confirmations;
pub mod earning;
pub mod main_layout;
pub mod send_fund;

#[component]
fn TitledView(
    title: CCStr,
    subtitle: CCStr,
    left: Option<Element>,
    right: Option<Element>,
    children: Element,
) -> Element {
    rsx! {
        div { class: "flex justify-evenly gap-4",
            div { class: "w-1/2 flex justify-start", {left} }
            div { class: "shrink-0",
                h1 { class: "text-6xl font-black text-center", {title} }
                h2 { class: "text-base font-light text-center", {subtitle} }
            }
            div { class: "w-1/2 flex justify-end", {right} }
        }
        div { class: "mb-4 h-px border-t border-solid border-gray-500" }
        {children}
    }
}
