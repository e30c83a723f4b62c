use crate::prelude::*;

use crate::components::svg::{ArrowLeft, DrawSvg, SvgSize::Custom};

/// Reusable back button component for navigation
#[component]
pub fn BackButton(route: crate::Route) -> Element {
    let click_back = move |_| {
        navigator().push(route.clone());
    };

    rsx! {
        div { class: "h-full content-center",
            button {
                class: "btn btn-outline btn-primary btn-lg",
                onclick: click_back,
                DrawSvg::<ArrowLeft> { size: Custom("h-full") }
                "Back"
            }
        }
    }
}

#[component]
pub fn Teleport(children: Element) -> Element {
    let id = use_hook(uuid::Uuid::new_v4);

    log::debug!("Teleport {id} Rendered");

    use_effect(move || {
        document::eval(&format!(
            r#"
            const div_to_tp = document.getElementById("{id}");
            const div_app = document.getElementById("app");
            div_app.append(div_to_tp);
        "#
        ));
    });

    use_drop(move || {
        log::debug!("Teleport {id} Dropped");
        document::eval(&format!(
            r#"
            const div_to_tp = document.getElementById("{id}");
            const div_orig_parent = document.getElementById("parent_{id}");
            div_orig_parent.append(div_to_tp);
        "#
        ));
    });

    rsx! {
        div { id: "parent_{id}", class: "fixed",
            div { id: "{id}", {children} }
        }
    }
}
