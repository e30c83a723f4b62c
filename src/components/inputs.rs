use crate::prelude::*;

use std::time::Duration;

use crate::amount::{to_base_units, to_display_units};
use crate::utils::{timestamp_now, CCStr};

#[component]
pub fn RadioChoices(count: usize, children: Element) -> Element {
    let grid_classes = match count {
        2 => "grid-rows-2 grid-cols-1 sm:grid-rows-1 sm:grid-cols-2",
        3 => "grid-rows-3 grid-cols-1 lg:grid-rows-1 lg:grid-cols-3",
        _ => "grid-cols-1 lg:grid-cols-3",
    };
    rsx! {
        div { class: "grid {grid_classes} gap-4", {children} }
    }
}

#[component]
pub fn RadioChoice<T: 'static + Clone + Copy + PartialEq>(
    name: &'static str,
    state: Signal<T>,
    value: T,
    title: &'static str,
    subtitle: &'static str,
    disabled: Option<bool>,
) -> Element {
    rsx! {
        label { class: "label has-[input:disabled]:cursor-not-allowed border rounded-lg p-4 hover:bg-base-200",
            input {
                r#type: "radio",
                name,
                class: "radio radio-primary",
                checked: state() == value,
                onchange: move |_| state.set(value),
                disabled,
            }
            div { class: "ml-3",
                span { class: "text-xl text-base-content font-semibold", {title} }
                div { class: "text-base text-base-content/60 text-wrap", {subtitle} }
            }
        }
    }
}

#[component]
pub fn InputField<T: 'static + Clone + PartialEq + core::fmt::Display + core::str::FromStr>(
    title: Option<&'static str>,
    description: Option<&'static str>,
    value: Signal<T>,
    r#type: Option<&'static str>,
    placeholder: Option<&'static str>,
    value_error: ReadOnlySignal<Option<CCStr>>,
) -> Element {
    let (error_display, mut signal_activity, onfocusout) = use_future_error_feedback(value_error);

    rsx! {
        fieldset { class: "fieldset",
            if let Some(title) = title {
                legend { class: "fieldset-legend", {title} }
            }
            if let Some(description) = description {
                div { class: "fieldset-description", {description} }
            }
            input {
                r#type: r#type.unwrap_or("text"),
                class: "input w-full",
                class: if error_display().is_some() { "input-error" },
                placeholder,
                value: "{value.read()}",
                oninput: move |evt| {
                    signal_activity();
                    if let Ok(v) = evt.parsed() {
                        value.set(v)
                    }
                },
                onfocusout,
            }
            div {
                class: "fieldset-label text-error",
                class: if error_display().is_none() { "invisible" },
                if let Some(e) = error_display() {
                    {e}
                } else {
                    "ph"
                }
            }
        }
    }
}

/// Amount input editing a human-readable decimal while the form state
/// carries base units. The conversion happens on every keystroke; the
/// Max shortcut injects the fetched transferable balance.
#[component]
pub fn AmountField(
    title: Option<&'static str>,
    decimals: ReadOnlySignal<u32>,
    /// Base units; empty until the displayed text converts cleanly.
    value: Signal<String>,
    max_value: ReadOnlySignal<Option<CCStr>>,
    #[props(default = true)] show_max_button: bool,
    value_error: ReadOnlySignal<Option<CCStr>>,
) -> Element {
    let mut display_value = use_signal(String::new);
    let (error_display, mut signal_activity, onfocusout) = use_future_error_feedback(value_error);

    // A token change brings its own precision: re-derive the base-unit
    // value from the text currently displayed.
    use_effect(move || {
        let decimals = decimals();
        let base = to_base_units(&display_value.peek(), decimals).unwrap_or_default();
        if *value.peek() != base {
            value.set(base);
        }
    });

    let on_max = move |_| {
        if let Some(max) = max_value() {
            signal_activity();
            display_value.set(to_display_units(&max, decimals()));
            value.set(max.to_string());
        }
    };

    rsx! {
        fieldset { class: "fieldset",
            if let Some(title) = title {
                legend { class: "fieldset-legend", {title} }
            }
            div { class: "relative w-full",
                input {
                    r#type: "text",
                    inputmode: "decimal",
                    class: "input w-full pr-14",
                    class: if error_display().is_some() { "input-error" },
                    placeholder: "Amount",
                    value: "{display_value}",
                    oninput: move |evt| {
                        signal_activity();
                        let text = evt.value();
                        value.set(to_base_units(&text, decimals()).unwrap_or_default());
                        display_value.set(text);
                    },
                    onfocusout,
                }
                if show_max_button {
                    button {
                        r#type: "button",
                        class: "btn btn-ghost btn-xs absolute top-2 right-2 text-success",
                        disabled: max_value().is_none(),
                        onclick: on_max,
                        "Max"
                    }
                }
            }
            div {
                class: "fieldset-label text-error",
                class: if error_display().is_none() { "invisible" },
                if let Some(e) = error_display() {
                    {e}
                } else {
                    "ph"
                }
            }
        }
    }
}

#[component]
pub fn AddressField(
    title: Option<&'static str>,
    value: Signal<String>,
    placeholder: Option<&'static str>,
    value_error: ReadOnlySignal<Option<CCStr>>,
) -> Element {
    let (error_display, mut signal_activity, onfocusout) = use_future_error_feedback(value_error);

    rsx! {
        fieldset { class: "fieldset",
            if let Some(title) = title {
                legend { class: "fieldset-legend", {title} }
            }
            input {
                r#type: "text",
                class: "input font-mono w-full",
                class: if error_display().is_some() { "input-error" },
                placeholder: placeholder.unwrap_or("Address"),
                value: "{value.read()}",
                oninput: move |evt| {
                    signal_activity();
                    value.set(evt.value().trim().to_owned());
                },
                onfocusout,
            }
            div {
                class: "fieldset-label text-error",
                class: if error_display().is_none() { "invisible" },
                if let Some(e) = error_display() {
                    {e}
                } else {
                    "ph"
                }
            }
        }
    }
}

/// Dropdown over (value, label) pairs.
#[component]
pub fn SelectField(
    title: Option<&'static str>,
    items: Vec<(CCStr, String)>,
    value: Signal<CCStr>,
    disabled: Option<bool>,
    placeholder: Option<&'static str>,
) -> Element {
    rsx! {
        fieldset { class: "fieldset",
            if let Some(title) = title {
                legend { class: "fieldset-legend", {title} }
            }
            select {
                class: "select w-full",
                disabled,
                onchange: move |evt| value.set(CCStr::from(evt.value())),
                if let Some(placeholder) = placeholder {
                    option { value: "", disabled: true, selected: value.read().is_empty(), {placeholder} }
                }
                for (item_value, label) in items.iter() {
                    option {
                        key: "{item_value}",
                        value: "{item_value}",
                        selected: **value.read() == **item_value,
                        "{label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn AccountSelect(
    title: Option<&'static str>,
    accounts: ReadOnlySignal<Vec<Account>>,
    value: Signal<CCStr>,
    disabled: Option<bool>,
) -> Element {
    let items = use_memo(move || {
        accounts
            .read()
            .iter()
            .map(|a| {
                (
                    a.address.clone(),
                    format!("{} ({})", a.name, crate::utils::ellipsed_address(&a.address)),
                )
            })
            .collect::<Vec<_>>()
    });
    rsx! {
        SelectField {
            title,
            items: items(),
            value,
            disabled,
            placeholder: "Select account",
        }
    }
}

#[component]
pub fn TokenSelect(
    title: Option<&'static str>,
    items: ReadOnlySignal<Vec<TokenItem>>,
    value: Signal<CCStr>,
    disabled: Option<bool>,
) -> Element {
    let items = use_memo(move || {
        items
            .read()
            .iter()
            .map(|i| (i.slug.clone(), format!("{} ({})", i.symbol, i.origin_chain)))
            .collect::<Vec<_>>()
    });
    rsx! {
        SelectField {
            title,
            items: items(),
            value,
            disabled,
            placeholder: "Select token",
        }
    }
}

#[component]
pub fn ChainSelect(
    title: Option<&'static str>,
    items: ReadOnlySignal<Vec<ChainItem>>,
    value: Signal<CCStr>,
    disabled: Option<bool>,
) -> Element {
    let items = use_memo(move || {
        items
            .read()
            .iter()
            .map(|i| (i.slug.clone(), i.name.to_string()))
            .collect::<Vec<_>>()
    });
    rsx! {
        SelectField {
            title,
            items: items(),
            value,
            disabled,
            placeholder: "Select chain",
        }
    }
}

pub fn use_future_error_feedback(
    value_error: ReadOnlySignal<Option<CCStr>>,
) -> (
    Memo<Option<CCStr>>,
    impl FnMut() + Copy,
    impl FnMut(Event<FocusData>) + Copy,
) {
    use_future_error_feedback_with_delay(value_error, 2)
}
pub fn use_future_error_feedback_with_delay(
    value_error: ReadOnlySignal<Option<CCStr>>,
    delay_sec: u64,
) -> (
    Memo<Option<CCStr>>,
    impl FnMut() + Copy,
    impl FnMut(Event<FocusData>) + Copy,
) {
    let (feed_back_active, signal_activity, onfocusout) = use_future_feedback_with_delay(delay_sec);
    let error_display = use_memo(move || feed_back_active().then(|| value_error()).flatten());
    (error_display, signal_activity, onfocusout)
}

/// Defers validation feedback until the user pauses for `delay_sec` or
/// leaves the field, so half-typed values are not flagged as errors.
pub fn use_future_feedback_with_delay(
    delay_sec: u64,
) -> (
    Memo<bool>,
    impl FnMut() + Copy,
    impl FnMut(Event<FocusData>) + Copy,
) {
    let mut last_activity_ts = use_signal(|| None);
    let mut timed_feedback = use_signal(|| false);
    let mut immediate_feedback = use_signal(|| false);
    use_future(move || async move {
        loop {
            if last_activity_ts().is_some_and(|ts| ts + delay_sec < timestamp_now()) {
                if !timed_feedback() {
                    *timed_feedback.write() = true;
                }
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    });

    let feed_back_active = use_memo(move || (timed_feedback() || immediate_feedback()));
    let signal_activity = move || {
        *last_activity_ts.write() = Some(timestamp_now());
        if immediate_feedback() {
            *immediate_feedback.write() = false;
        }
        if timed_feedback() {
            *timed_feedback.write() = false;
        }
    };
    let onfocusout = move |_| *immediate_feedback.write() = true;
    (feed_back_active, signal_activity, onfocusout)
}
