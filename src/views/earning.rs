use crate::prelude::*;

use crate::{
    amount::to_display_units,
    components::{
        inputs::{AmountField, SelectField},
        modal::InfoModal,
        svg::{Calculator, DrawSvg, PlusCircle},
    },
    rewards::{calculate_reward, CompoundingPeriod, ExpectedEarning},
    utils::{timestamp_to_date_string, CCStr},
    Route,
};

/// Staking overview: per-chain positions joined with rewards and
/// unlocking schedules, plus the earning calculator.
#[component]
pub fn EarningView() -> Element {
    log::debug!("EarningView Rendered");

    let network_key = use_signal(|| CCStr::from(ALL_NETWORK_KEY));
    let summary = helper_hooks::use_memo_staking_summary(network_key.into());
    let calculator_open = use_signal(|| false);

    let network_options = use_memo(move || {
        let mut options = vec![(CCStr::from(ALL_NETWORK_KEY), "All networks".to_owned())];
        let mut chains: Vec<_> = state_management::STAKING()
            .pool_info
            .values()
            .map(|p| p.chain.clone())
            .collect();
        chains.sort();
        chains.dedup();
        options.extend(chains.into_iter().map(|c| {
            let label = c.to_string();
            (c, label)
        }));
        options
    });

    use_drop(|| log::debug!("EarningView Dropped"));

    rsx! {
        super::TitledView {
            title: CCStr::from("Earning"),
            subtitle: CCStr::from("Your staked positions and projected rewards."),
            right: rsx! {
                div { class: "h-full content-center",
                    button {
                        class: "btn btn-primary btn-lg",
                        onclick: {
                            let mut calculator_open = calculator_open;
                            move |_| *calculator_open.write() = true
                        },
                        DrawSvg::<Calculator> {}
                        "Staking calculator"
                    }
                }
            },
            div { class: "flex flex-col gap-4 max-w-4xl mx-auto",
                div { class: "w-64",
                    SelectField {
                        title: "Network",
                        items: network_options(),
                        value: network_key,
                    }
                }

                if summary.read().loading {
                    div { class: "flex justify-center p-8",
                        span { class: "loading loading-spinner loading-lg" }
                    }
                } else if summary.read().data.is_empty() {
                    div { class: "text-center text-base-content/60 p-8",
                        "No staked position on this network."
                    }
                } else {
                    table { class: "table",
                        thead {
                            tr {
                                th { "Network" }
                                th { "Staked" }
                                th { "Rewards" }
                                th { "Unlocking" }
                                th { "Value" }
                            }
                        }
                        tbody {
                            for entry in summary().data.into_iter() {
                                StakingRow { entry: entry.clone(), price_map: summary().price_map.clone() }
                            }
                        }
                    }
                }
            }

            EarningCalculatorModal { is_open: calculator_open }
        }
    }
}

#[component]
fn StakingRow(
    entry: StakingData,
    price_map: std::collections::HashMap<CCStr, f64>,
) -> Element {
    let staked: f64 = entry.staking.balance.parse().unwrap_or_default();
    let fiat_value = price_map
        .get(&entry.staking.chain)
        .map(|price| price * staked);

    rsx! {
        tr {
            td { class: "capitalize", "{entry.staking.chain}" }
            td { "{entry.staking.balance} {entry.staking.symbol}" }
            td {
                if let Some(reward) = entry.reward.as_ref() {
                    "{reward.total_reward} {entry.staking.symbol}"
                } else {
                    "-"
                }
            }
            td {
                if let Some(unlocking) = entry.unlocking.as_ref() {
                    "{unlocking.unlocking} {entry.staking.symbol} on {timestamp_to_date_string(unlocking.earliest_unlock)}"
                } else {
                    "-"
                }
            }
            td {
                if let Some(value) = fiat_value {
                    {format!("${value:.2}")}
                } else {
                    "-"
                }
            }
        }
    }
}

/// Projected earnings for a staking amount, per compounding period.
/// The pool statistics provide the annualized rate; the projection is
/// delegated to [`calculate_reward`].
#[component]
fn EarningCalculatorModal(is_open: Signal<bool>) -> Element {
    log::debug!("EarningCalculatorModal Rendered");

    let registry = use_memo(move || state_management::REGISTRY());
    let pools = use_memo(move || {
        let mut pools: Vec<_> = state_management::STAKING().pool_info.values().cloned().collect();
        pools.sort_by(|a, b| a.slug.cmp(&b.slug));
        pools
    });

    let mut method = use_signal(CCStr::default);
    let mut amount = use_signal(String::new);

    // Default to the first pool when the modal opens; clear the staked
    // amount when it closes.
    use_effect(move || {
        if is_open() {
            if method.peek().is_empty() {
                if let Some(pool) = pools.peek().first() {
                    method.set(pool.slug.clone());
                }
            }
        } else {
            amount.set(String::new());
        }
    });

    let current_pool = use_memo(move || {
        let pools = pools.read();
        pools
            .iter()
            .find(|p| p.slug == method())
            .or_else(|| pools.first())
            .cloned()
    });

    let decimals = use_memo(move || {
        current_pool
            .read()
            .as_ref()
            .and_then(|pool| pool.input_assets.first())
            .map(|slug| registry.read().asset_decimals(slug))
            .unwrap_or_default()
    });

    let amount_error = use_memo(move || {
        crate::draft::validate_amount(&amount())
            .err()
            .map(|e| CCStr::from(e.to_string()))
    });

    let pool_options = use_memo(move || {
        pools
            .read()
            .iter()
            .map(|p| (p.slug.clone(), p.name.to_string()))
            .collect::<Vec<_>>()
    });

    // One projection per asset the pool pays rewards in, per period
    let projections = use_memo(move || {
        let display_amount: f64 = to_display_units(&amount(), decimals())
            .parse()
            .unwrap_or_default();

        let Some(pool) = current_pool() else {
            return Vec::new();
        };

        CompoundingPeriod::ALL
            .into_iter()
            .map(|period| {
                let earnings: Vec<(CCStr, ExpectedEarning)> = pool
                    .stats
                    .asset_earning
                    .iter()
                    .map(|stats| {
                        let rate = stats.apr.or(stats.apy).unwrap_or_default();
                        let rate_is_apy = stats.apr.is_none();
                        let symbol = registry
                            .read()
                            .asset(&stats.slug)
                            .map(|a| a.symbol.clone())
                            .unwrap_or_else(|| stats.slug.clone());
                        (
                            symbol,
                            calculate_reward(rate, display_amount, period, rate_is_apy),
                        )
                    })
                    .collect();
                (period, earnings)
            })
            .collect::<Vec<_>>()
    });

    let stake_now = move |_| {
        let token = current_pool
            .peek()
            .as_ref()
            .and_then(|pool| pool.input_assets.first().cloned())
            .unwrap_or_default();
        is_open.set(false);
        navigator().push(Route::SendFundView {
            token: token.to_string(),
        });
    };

    use_drop(|| log::debug!("EarningCalculatorModal Dropped"));

    rsx! {
        InfoModal { is_open, title: "Staking calculator",
            div { class: "flex flex-col gap-2 w-[28rem] max-w-full",
                div { class: "text-base-content/60",
                    "Enter the number of tokens to estimate the rewards."
                }

                SelectField {
                    title: "Select method",
                    items: pool_options(),
                    value: method,
                }

                AmountField {
                    title: "Staking amount",
                    decimals,
                    value: amount,
                    max_value: None::<CCStr>,
                    show_max_button: false,
                    value_error: amount_error,
                }

                div { class: "divider my-1" }

                for (period, earnings) in projections().into_iter() {
                    div { class: "flex justify-between items-center",
                        span { class: "text-base-content/60", {period.label()} }
                        div { class: "flex flex-col items-end",
                            for (symbol, earning) in earnings.into_iter() {
                                span { class: "font-semibold",
                                    {format!("{:.6} {symbol}", earning.reward_in_token)}
                                }
                            }
                        }
                    }
                }

                div { class: "text-xs text-base-content/40 mt-2",
                    "This content is for informational purposes only and does not constitute a \
                     guarantee. All rates are annualized and are subject to change."
                }

                button {
                    class: "btn btn-primary mt-2",
                    disabled: amount_error.read().is_some(),
                    onclick: stake_now,
                    DrawSvg::<PlusCircle> {}
                    "Stake now"
                }
            }
        }
    }
}
