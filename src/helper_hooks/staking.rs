use std::collections::HashMap;

use dioxus::prelude::*;

use crate::prelude::*;
use crate::utils::CCStr;

/// Network key standing for "every network".
pub const ALL_NETWORK_KEY: &str = "all";

/// A staked position joined with its reward and unlocking information.
#[derive(Debug, Clone, PartialEq)]
pub struct StakingData {
    pub staking: StakingItem,
    pub reward: Option<StakingReward>,
    pub unlocking: Option<UnlockingInfo>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StakingSummary {
    pub loading: bool,
    pub data: Vec<StakingData>,
    pub price_map: HashMap<CCStr, f64>,
    pub timestamp: u64,
}

/// Staking overview for one network (or all of them): ready positions
/// with a displayable balance, joined with ready rewards and unlocking
/// schedules, plus the prices of the involved chains.
pub fn build_staking_summary(network_key: &str, store: &StakingStore) -> StakingSummary {
    let show_all = network_key.eq_ignore_ascii_case(ALL_NETWORK_KEY);

    let mut loading = !store.ready;
    let mut price_map = HashMap::new();
    let mut ready_items = Vec::new();

    for item in &store.items {
        if item.state == ApiItemState::Ready {
            loading = false;

            let balance: f64 = item.balance.parse().unwrap_or_default();
            // Positions too small to display two decimals are hidden
            if balance > 0.0 && (balance * 100.0).round() / 100.0 != 0.0 {
                if let Some(price) = store.price_map.get(&item.chain) {
                    price_map.insert(item.chain.clone(), *price);
                }
                ready_items.push(item.clone());
            }
        }
    }

    let data = ready_items
        .into_iter()
        .filter(|item| show_all || item.chain.eq_ignore_ascii_case(network_key))
        .map(|item| {
            let reward = store
                .rewards
                .iter()
                .find(|r| r.chain == item.chain && r.state == ApiItemState::Ready)
                .cloned();
            let unlocking = store.unlocking.get(&item.chain).cloned();
            StakingData {
                staking: item,
                reward,
                unlocking,
            }
        })
        .collect();

    StakingSummary {
        loading,
        data,
        price_map,
        timestamp: store.timestamp,
    }
}

pub fn use_memo_staking_summary(network_key: ReadOnlySignal<CCStr>) -> Memo<StakingSummary> {
    use_memo(move || build_staking_summary(&network_key(), &state_management::STAKING()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_keeps_ready_nonzero_positions() {
        let store = StakingStore::builtin();
        let summary = build_staking_summary(ALL_NETWORK_KEY, &store);

        assert!(!summary.loading);
        // kusama has a zero balance, astar is still pending
        assert_eq!(summary.data.len(), 1);
        assert_eq!(&*summary.data[0].staking.chain, "polkadot");
        assert!(summary.price_map.contains_key("polkadot"));
        assert!(!summary.price_map.contains_key("kusama"));
    }

    #[test]
    fn summary_joins_rewards_and_unlocking() {
        let store = StakingStore::builtin();
        let summary = build_staking_summary("polkadot", &store);

        assert_eq!(summary.data.len(), 1);
        let entry = &summary.data[0];
        assert_eq!(
            entry.reward.as_ref().map(|r| &*r.total_reward),
            Some("1.26")
        );
        assert!(entry.unlocking.is_some());
    }

    #[test]
    fn summary_filters_by_network() {
        let store = StakingStore::builtin();
        assert!(build_staking_summary("kusama", &store).data.is_empty());
        assert!(build_staking_summary("moonbeam", &store).data.is_empty());
    }

    #[test]
    fn summary_loads_until_a_feed_is_ready() {
        let mut store = StakingStore::default();
        assert!(build_staking_summary(ALL_NETWORK_KEY, &store).loading);

        store.items.push(StakingItem {
            chain: CCStr::from("polkadot"),
            symbol: CCStr::from("DOT"),
            balance: CCStr::from("1"),
            state: ApiItemState::Ready,
        });
        assert!(!build_staking_summary(ALL_NETWORK_KEY, &store).loading);
    }
}
