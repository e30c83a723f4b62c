use std::collections::HashMap;

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::CCStr;

/// Readiness of an item pushed by the background data feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiItemState {
    Pending,
    Ready,
}

/// A staked position on one chain. `balance` is in display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingItem {
    pub chain: CCStr,
    pub symbol: CCStr,
    pub balance: CCStr,
    pub state: ApiItemState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingReward {
    pub chain: CCStr,
    pub total_reward: CCStr,
    pub state: ApiItemState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockingInfo {
    pub unlocking: CCStr,
    pub earliest_unlock: u64,
}

/// Per-asset annualized rate of a yield pool. Either `apr` or `apy` is
/// set, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEarningStats {
    pub slug: CCStr,
    pub apr: Option<f64>,
    pub apy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct YieldPoolStats {
    pub asset_earning: Vec<AssetEarningStats>,
}

/// A staking/earning product the calculator can project rewards for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPoolInfo {
    pub slug: CCStr,
    pub name: CCStr,
    pub chain: CCStr,
    pub input_assets: Vec<CCStr>,
    pub stats: YieldPoolStats,
}

/// Read-only staking reference data: positions, rewards, unlocking
/// schedules, token prices and the yield pool catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StakingStore {
    pub items: Vec<StakingItem>,
    pub rewards: Vec<StakingReward>,
    pub unlocking: HashMap<CCStr, UnlockingInfo>,
    pub price_map: HashMap<CCStr, f64>,
    pub pool_info: HashMap<CCStr, YieldPoolInfo>,
    pub timestamp: u64,
    pub ready: bool,
}

impl StakingStore {
    /// Built-in feed data, standing in for the background staking
    /// subscriptions.
    pub fn builtin() -> Self {
        let items = vec![
            StakingItem {
                chain: CCStr::from("polkadot"),
                symbol: CCStr::from("DOT"),
                balance: CCStr::from("25.5"),
                state: ApiItemState::Ready,
            },
            StakingItem {
                chain: CCStr::from("kusama"),
                symbol: CCStr::from("KSM"),
                balance: CCStr::from("0"),
                state: ApiItemState::Ready,
            },
            StakingItem {
                chain: CCStr::from("astar"),
                symbol: CCStr::from("ASTR"),
                balance: CCStr::from("1200"),
                state: ApiItemState::Pending,
            },
        ];
        let rewards = vec![StakingReward {
            chain: CCStr::from("polkadot"),
            total_reward: CCStr::from("1.26"),
            state: ApiItemState::Ready,
        }];
        let unlocking = [(
            CCStr::from("polkadot"),
            UnlockingInfo {
                unlocking: CCStr::from("5"),
                earliest_unlock: 1_735_689_600,
            },
        )]
        .into_iter()
        .collect();
        let price_map = [
            (CCStr::from("polkadot"), 7.08),
            (CCStr::from("kusama"), 32.45),
            (CCStr::from("astar"), 0.11),
            (CCStr::from("moonbeam"), 0.31),
        ]
        .into_iter()
        .collect();

        let pools = [
            YieldPoolInfo {
                slug: CCStr::from("DOT___nomination_pool"),
                name: CCStr::from("Polkadot nomination pool"),
                chain: CCStr::from("polkadot"),
                input_assets: vec![CCStr::from("polkadot-NATIVE-DOT")],
                stats: YieldPoolStats {
                    asset_earning: vec![AssetEarningStats {
                        slug: CCStr::from("polkadot-NATIVE-DOT"),
                        apr: Some(15.21),
                        apy: None,
                    }],
                },
            },
            YieldPoolInfo {
                slug: CCStr::from("KSM___nomination_pool"),
                name: CCStr::from("Kusama nomination pool"),
                chain: CCStr::from("kusama"),
                input_assets: vec![CCStr::from("kusama-NATIVE-KSM")],
                stats: YieldPoolStats {
                    asset_earning: vec![AssetEarningStats {
                        slug: CCStr::from("kusama-NATIVE-KSM"),
                        apr: Some(16.12),
                        apy: None,
                    }],
                },
            },
            YieldPoolInfo {
                slug: CCStr::from("GLMR___parachain_staking"),
                name: CCStr::from("Moonbeam parachain staking"),
                chain: CCStr::from("moonbeam"),
                input_assets: vec![CCStr::from("moonbeam-NATIVE-GLMR")],
                stats: YieldPoolStats {
                    asset_earning: vec![AssetEarningStats {
                        slug: CCStr::from("moonbeam-NATIVE-GLMR"),
                        apr: None,
                        apy: Some(4.52),
                    }],
                },
            },
        ];
        let pool_info = pools.into_iter().map(|p| (p.slug.clone(), p)).collect();

        Self {
            items,
            rewards,
            unlocking,
            price_map,
            pool_info,
            timestamp: 1_733_011_200,
            ready: true,
        }
    }
}

pub static STAKING: GlobalSignal<StakingStore> = Signal::global(StakingStore::default);

pub(super) fn use_staking_service() {
    use_hook(|| {
        let store = StakingStore::builtin();
        log::info!(
            "staking_service - loaded {} staking items and {} pools",
            store.items.len(),
            store.pool_info.len()
        );
        *STAKING.write() = store;
    })
}
