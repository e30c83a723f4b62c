use std::collections::HashMap;

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::address::is_ethereum_address;
use crate::utils::CCStr;

use super::keyring::Account;

/// A blockchain known to the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub slug: CCStr,
    pub name: CCStr,
    pub genesis_hash: CCStr,
    pub evm_compatible: bool,
    pub ss58_prefix: u16,
}

/// An asset issued on one chain. `min_amount` is the existential
/// deposit in base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAsset {
    pub slug: CCStr,
    pub symbol: CCStr,
    pub name: CCStr,
    pub origin_chain: CCStr,
    pub decimals: u32,
    pub multi_chain_asset: Option<CCStr>,
    pub min_amount: CCStr,
}

/// Grouping of the per-chain representations of one logical asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiChainAsset {
    pub slug: CCStr,
    pub name: CCStr,
    pub symbol: CCStr,
}

/// Cross-chain routing reference: `src_asset` can be bridged from its
/// origin chain to `dest_chain`, arriving as `dest_asset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub src_asset: CCStr,
    pub src_chain: CCStr,
    pub dest_chain: CCStr,
    pub dest_asset: CCStr,
}

/// Read-only reference data consumed by the forms. Views never mutate
/// it; they receive it as a snapshot and query it through the functions
/// below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub chain_info_map: HashMap<CCStr, ChainInfo>,
    pub asset_registry: HashMap<CCStr, ChainAsset>,
    pub multi_chain_asset_map: HashMap<CCStr, MultiChainAsset>,
    pub xcm_ref_map: Vec<AssetRef>,
}

impl RegistrySnapshot {
    pub fn chain(&self, slug: &str) -> Option<&ChainInfo> {
        self.chain_info_map.get(slug)
    }

    pub fn asset(&self, slug: &str) -> Option<&ChainAsset> {
        self.asset_registry.get(slug)
    }

    pub fn asset_decimals(&self, slug: &str) -> u32 {
        self.asset(slug).map(|a| a.decimals).unwrap_or_default()
    }

    pub fn is_chain_evm(&self, slug: &str) -> bool {
        self.chain(slug).is_some_and(|c| c.evm_compatible)
    }

    pub fn find_chain_by_genesis_hash(&self, genesis_hash: &str) -> Option<&ChainInfo> {
        self.chain_info_map
            .values()
            .find(|c| *c.genesis_hash == *genesis_hash)
    }

    /// Built-in reference data. Stands in for the chain-list payload a
    /// background service would push to the UI.
    pub fn builtin() -> Self {
        let chains = [
            ("polkadot", "Polkadot", POLKADOT_GENESIS, false, 0),
            ("kusama", "Kusama", KUSAMA_GENESIS, false, 2),
            ("astar", "Astar", ASTAR_GENESIS, false, 5),
            ("moonbeam", "Moonbeam", MOONBEAM_GENESIS, true, 1284),
            ("ethereum", "Ethereum", ETHEREUM_GENESIS, true, 0),
        ];
        let chain_info_map = chains
            .into_iter()
            .map(|(slug, name, genesis_hash, evm_compatible, ss58_prefix)| {
                (
                    CCStr::from(slug),
                    ChainInfo {
                        slug: CCStr::from(slug),
                        name: CCStr::from(name),
                        genesis_hash: CCStr::from(genesis_hash),
                        evm_compatible,
                        ss58_prefix,
                    },
                )
            })
            .collect();

        let assets = [
            ("polkadot-NATIVE-DOT", "DOT", "Polkadot", "polkadot", 10, Some("DOT"), "10000000000"),
            ("kusama-NATIVE-KSM", "KSM", "Kusama", "kusama", 12, None, "333333333"),
            ("astar-NATIVE-ASTR", "ASTR", "Astar", "astar", 18, None, "1000000"),
            ("moonbeam-NATIVE-GLMR", "GLMR", "Moonbeam", "moonbeam", 18, None, "0"),
            ("moonbeam-LOCAL-xcDOT", "xcDOT", "Polkadot (Moonbeam)", "moonbeam", 10, Some("DOT"), "0"),
            ("ethereum-NATIVE-ETH", "ETH", "Ethereum", "ethereum", 18, None, "0"),
        ];
        let asset_registry = assets
            .into_iter()
            .map(
                |(slug, symbol, name, origin_chain, decimals, multi, min_amount)| {
                    (
                        CCStr::from(slug),
                        ChainAsset {
                            slug: CCStr::from(slug),
                            symbol: CCStr::from(symbol),
                            name: CCStr::from(name),
                            origin_chain: CCStr::from(origin_chain),
                            decimals,
                            multi_chain_asset: multi.map(CCStr::from),
                            min_amount: CCStr::from(min_amount),
                        },
                    )
                },
            )
            .collect();

        let multi_chain_asset_map = [(
            CCStr::from("DOT"),
            MultiChainAsset {
                slug: CCStr::from("DOT"),
                name: CCStr::from("Polkadot"),
                symbol: CCStr::from("DOT"),
            },
        )]
        .into_iter()
        .collect();

        let xcm_ref_map = vec![
            AssetRef {
                src_asset: CCStr::from("polkadot-NATIVE-DOT"),
                src_chain: CCStr::from("polkadot"),
                dest_chain: CCStr::from("moonbeam"),
                dest_asset: CCStr::from("moonbeam-LOCAL-xcDOT"),
            },
            AssetRef {
                src_asset: CCStr::from("moonbeam-LOCAL-xcDOT"),
                src_chain: CCStr::from("moonbeam"),
                dest_chain: CCStr::from("polkadot"),
                dest_asset: CCStr::from("polkadot-NATIVE-DOT"),
            },
        ];

        Self {
            chain_info_map,
            asset_registry,
            multi_chain_asset_map,
            xcm_ref_map,
        }
    }
}

const POLKADOT_GENESIS: &str =
    "0x91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3";
const KUSAMA_GENESIS: &str = "0xb0a8d493285c2df73290dfb7e61f870f17b41801197a149ca93654499ea3dafe";
const ASTAR_GENESIS: &str = "0x9eb76c5184c4ab8679d2d5d819fdf90b9c001403e9e17da2e14b6d8aec4029c6";
const MOONBEAM_GENESIS: &str =
    "0xfe58ea77779b7abda7da4ec526d14db9b1e9cd40a217c34892af80a9b332b76d";
const ETHEREUM_GENESIS: &str =
    "0xd4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3";

/// Entry of the token selector dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenItem {
    pub name: CCStr,
    pub slug: CCStr,
    pub symbol: CCStr,
    pub origin_chain: CCStr,
}

/// Entry of the destination chain selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainItem {
    pub name: CCStr,
    pub slug: CCStr,
}

fn is_asset_type_valid(asset: &ChainAsset, snapshot: &RegistrySnapshot, is_account_evm: bool) -> bool {
    snapshot.is_chain_evm(&asset.origin_chain) == is_account_evm
}

fn token_item(asset: &ChainAsset) -> TokenItem {
    TokenItem {
        name: asset.name.clone(),
        slug: asset.slug.clone(),
        symbol: asset.symbol.clone(),
        origin_chain: asset.origin_chain.clone(),
    }
}

/// Tokens the given sender can pick in the transfer form: assets whose
/// origin chain matches the sender's address type, restricted to the
/// account's origin network when it has one, and optionally to a single
/// token or multi-chain asset group. Sorted by slug so "first item"
/// semantics are stable.
pub fn token_items(
    address: &str,
    accounts: &[Account],
    snapshot: &RegistrySnapshot,
    token_group_slug: Option<&str>,
) -> Vec<TokenItem> {
    let Some(account) = Account::find(accounts, address) else {
        return Vec::new();
    };

    let origin_network = account
        .origin_genesis_hash
        .as_ref()
        .and_then(|gh| snapshot.find_chain_by_genesis_hash(gh))
        .map(|c| c.slug.clone());
    let is_account_evm = is_ethereum_address(address);

    let valid = |asset: &ChainAsset| {
        let network_ok = origin_network
            .as_ref()
            .is_none_or(|net| *net == asset.origin_chain);
        is_asset_type_valid(asset, snapshot, is_account_evm) && network_ok
    };

    let mut items = if let Some(group) = token_group_slug {
        if let Some(asset) = snapshot.asset(group) {
            if valid(asset) {
                vec![token_item(asset)]
            } else {
                Vec::new()
            }
        } else if snapshot.multi_chain_asset_map.contains_key(group) {
            snapshot
                .asset_registry
                .values()
                .filter(|asset| asset.multi_chain_asset.as_deref() == Some(group) && valid(asset))
                .map(token_item)
                .collect()
        } else {
            Vec::new()
        }
    } else {
        snapshot
            .asset_registry
            .values()
            .filter(|asset| valid(asset))
            .map(token_item)
            .collect()
    };

    items.sort_by(|a, b| a.slug.cmp(&b.slug));
    items
}

/// The token the form defaults to when none is selected yet: prefer an
/// asset native to the account's origin-genesis-hash network, fall back
/// to the first item of the filtered list.
pub fn default_token<'a>(
    account: Option<&Account>,
    items: &'a [TokenItem],
    snapshot: &RegistrySnapshot,
) -> Option<&'a TokenItem> {
    if let Some(network) = account
        .and_then(|a| a.origin_genesis_hash.as_ref())
        .and_then(|gh| snapshot.find_chain_by_genesis_hash(gh))
    {
        if let Some(item) = items.iter().find(|i| i.origin_chain == network.slug) {
            return Some(item);
        }
    }
    items.first()
}

/// Chains a token can be sent to: its origin chain first, then every
/// destination a routing reference declares.
pub fn token_destinations(token_slug: &str, snapshot: &RegistrySnapshot) -> Vec<ChainItem> {
    let Some(origin_chain) = snapshot
        .asset(token_slug)
        .and_then(|asset| snapshot.chain(&asset.origin_chain))
    else {
        return Vec::new();
    };

    let mut result = vec![ChainItem {
        name: origin_chain.name.clone(),
        slug: origin_chain.slug.clone(),
    }];

    for xcm_ref in &snapshot.xcm_ref_map {
        if *xcm_ref.src_asset == *token_slug {
            if let Some(dest) = snapshot.chain(&xcm_ref.dest_chain) {
                result.push(ChainItem {
                    name: dest.name.clone(),
                    slug: dest.slug.clone(),
                });
            }
        }
    }

    result
}

/// The routing reference for a (token, destination chain) pair, if any.
pub fn find_xcm_ref<'a>(
    snapshot: &'a RegistrySnapshot,
    token_slug: &str,
    dest_chain: &str,
) -> Option<&'a AssetRef> {
    snapshot
        .xcm_ref_map
        .iter()
        .find(|r| *r.src_asset == *token_slug && *r.dest_chain == *dest_chain)
}

pub static REGISTRY: GlobalSignal<RegistrySnapshot> = Signal::global(RegistrySnapshot::default);

pub(super) fn use_registry_service() {
    use_hook(|| {
        let snapshot = RegistrySnapshot::builtin();
        log::info!(
            "registry_service - loaded {} chains and {} assets",
            snapshot.chain_info_map.len(),
            snapshot.asset_registry.len()
        );
        *REGISTRY.write() = snapshot;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressKind;

    const SUBSTRATE_ADDR: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const EVM_ADDR: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

    fn account(address: &str, origin_genesis_hash: Option<&str>) -> Account {
        Account {
            address: address.into(),
            name: "test".into(),
            kind: if address.starts_with("0x") {
                AddressKind::Evm
            } else {
                AddressKind::Substrate
            },
            origin_genesis_hash: origin_genesis_hash.map(CCStr::from),
            is_read_only: false,
        }
    }

    #[test]
    fn token_items_filter_by_address_type() {
        let snapshot = RegistrySnapshot::builtin();

        let accounts = vec![account(SUBSTRATE_ADDR, None)];
        let items = token_items(SUBSTRATE_ADDR, &accounts, &snapshot, None);
        assert!(!items.is_empty());
        assert!(items
            .iter()
            .all(|i| !snapshot.is_chain_evm(&i.origin_chain)));

        let accounts = vec![account(EVM_ADDR, None)];
        let items = token_items(EVM_ADDR, &accounts, &snapshot, None);
        assert!(!items.is_empty());
        assert!(items.iter().all(|i| snapshot.is_chain_evm(&i.origin_chain)));
    }

    #[test]
    fn token_items_need_a_known_account() {
        let snapshot = RegistrySnapshot::builtin();
        assert!(token_items(SUBSTRATE_ADDR, &[], &snapshot, None).is_empty());
    }

    #[test]
    fn token_items_respect_origin_network() {
        let snapshot = RegistrySnapshot::builtin();
        let accounts = vec![account(SUBSTRATE_ADDR, Some(KUSAMA_GENESIS))];
        let items = token_items(SUBSTRATE_ADDR, &accounts, &snapshot, None);
        assert_eq!(items.len(), 1);
        assert_eq!(&*items[0].slug, "kusama-NATIVE-KSM");
    }

    #[test]
    fn token_items_can_restrict_to_a_single_token() {
        let snapshot = RegistrySnapshot::builtin();
        let accounts = vec![account(SUBSTRATE_ADDR, None)];

        let items = token_items(
            SUBSTRATE_ADDR,
            &accounts,
            &snapshot,
            Some("polkadot-NATIVE-DOT"),
        );
        assert_eq!(items.len(), 1);

        // An EVM-origin asset is not selectable from a Substrate account.
        let items = token_items(
            SUBSTRATE_ADDR,
            &accounts,
            &snapshot,
            Some("ethereum-NATIVE-ETH"),
        );
        assert!(items.is_empty());

        let items = token_items(SUBSTRATE_ADDR, &accounts, &snapshot, Some("unknown"));
        assert!(items.is_empty());
    }

    #[test]
    fn token_items_expand_multi_chain_groups() {
        let snapshot = RegistrySnapshot::builtin();

        let accounts = vec![account(SUBSTRATE_ADDR, None)];
        let items = token_items(SUBSTRATE_ADDR, &accounts, &snapshot, Some("DOT"));
        assert_eq!(items.len(), 1);
        assert_eq!(&*items[0].slug, "polkadot-NATIVE-DOT");

        let accounts = vec![account(EVM_ADDR, None)];
        let items = token_items(EVM_ADDR, &accounts, &snapshot, Some("DOT"));
        assert_eq!(items.len(), 1);
        assert_eq!(&*items[0].slug, "moonbeam-LOCAL-xcDOT");
    }

    #[test]
    fn default_token_prefers_the_origin_network() {
        let snapshot = RegistrySnapshot::builtin();
        let acc = account(SUBSTRATE_ADDR, Some(POLKADOT_GENESIS));
        let items = token_items(SUBSTRATE_ADDR, &[acc.clone()], &snapshot, None);

        let default = default_token(Some(&acc), &items, &snapshot).unwrap();
        assert_eq!(&*default.origin_chain, "polkadot");
    }

    #[test]
    fn default_token_falls_back_to_the_first_item() {
        let snapshot = RegistrySnapshot::builtin();
        let acc = account(SUBSTRATE_ADDR, None);
        let items = token_items(SUBSTRATE_ADDR, &[acc.clone()], &snapshot, None);

        let default = default_token(Some(&acc), &items, &snapshot).unwrap();
        assert_eq!(default, &items[0]);

        assert!(default_token(Some(&acc), &[], &snapshot).is_none());
    }

    #[test]
    fn destinations_list_origin_chain_first() {
        let snapshot = RegistrySnapshot::builtin();

        let dests = token_destinations("polkadot-NATIVE-DOT", &snapshot);
        assert_eq!(&*dests[0].slug, "polkadot");
        assert!(dests.iter().any(|d| &*d.slug == "moonbeam"));

        let dests = token_destinations("kusama-NATIVE-KSM", &snapshot);
        assert_eq!(dests.len(), 1);

        assert!(token_destinations("unknown", &snapshot).is_empty());
    }

    #[test]
    fn genesis_hash_lookup() {
        let snapshot = RegistrySnapshot::builtin();
        assert_eq!(
            snapshot
                .find_chain_by_genesis_hash(POLKADOT_GENESIS)
                .map(|c| &*c.slug),
            Some("polkadot")
        );
        assert!(snapshot.find_chain_by_genesis_hash("0xdeadbeef").is_none());
    }
}
