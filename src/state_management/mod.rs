mod bridge;
mod clipboard;
mod event_bus;
mod helpers;
mod keyring;
mod registry;
mod staking;
mod store;
mod theme;

pub fn use_init_services() {
    log::debug!("init_services - start");
    let event_bus_service = event_bus::use_event_bus_service();
    let store_service = store::use_store_service();
    registry::use_registry_service();
    staking::use_staking_service();
    let _ = keyring::use_keyring_service(event_bus_service, store_service);
    let _ = bridge::use_bridge_service(event_bus_service);
    let _ = theme::use_theme_service(store_service);
    let _ = clipboard::use_clipboard_service();
    log::debug!("init_services - finished");
}

pub mod prelude {
    pub use super::bridge::{
        BridgeError, ConfirmationRequest, CrossChainTransferRequest, FreeBalance,
        TransactionResponse, TransferRequest,
    };
    pub use super::keyring::{Account, KeyringError, SecretPhrase, ValidatedAccount};
    pub use super::registry::{
        AssetRef, ChainAsset, ChainInfo, ChainItem, MultiChainAsset, RegistrySnapshot, TokenItem,
    };
    pub use super::staking::{
        ApiItemState, AssetEarningStats, StakingItem, StakingReward, StakingStore, UnlockingInfo,
        YieldPoolInfo,
    };
    pub use super::theme::Theme;

    pub mod state_management {
        pub use super::super::bridge::PENDING_CONFIRMATIONS;
        pub use super::super::helpers::*;
        pub use super::super::keyring::{default_account_name, ACCOUNTS, SELECTED_ACCOUNT};
        pub use super::super::registry::{
            default_token, find_xcm_ref, token_destinations, token_items, REGISTRY,
        };
        pub use super::super::staking::STAKING;
        pub use super::super::store::APPLICATION_CONFIG;
        pub use super::super::theme::THEME;
    }
}
