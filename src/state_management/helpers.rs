use dioxus::prelude::*;

use tokio::sync::oneshot;

use crate::address::AddressKind;
use crate::utils::CCStr;

use super::bridge::{
    BridgeCommand, BridgeError, CrossChainTransferRequest, FreeBalance, TransactionResponse,
    TransferRequest,
};
use super::clipboard::ClipboardCommand;
use super::keyring::{Account, KeyringCommand, KeyringError, SecretPhrase, ValidatedAccount};

pub fn use_keyring_service() -> Coroutine<KeyringCommand> {
    use_coroutine_handle()
}

pub fn use_bridge_service() -> Coroutine<BridgeCommand> {
    use_coroutine_handle()
}

pub fn use_clipboard_service() -> Coroutine<ClipboardCommand> {
    use_coroutine_handle()
}

pub fn copy_to_clipboard(
    clipboard_service: Coroutine<ClipboardCommand>,
    text: impl Into<String>,
) {
    clipboard_service.send(ClipboardCommand::Set(text.into()));
}

pub async fn create_seed(
    keyring_service: Coroutine<KeyringCommand>,
    words: usize,
) -> Result<SecretPhrase, KeyringError> {
    log::debug!("create_seed - start");
    let (result, rx) = oneshot::channel();
    keyring_service.send(KeyringCommand::CreateSeed { words, result });
    let phrase = rx.await.expect("keyring_service error");
    log::debug!("create_seed - finished");
    phrase
}

pub async fn validate_seed(
    keyring_service: Coroutine<KeyringCommand>,
    suri: String,
    kind: AddressKind,
) -> Result<ValidatedAccount, KeyringError> {
    let (result, rx) = oneshot::channel();
    keyring_service.send(KeyringCommand::ValidateSeed { suri, kind, result });
    rx.await.expect("keyring_service error")
}

pub async fn create_account(
    keyring_service: Coroutine<KeyringCommand>,
    name: String,
    suri: String,
    kinds: Vec<AddressKind>,
    origin_genesis_hash: Option<CCStr>,
) -> Result<Vec<Account>, KeyringError> {
    log::debug!("create_account - start");
    let (result, rx) = oneshot::channel();
    keyring_service.send(KeyringCommand::CreateAccount {
        name,
        suri,
        kinds,
        origin_genesis_hash,
        result,
    });
    let accounts = rx.await.expect("keyring_service error");
    log::debug!("create_account - finished");
    accounts
}

pub async fn get_free_balance(
    bridge_service: Coroutine<BridgeCommand>,
    address: CCStr,
    token_slug: CCStr,
) -> Result<FreeBalance, BridgeError> {
    let (result, rx) = oneshot::channel();
    bridge_service.send(BridgeCommand::GetFreeBalance {
        address,
        token_slug,
        result,
    });
    rx.await.expect("bridge_service error")
}

pub async fn make_transfer(
    bridge_service: Coroutine<BridgeCommand>,
    request: TransferRequest,
) -> TransactionResponse {
    log::debug!("make_transfer - start");
    let (result, rx) = oneshot::channel();
    bridge_service.send(BridgeCommand::MakeTransfer { request, result });
    let response = rx.await.expect("bridge_service error");
    log::debug!("make_transfer - finished");
    response
}

pub async fn make_cross_chain_transfer(
    bridge_service: Coroutine<BridgeCommand>,
    request: CrossChainTransferRequest,
) -> TransactionResponse {
    log::debug!("make_cross_chain_transfer - start");
    let (result, rx) = oneshot::channel();
    bridge_service.send(BridgeCommand::MakeCrossChainTransfer { request, result });
    let response = rx.await.expect("bridge_service error");
    log::debug!("make_cross_chain_transfer - finished");
    response
}

pub async fn complete_confirmation(
    bridge_service: Coroutine<BridgeCommand>,
    id: CCStr,
    approved: bool,
) -> Result<(), BridgeError> {
    log::debug!("complete_confirmation - start");
    let (result, rx) = oneshot::channel();
    bridge_service.send(BridgeCommand::CompleteConfirmation {
        id,
        approved,
        result,
    });
    let outcome = rx.await.expect("bridge_service error");
    log::debug!("complete_confirmation - finished");
    outcome
}
