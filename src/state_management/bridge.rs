use std::collections::HashMap;

use dioxus::prelude::*;

use blake2::{Blake2b512, Digest};
use futures_util::stream::StreamExt;
use tokio::sync::oneshot;

use crate::utils::{timestamp_now, CCStr};

use super::event_bus::{subscribe_event, EventBus};
use super::keyring::AccountsChangedEvent;
use super::registry::{find_xcm_ref, RegistrySnapshot, REGISTRY};

/// Maximum transferable balance of one (address, token) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeBalance {
    /// Base units
    pub value: CCStr,
    pub decimals: u32,
    pub symbol: CCStr,
}

/// Outcome of a submitted transaction. `errors` block, `warnings` are
/// soft failures the user can override by resubmitting with
/// `ignore_warnings`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionResponse {
    pub errors: Vec<CCStr>,
    pub warnings: Vec<CCStr>,
    pub extrinsic_hash: Option<CCStr>,
}

impl TransactionResponse {
    fn error(message: impl Into<CCStr>) -> Self {
        Self {
            errors: vec![message.into()],
            ..Default::default()
        }
    }
    fn warning(message: impl Into<CCStr>) -> Self {
        Self {
            warnings: vec![message.into()],
            ..Default::default()
        }
    }
    fn success(extrinsic_hash: CCStr) -> Self {
        Self {
            extrinsic_hash: Some(extrinsic_hash),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub from: CCStr,
    pub to: CCStr,
    pub network_key: CCStr,
    pub token_slug: CCStr,
    /// Base units
    pub value: CCStr,
    pub ignore_warnings: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossChainTransferRequest {
    pub from: CCStr,
    pub to: CCStr,
    pub origin_network_key: CCStr,
    pub destination_network_key: CCStr,
    pub token_slug: CCStr,
    /// Base units
    pub value: CCStr,
    pub ignore_warnings: bool,
}

/// A signing request waiting for the user's approval.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationRequest {
    pub id: CCStr,
    pub origin: CCStr,
    pub payload: serde_json::Value,
    pub requested_at: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("Unknown token {0}")]
    UnknownToken(CCStr),
    #[error("No pending confirmation with this id")]
    UnknownConfirmation,
}

#[derive(Debug, Clone, PartialEq)]
enum PendingAction {
    Transfer(TransferRequest),
    CrossChainTransfer(CrossChainTransferRequest),
}

#[derive(Debug)]
pub enum TransferOutcome {
    Completed(TransactionResponse),
    /// The origin chain is EVM-compatible: the transaction must be
    /// signed through a confirmation before it executes.
    AwaitingSignature(ConfirmationRequest),
}

/// Demo balance granted to every fresh account, in display units.
const SEED_BALANCE: u128 = 100;

/// In-process stand-in for the wallet background service: owns the
/// balance ledger and implements the transfer semantics behind the
/// bridge commands.
pub struct Backend {
    registry: RegistrySnapshot,
    ledger: HashMap<(CCStr, CCStr), u128>,
    pending: HashMap<CCStr, PendingAction>,
    nonce: u64,
}

impl Backend {
    pub fn new(registry: RegistrySnapshot) -> Self {
        Self {
            registry,
            ledger: HashMap::new(),
            pending: HashMap::new(),
            nonce: 0,
        }
    }

    /// Grant the demo balance for every asset the address can hold.
    /// Already-seeded addresses keep their current balances.
    pub fn seed_account(&mut self, address: &str) {
        let is_evm = crate::address::is_ethereum_address(address);
        let assets: Vec<_> = self
            .registry
            .asset_registry
            .values()
            .filter(|a| self.registry.is_chain_evm(&a.origin_chain) == is_evm)
            .map(|a| (a.slug.clone(), a.decimals))
            .collect();
        for (slug, decimals) in assets {
            self.ledger
                .entry((CCStr::from(address), slug))
                .or_insert_with(|| SEED_BALANCE * 10u128.pow(decimals));
        }
    }

    fn balance(&self, address: &str, token_slug: &str) -> u128 {
        self.ledger
            .get(&(CCStr::from(address), CCStr::from(token_slug)))
            .copied()
            .unwrap_or_default()
    }

    pub fn free_balance(&self, address: &str, token_slug: &str) -> Result<FreeBalance, BridgeError> {
        let asset = self
            .registry
            .asset(token_slug)
            .ok_or_else(|| BridgeError::UnknownToken(CCStr::from(token_slug)))?;
        Ok(FreeBalance {
            value: CCStr::from(self.balance(address, token_slug).to_string()),
            decimals: asset.decimals,
            symbol: asset.symbol.clone(),
        })
    }

    pub fn submit_transfer(&mut self, request: TransferRequest) -> TransferOutcome {
        if let Some(response) = self.check_funds(
            &request.from,
            &request.token_slug,
            &request.value,
            request.ignore_warnings,
        ) {
            return TransferOutcome::Completed(response);
        }

        if self.registry.is_chain_evm(&request.network_key) {
            let confirmation = self.confirmation_for(
                &request.network_key,
                serde_json::json!({
                    "type": "evmSendTransactionRequest",
                    "from": &*request.from,
                    "to": &*request.to,
                    "tokenSlug": &*request.token_slug,
                    "value": &*request.value,
                }),
            );
            self.pending
                .insert(confirmation.id.clone(), PendingAction::Transfer(request));
            return TransferOutcome::AwaitingSignature(confirmation);
        }

        TransferOutcome::Completed(self.execute_transfer(&request))
    }

    pub fn submit_cross_chain_transfer(
        &mut self,
        request: CrossChainTransferRequest,
    ) -> TransferOutcome {
        if find_xcm_ref(
            &self.registry,
            &request.token_slug,
            &request.destination_network_key,
        )
        .is_none()
        {
            return TransferOutcome::Completed(TransactionResponse::error(format!(
                "No route from {} to {} for this token",
                request.origin_network_key, request.destination_network_key
            )));
        }

        if let Some(response) = self.check_funds(
            &request.from,
            &request.token_slug,
            &request.value,
            request.ignore_warnings,
        ) {
            return TransferOutcome::Completed(response);
        }

        if self.registry.is_chain_evm(&request.origin_network_key) {
            let confirmation = self.confirmation_for(
                &request.origin_network_key,
                serde_json::json!({
                    "type": "evmSendTransactionRequest",
                    "from": &*request.from,
                    "to": &*request.to,
                    "tokenSlug": &*request.token_slug,
                    "value": &*request.value,
                    "destinationNetworkKey": &*request.destination_network_key,
                }),
            );
            self.pending.insert(
                confirmation.id.clone(),
                PendingAction::CrossChainTransfer(request),
            );
            return TransferOutcome::AwaitingSignature(confirmation);
        }

        TransferOutcome::Completed(self.execute_cross_chain_transfer(&request))
    }

    /// Resolve a pending signing request. Rejection resolves the
    /// underlying submission with an error, never silently drops it.
    pub fn complete_confirmation(
        &mut self,
        id: &str,
        approved: bool,
    ) -> Result<TransactionResponse, BridgeError> {
        let action = self
            .pending
            .remove(id)
            .ok_or(BridgeError::UnknownConfirmation)?;

        if !approved {
            return Ok(TransactionResponse::error("Rejected by user"));
        }

        Ok(match action {
            PendingAction::Transfer(request) => self.execute_transfer(&request),
            PendingAction::CrossChainTransfer(request) => {
                self.execute_cross_chain_transfer(&request)
            }
        })
    }

    /// Balance/existential-deposit checks shared by both transfer
    /// kinds. Returns the blocking response, if any.
    fn check_funds(
        &self,
        from: &CCStr,
        token_slug: &CCStr,
        value: &CCStr,
        ignore_warnings: bool,
    ) -> Option<TransactionResponse> {
        let Some(asset) = self.registry.asset(token_slug) else {
            return Some(TransactionResponse::error(format!(
                "Unknown token {token_slug}"
            )));
        };

        let Ok(value) = value.parse::<u128>() else {
            return Some(TransactionResponse::error("Invalid amount"));
        };

        let balance = self.balance(from, token_slug);
        if value > balance {
            return Some(TransactionResponse::error("Insufficient balance"));
        }

        let min_amount: u128 = asset.min_amount.parse().unwrap_or_default();
        let remaining = balance - value;
        if !ignore_warnings && remaining > 0 && remaining < min_amount {
            return Some(TransactionResponse::warning(
                "The remaining balance would fall below the existential deposit \
                 and the account may be reaped. Resubmit to transfer anyway.",
            ));
        }

        None
    }

    fn execute_transfer(&mut self, request: &TransferRequest) -> TransactionResponse {
        self.move_funds(
            &request.from,
            &request.to,
            &request.token_slug,
            &request.token_slug,
            &request.value,
        )
    }

    fn execute_cross_chain_transfer(
        &mut self,
        request: &CrossChainTransferRequest,
    ) -> TransactionResponse {
        let Some(xcm_ref) = find_xcm_ref(
            &self.registry,
            &request.token_slug,
            &request.destination_network_key,
        ) else {
            return TransactionResponse::error("No route for this token");
        };
        let dest_asset = xcm_ref.dest_asset.clone();
        self.move_funds(
            &request.from,
            &request.to,
            &request.token_slug,
            &dest_asset,
            &request.value,
        )
    }

    fn move_funds(
        &mut self,
        from: &CCStr,
        to: &CCStr,
        src_asset: &CCStr,
        dest_asset: &CCStr,
        value: &CCStr,
    ) -> TransactionResponse {
        let Ok(value) = value.parse::<u128>() else {
            return TransactionResponse::error("Invalid amount");
        };

        // The balance may have moved since the submission check (a
        // confirmation can stay pending for a while).
        let src_key = (from.clone(), src_asset.clone());
        let balance = self.ledger.get(&src_key).copied().unwrap_or_default();
        if value > balance {
            return TransactionResponse::error("Insufficient balance");
        }

        self.ledger.insert(src_key, balance - value);
        *self
            .ledger
            .entry((to.clone(), dest_asset.clone()))
            .or_default() += value;

        self.nonce += 1;
        let mut hasher = Blake2b512::new();
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(from.as_bytes());
        hasher.update(to.as_bytes());
        hasher.update(src_asset.as_bytes());
        hasher.update(value.to_le_bytes());
        let hash = hasher.finalize();

        TransactionResponse::success(CCStr::from(format!("0x{}", hex::encode(&hash[..32]))))
    }

    fn confirmation_for(&mut self, network_key: &CCStr, payload: serde_json::Value) -> ConfirmationRequest {
        ConfirmationRequest {
            id: CCStr::from(uuid::Uuid::new_v4().to_string()),
            origin: network_key.clone(),
            payload,
            requested_at: timestamp_now(),
        }
    }
}

/// Signing requests currently waiting for the user.
pub static PENDING_CONFIRMATIONS: GlobalSignal<Vec<ConfirmationRequest>> =
    Signal::global(Vec::new);

pub enum BridgeCommand {
    GetFreeBalance {
        address: CCStr,
        token_slug: CCStr,
        result: oneshot::Sender<Result<FreeBalance, BridgeError>>,
    },
    MakeTransfer {
        request: TransferRequest,
        result: oneshot::Sender<TransactionResponse>,
    },
    MakeCrossChainTransfer {
        request: CrossChainTransferRequest,
        result: oneshot::Sender<TransactionResponse>,
    },
    CompleteConfirmation {
        id: CCStr,
        approved: bool,
        result: oneshot::Sender<Result<(), BridgeError>>,
    },
    /// Internal make sure every account has a ledger entry
    SyncAccounts { addresses: Vec<CCStr> },
}
impl core::fmt::Debug for BridgeCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GetFreeBalance {
                address,
                token_slug,
                ..
            } => f
                .debug_struct("GetFreeBalance")
                .field("address", address)
                .field("token_slug", token_slug)
                .finish_non_exhaustive(),
            Self::MakeTransfer { request, .. } => f
                .debug_struct("MakeTransfer")
                .field("request", request)
                .finish_non_exhaustive(),
            Self::MakeCrossChainTransfer { request, .. } => f
                .debug_struct("MakeCrossChainTransfer")
                .field("request", request)
                .finish_non_exhaustive(),
            Self::CompleteConfirmation { id, approved, .. } => f
                .debug_struct("CompleteConfirmation")
                .field("id", id)
                .field("approved", approved)
                .finish_non_exhaustive(),
            Self::SyncAccounts { addresses } => f
                .debug_struct("SyncAccounts")
                .field("addresses", addresses)
                .finish(),
        }
    }
}

pub(super) fn use_bridge_service(event_bus: EventBus) -> Coroutine<BridgeCommand> {
    let service_handle = use_coroutine(
        move |mut rx: UnboundedReceiver<BridgeCommand>| async move {
            log::info!("bridge_service (coroutine) - start");

            let mut backend = Backend::new(REGISTRY.peek().clone());
            let mut awaiting: HashMap<CCStr, oneshot::Sender<TransactionResponse>> =
                HashMap::new();

            while let Some(cmd) = rx.next().await {
                log::debug!("bridge_service (coroutine) - Processing command {cmd:?}...");
                match cmd {
                    BridgeCommand::GetFreeBalance {
                        address,
                        token_slug,
                        result,
                    } => {
                        // The requesting view may be gone already
                        let _ = result.send(backend.free_balance(&address, &token_slug));
                    }
                    BridgeCommand::MakeTransfer { request, result } => {
                        match backend.submit_transfer(request) {
                            TransferOutcome::Completed(response) => {
                                let _ = result.send(response);
                            }
                            TransferOutcome::AwaitingSignature(confirmation) => {
                                awaiting.insert(confirmation.id.clone(), result);
                                PENDING_CONFIRMATIONS.write().push(confirmation);
                            }
                        }
                    }
                    BridgeCommand::MakeCrossChainTransfer { request, result } => {
                        match backend.submit_cross_chain_transfer(request) {
                            TransferOutcome::Completed(response) => {
                                let _ = result.send(response);
                            }
                            TransferOutcome::AwaitingSignature(confirmation) => {
                                awaiting.insert(confirmation.id.clone(), result);
                                PENDING_CONFIRMATIONS.write().push(confirmation);
                            }
                        }
                    }
                    BridgeCommand::CompleteConfirmation {
                        id,
                        approved,
                        result,
                    } => match backend.complete_confirmation(&id, approved) {
                        Ok(response) => {
                            PENDING_CONFIRMATIONS.write().retain(|c| c.id != id);
                            if let Some(sender) = awaiting.remove(&id) {
                                // The submitting form may be gone; the
                                // confirmation is resolved either way.
                                let _ = sender.send(response);
                            }
                            let _ = result.send(Ok(()));
                        }
                        Err(e) => {
                            let _ = result.send(Err(e));
                        }
                    },
                    BridgeCommand::SyncAccounts { addresses } => {
                        for address in addresses {
                            backend.seed_account(&address);
                        }
                    }
                }
                log::debug!("bridge_service (coroutine) - Command processed");
            }
        },
    );
    subscribe_event(event_bus, move |event: AccountsChangedEvent| {
        service_handle.send(BridgeCommand::SyncAccounts {
            addresses: event.addresses,
        });
    });
    service_handle
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
    const EVM_FROM: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
    const EVM_TO: &str = "0x1f9090aae28b8a3dceadf281b0f12828e676c326";

    const DOT: &str = "polkadot-NATIVE-DOT";
    const GLMR: &str = "moonbeam-NATIVE-GLMR";
    const XC_DOT: &str = "moonbeam-LOCAL-xcDOT";

    fn backend() -> Backend {
        let mut backend = Backend::new(RegistrySnapshot::builtin());
        backend.seed_account(ALICE);
        backend.seed_account(EVM_FROM);
        backend
    }

    fn transfer(value: &str, ignore_warnings: bool) -> TransferRequest {
        TransferRequest {
            from: ALICE.into(),
            to: BOB.into(),
            network_key: "polkadot".into(),
            token_slug: DOT.into(),
            value: value.into(),
            ignore_warnings,
        }
    }

    #[test]
    fn seeding_grants_matching_assets_only() {
        let backend = backend();
        assert_eq!(
            &*backend.free_balance(ALICE, DOT).unwrap().value,
            "1000000000000" // 100 DOT
        );
        assert_eq!(&*backend.free_balance(ALICE, GLMR).unwrap().value, "0");
        assert_ne!(&*backend.free_balance(EVM_FROM, GLMR).unwrap().value, "0");
        assert!(backend.free_balance(ALICE, "nope").is_err());
    }

    #[test]
    fn substrate_transfer_moves_funds() {
        let mut backend = backend();
        // 40 DOT
        let outcome = backend.submit_transfer(transfer("400000000000", false));
        let TransferOutcome::Completed(response) = outcome else {
            panic!("substrate transfers complete directly");
        };
        assert!(response.errors.is_empty() && response.warnings.is_empty());
        assert!(response.extrinsic_hash.is_some());
        assert_eq!(
            &*backend.free_balance(ALICE, DOT).unwrap().value,
            "600000000000"
        );
        assert_eq!(
            &*backend.free_balance(BOB, DOT).unwrap().value,
            "400000000000"
        );
    }

    #[test]
    fn insufficient_balance_is_an_error() {
        let mut backend = backend();
        let TransferOutcome::Completed(response) =
            backend.submit_transfer(transfer("1000000000001", false))
        else {
            panic!("expected a completed outcome");
        };
        assert_eq!(response.errors.len(), 1);
        assert!(response.extrinsic_hash.is_none());
        // Nothing moved
        assert_eq!(
            &*backend.free_balance(ALICE, DOT).unwrap().value,
            "1000000000000"
        );
    }

    #[test]
    fn existential_deposit_warning_blocks_until_resubmitted() {
        let mut backend = backend();
        // Leaves 0.5 DOT, below the 1 DOT existential deposit
        let value = "995000000000";

        let TransferOutcome::Completed(response) = backend.submit_transfer(transfer(value, false))
        else {
            panic!("expected a completed outcome");
        };
        assert!(response.errors.is_empty());
        assert_eq!(response.warnings.len(), 1);
        assert!(response.extrinsic_hash.is_none());

        // Resubmission with ignore_warnings goes through
        let TransferOutcome::Completed(response) = backend.submit_transfer(transfer(value, true))
        else {
            panic!("expected a completed outcome");
        };
        assert!(response.warnings.is_empty());
        assert!(response.extrinsic_hash.is_some());
    }

    #[test]
    fn transferring_everything_raises_no_warning() {
        let mut backend = backend();
        let TransferOutcome::Completed(response) =
            backend.submit_transfer(transfer("1000000000000", false))
        else {
            panic!("expected a completed outcome");
        };
        assert!(response.warnings.is_empty());
        assert!(response.extrinsic_hash.is_some());
    }

    #[test]
    fn cross_chain_transfer_needs_a_route() {
        let mut backend = backend();
        let request = CrossChainTransferRequest {
            from: ALICE.into(),
            to: BOB.into(),
            origin_network_key: "kusama".into(),
            destination_network_key: "polkadot".into(),
            token_slug: "kusama-NATIVE-KSM".into(),
            value: "1000".into(),
            ignore_warnings: false,
        };
        let TransferOutcome::Completed(response) = backend.submit_cross_chain_transfer(request)
        else {
            panic!("expected a completed outcome");
        };
        assert_eq!(response.errors.len(), 1);
    }

    #[test]
    fn cross_chain_transfer_credits_the_destination_asset() {
        let mut backend = backend();
        let request = CrossChainTransferRequest {
            from: ALICE.into(),
            to: EVM_TO.into(),
            origin_network_key: "polkadot".into(),
            destination_network_key: "moonbeam".into(),
            token_slug: DOT.into(),
            value: "400000000000".into(),
            ignore_warnings: false,
        };
        let TransferOutcome::Completed(response) = backend.submit_cross_chain_transfer(request)
        else {
            panic!("expected a completed outcome");
        };
        assert!(response.extrinsic_hash.is_some());
        assert_eq!(
            &*backend.free_balance(EVM_TO, XC_DOT).unwrap().value,
            "400000000000"
        );
    }

    #[test]
    fn evm_transfer_waits_for_its_signature() {
        let mut backend = backend();
        let request = TransferRequest {
            from: EVM_FROM.into(),
            to: EVM_TO.into(),
            network_key: "moonbeam".into(),
            token_slug: GLMR.into(),
            value: "1000000000000000000".into(),
            ignore_warnings: false,
        };

        let TransferOutcome::AwaitingSignature(confirmation) =
            backend.submit_transfer(request.clone())
        else {
            panic!("EVM transfers go through the confirmation queue");
        };
        assert_eq!(confirmation.payload["from"], EVM_FROM);

        // Nothing moved until approval
        assert_eq!(&*backend.free_balance(EVM_TO, GLMR).unwrap().value, "0");

        let response = backend.complete_confirmation(&confirmation.id, true).unwrap();
        assert!(response.extrinsic_hash.is_some());
        assert_eq!(
            &*backend.free_balance(EVM_TO, GLMR).unwrap().value,
            "1000000000000000000"
        );

        // The confirmation is gone once resolved
        assert_eq!(
            backend.complete_confirmation(&confirmation.id, true),
            Err(BridgeError::UnknownConfirmation)
        );
    }

    #[test]
    fn rejected_confirmation_fails_the_transfer() {
        let mut backend = backend();
        let request = TransferRequest {
            from: EVM_FROM.into(),
            to: EVM_TO.into(),
            network_key: "moonbeam".into(),
            token_slug: GLMR.into(),
            value: "1000000000000000000".into(),
            ignore_warnings: false,
        };

        let TransferOutcome::AwaitingSignature(confirmation) = backend.submit_transfer(request)
        else {
            panic!("EVM transfers go through the confirmation queue");
        };

        let response = backend
            .complete_confirmation(&confirmation.id, false)
            .unwrap();
        assert_eq!(response.errors.len(), 1);
        assert!(response.extrinsic_hash.is_none());
        assert_eq!(&*backend.free_balance(EVM_TO, GLMR).unwrap().value, "0");
    }
}
