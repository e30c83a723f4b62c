use dioxus::prelude::*;

use blake2::{Blake2b512, Digest};
use futures_util::stream::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use zeroize::Zeroizing;

use crate::address::{evm_address, ss58_encode, AddressKind, SS58_GENERIC_PREFIX};
use crate::utils::CCStr;

use super::event_bus::{publish_event, EventBus};
use super::store::{StoreCommand, StoreError};

/// An account as the UI sees it. The keyring owns the lifecycle; views
/// only read and select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: CCStr,
    pub name: CCStr,
    pub kind: AddressKind,
    /// Genesis hash of the network the account was created for, when it
    /// is bound to one.
    pub origin_genesis_hash: Option<CCStr>,
    #[serde(default)]
    pub is_read_only: bool,
}

impl Account {
    pub fn find<'a>(accounts: &'a [Account], address: &str) -> Option<&'a Account> {
        accounts.iter().find(|a| *a.address == *address)
    }
}

/// Name offered for the next created account.
pub fn default_account_name(accounts: &[Account]) -> String {
    format!("Account {}", accounts.len() + 1)
}

/// A generated recovery phrase. Lives only in the component state of
/// the modal displaying it and wipes its memory on drop.
#[derive(Clone)]
pub struct SecretPhrase(Zeroizing<String>);

impl SecretPhrase {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl From<String> for SecretPhrase {
    fn from(value: String) -> Self {
        Self(Zeroizing::new(value))
    }
}

impl PartialEq for SecretPhrase {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl core::fmt::Debug for SecretPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretPhrase(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAccount {
    pub address: CCStr,
    pub kind: AddressKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyringError {
    #[error("Invalid mnemonic seed")]
    InvalidPhrase,
    #[error("Invalid key material: {0}")]
    InvalidKey(String),
    #[error("Account name is required")]
    NameRequired,
    #[error("An account with this address already exists")]
    DuplicateAccount,
    #[error("Could not persist accounts: {0}")]
    Store(String),
}

impl From<StoreError> for KeyringError {
    fn from(value: StoreError) -> Self {
        Self::Store(value.to_string())
    }
}

/// Split a suri into its phrase and optional derivation path
/// (`<phrase>//<path>`).
fn parse_suri(suri: &str) -> (&str, Option<&str>) {
    match suri.split_once("//") {
        Some((phrase, path)) if !path.is_empty() => (phrase.trim(), Some(path)),
        _ => (suri.trim(), None),
    }
}

/// 32-byte seed from a suri: the mnemonic entropy, with any hard
/// derivation path folded in by hashing.
fn seed_from_suri(suri: &str) -> Result<[u8; 32], KeyringError> {
    let (phrase, path) = parse_suri(suri);
    let mnemonic = bip39::Mnemonic::parse(phrase).map_err(|_| KeyringError::InvalidPhrase)?;
    let entropy = mnemonic.to_entropy();

    let mut seed = [0u8; 32];
    let len = entropy.len().min(32);
    seed[..len].copy_from_slice(&entropy[..len]);

    if let Some(path) = path {
        let mut hasher = Blake2b512::new();
        hasher.update(seed);
        hasher.update(path.as_bytes());
        let hash = hasher.finalize();
        seed.copy_from_slice(&hash[..32]);
    }

    Ok(seed)
}

fn derive_address(suri: &str, kind: AddressKind) -> Result<CCStr, KeyringError> {
    let seed = seed_from_suri(suri)?;
    match kind {
        AddressKind::Substrate => {
            let mini_secret = schnorrkel::MiniSecretKey::from_bytes(&seed)
                .map_err(|e| KeyringError::InvalidKey(e.to_string()))?;
            let keypair = mini_secret.expand_to_keypair(schnorrkel::ExpansionMode::Ed25519);
            Ok(CCStr::from(ss58_encode(
                &keypair.public.to_bytes(),
                SS58_GENERIC_PREFIX,
            )))
        }
        AddressKind::Evm => {
            let signing_key = k256::ecdsa::SigningKey::from_slice(&seed)
                .map_err(|e| KeyringError::InvalidKey(e.to_string()))?;
            use k256::elliptic_curve::sec1::ToEncodedPoint;
            let point = signing_key.verifying_key().to_encoded_point(false);
            // Drop the 0x04 uncompressed-point tag
            Ok(CCStr::from(evm_address(&point.as_bytes()[1..])))
        }
    }
}

pub static ACCOUNTS: GlobalSignal<Vec<Account>> = Signal::global(Vec::new);
pub static SELECTED_ACCOUNT: GlobalSignal<Option<CCStr>> = Signal::global(|| None);

/// Event fired after accounts were created or reloaded.
#[derive(Debug, Clone)]
pub struct AccountsChangedEvent {
    pub addresses: Vec<CCStr>,
}
impl super::event_bus::EventId for AccountsChangedEvent {
    fn event_id() -> &'static str {
        "accounts_changed"
    }
}

pub enum KeyringCommand {
    CreateSeed {
        words: usize,
        result: oneshot::Sender<Result<SecretPhrase, KeyringError>>,
    },
    ValidateSeed {
        suri: String,
        kind: AddressKind,
        result: oneshot::Sender<Result<ValidatedAccount, KeyringError>>,
    },
    CreateAccount {
        name: String,
        suri: String,
        kinds: Vec<AddressKind>,
        origin_genesis_hash: Option<CCStr>,
        result: oneshot::Sender<Result<Vec<Account>, KeyringError>>,
    },
}
impl core::fmt::Debug for KeyringCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateSeed { words, .. } => f
                .debug_struct("CreateSeed")
                .field("words", words)
                .finish_non_exhaustive(),
            Self::ValidateSeed { kind, .. } => f
                .debug_struct("ValidateSeed")
                .field("kind", kind)
                .finish_non_exhaustive(),
            Self::CreateAccount { name, kinds, .. } => f
                .debug_struct("CreateAccount")
                .field("name", name)
                .field("kinds", kinds)
                .finish_non_exhaustive(),
        }
    }
}

pub(super) fn use_keyring_service(
    event_bus: EventBus,
    store_service: Coroutine<StoreCommand>,
) -> Coroutine<KeyringCommand> {
    let service_handle = use_coroutine(
        move |mut rx: UnboundedReceiver<KeyringCommand>| async move {
            log::info!("keyring_service (coroutine) - start");

            let mut accounts = load_accounts(store_service).await;
            publish_accounts(event_bus, &accounts);

            while let Some(cmd) = rx.next().await {
                log::debug!("keyring_service (coroutine) - Processing command {cmd:?}...");
                match cmd {
                    KeyringCommand::CreateSeed { words, result } => {
                        let phrase = bip39::Mnemonic::generate(words)
                            .map(|m| SecretPhrase::from(m.to_string()))
                            .map_err(|_| KeyringError::InvalidPhrase);
                        // The requesting view may be gone already
                        let _ = result.send(phrase);
                    }
                    KeyringCommand::ValidateSeed { suri, kind, result } => {
                        let validated = derive_address(&suri, kind)
                            .map(|address| ValidatedAccount { address, kind });
                        let _ = result.send(validated);
                    }
                    KeyringCommand::CreateAccount {
                        name,
                        suri,
                        kinds,
                        origin_genesis_hash,
                        result,
                    } => {
                        let created = create_accounts(
                            store_service,
                            &mut accounts,
                            name,
                            suri,
                            kinds,
                            origin_genesis_hash,
                        )
                        .await;
                        if created.is_ok() {
                            publish_accounts(event_bus, &accounts);
                        }
                        let _ = result.send(created);
                    }
                }
                log::debug!("keyring_service (coroutine) - Command processed");
            }
        },
    );
    service_handle
}

async fn load_accounts(store_service: Coroutine<StoreCommand>) -> Vec<Account> {
    let (result, rx) = oneshot::channel();
    store_service.send(StoreCommand::GetAccounts { result });
    match rx.await.expect("store_service error") {
        Ok(accounts) => accounts,
        Err(e) => {
            log::error!("Could not load accounts from the store: {e}");
            Vec::new()
        }
    }
}

fn publish_accounts(event_bus: EventBus, accounts: &[Account]) {
    *ACCOUNTS.write() = accounts.to_vec();
    if SELECTED_ACCOUNT.peek().is_none() {
        *SELECTED_ACCOUNT.write() = accounts.first().map(|a| a.address.clone());
    }
    publish_event(
        event_bus,
        AccountsChangedEvent {
            addresses: accounts.iter().map(|a| a.address.clone()).collect(),
        },
    );
}

async fn create_accounts(
    store_service: Coroutine<StoreCommand>,
    accounts: &mut Vec<Account>,
    name: String,
    suri: String,
    kinds: Vec<AddressKind>,
    origin_genesis_hash: Option<CCStr>,
) -> Result<Vec<Account>, KeyringError> {
    if name.trim().is_empty() {
        return Err(KeyringError::NameRequired);
    }

    let mut created = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let address = derive_address(&suri, kind)?;
        if Account::find(accounts, &address).is_some() {
            return Err(KeyringError::DuplicateAccount);
        }
        created.push(Account {
            address,
            name: CCStr::from(name.trim()),
            kind,
            origin_genesis_hash: origin_genesis_hash.clone(),
            is_read_only: false,
        });
    }

    let mut next = accounts.clone();
    next.extend(created.iter().cloned());

    let (result, rx) = oneshot::channel();
    store_service.send(StoreCommand::SaveAccounts {
        accounts: next.clone(),
        result,
    });
    rx.await.expect("store_service error")?;

    *accounts = next;
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{is_ethereum_address, is_substrate_address};

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn suri_splits_phrase_and_path() {
        assert_eq!(parse_suri("word list"), ("word list", None));
        assert_eq!(parse_suri("word list//0"), ("word list", Some("0")));
        assert_eq!(parse_suri("word list//"), ("word list//", None));
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_address(TEST_MNEMONIC, AddressKind::Substrate).unwrap();
        let b = derive_address(TEST_MNEMONIC, AddressKind::Substrate).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn derivation_path_changes_the_address() {
        let root = derive_address(TEST_MNEMONIC, AddressKind::Substrate).unwrap();
        let derived =
            derive_address(&format!("{TEST_MNEMONIC}//stash"), AddressKind::Substrate).unwrap();
        assert_ne!(root, derived);
    }

    #[test]
    fn derived_addresses_have_the_right_shape() {
        let substrate = derive_address(TEST_MNEMONIC, AddressKind::Substrate).unwrap();
        assert!(is_substrate_address(&substrate));

        let evm = derive_address(TEST_MNEMONIC, AddressKind::Evm).unwrap();
        assert!(is_ethereum_address(&evm));
        assert_ne!(&*substrate, &*evm);
    }

    #[test]
    fn invalid_phrases_are_rejected() {
        assert_eq!(
            derive_address("definitely not a mnemonic", AddressKind::Substrate),
            Err(KeyringError::InvalidPhrase)
        );
        assert_eq!(
            derive_address("", AddressKind::Evm),
            Err(KeyringError::InvalidPhrase)
        );
    }

    #[test]
    fn secret_phrase_exposes_words_but_not_debug() {
        let phrase = SecretPhrase::from(TEST_MNEMONIC.to_owned());
        assert_eq!(phrase.words().count(), 12);
        assert_eq!(format!("{phrase:?}"), "SecretPhrase(***)");
    }

    #[test]
    fn default_account_name_counts_up() {
        assert_eq!(default_account_name(&[]), "Account 1");
    }
}
