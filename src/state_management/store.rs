use std::path::{Path, PathBuf};

use dioxus::prelude::*;

use futures_util::stream::StreamExt;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::oneshot;

use super::keyring::Account;
use super::theme::Theme;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not access the data directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupted store file: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationConfig {
    pub datadir: PathBuf,
}
impl Default for ApplicationConfig {
    fn default() -> Self {
        let mut datadir = dirs_next::config_dir()
            .or_else(dirs_next::home_dir)
            .unwrap_or_default();
        datadir.push("omni-wallet");
        Self { datadir }
    }
}
pub static APPLICATION_CONFIG: GlobalSignal<ApplicationConfig> =
    Signal::global(|| ApplicationConfig::default());

/// Persisted application settings, distinct from the reference data of
/// the registry store.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, serde::Deserialize)]
pub struct Settings {
    pub theme: Theme,
}

pub enum StoreCommand {
    GetAccounts {
        result: oneshot::Sender<Result<Vec<Account>, StoreError>>,
    },
    SaveAccounts {
        accounts: Vec<Account>,
        result: oneshot::Sender<Result<(), StoreError>>,
    },
    GetSettings {
        result: oneshot::Sender<Result<Settings, StoreError>>,
    },
    SaveSettings {
        settings: Settings,
        result: oneshot::Sender<Result<(), StoreError>>,
    },
}
impl core::fmt::Debug for StoreCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GetAccounts { .. } => f.debug_struct("GetAccounts").finish_non_exhaustive(),
            Self::SaveAccounts { accounts, .. } => f
                .debug_struct("SaveAccounts")
                .field("accounts", &accounts.len())
                .finish_non_exhaustive(),
            Self::GetSettings { .. } => f.debug_struct("GetSettings").finish_non_exhaustive(),
            Self::SaveSettings { settings, .. } => f
                .debug_struct("SaveSettings")
                .field("settings", settings)
                .finish_non_exhaustive(),
        }
    }
}

pub(super) fn use_store_service() -> Coroutine<StoreCommand> {
    use_coroutine(move |mut rx: UnboundedReceiver<StoreCommand>| async move {
        log::info!("store_service (coroutine) - start");

        let config = create_config();
        *APPLICATION_CONFIG.write() = config.clone();

        while let Some(cmd) = rx.next().await {
            log::debug!("store_service (coroutine) - Processing command {cmd:?}...");
            let datadir = config.datadir.clone();
            match cmd {
                StoreCommand::GetAccounts { result } => {
                    result
                        .send(read_json(&datadir.join("accounts.json")))
                        .expect("channel failure");
                }
                StoreCommand::SaveAccounts { accounts, result } => {
                    result
                        .send(write_json(&datadir.join("accounts.json"), &accounts))
                        .expect("channel failure");
                }
                StoreCommand::GetSettings { result } => {
                    result
                        .send(read_json(&datadir.join("settings.json")))
                        .expect("channel failure");
                }
                StoreCommand::SaveSettings { settings, result } => {
                    result
                        .send(write_json(&datadir.join("settings.json"), &settings))
                        .expect("channel failure");
                }
            }
            log::debug!("store_service (coroutine) - Command processed");
        }
    })
}

fn create_config() -> ApplicationConfig {
    let mut default_config = ApplicationConfig::default();

    // An env var override takes precedence over the platform directory
    if let Some(datadir) = std::env::var("OMNI_WALLET_HOME")
        .ok()
        .map(|s| s.parse().expect("valid path string"))
    {
        default_config.datadir = datadir;
    }
    default_config
}

// The store files are small enough that synchronous IO inside the
// service coroutine is fine.
fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}
