use dioxus::prelude::*;

use futures_util::stream::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::prelude::alert_error;

use super::store::StoreCommand;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

pub static THEME: GlobalSignal<Theme> = Signal::global(|| Theme::Dark);

#[derive(Debug)]
pub(super) enum DarkModeCommand {
    /// Internal trigger a save into the store
    Persist { theme: Theme },
}

/// Theme service coroutine
pub(super) fn use_theme_service(
    store_service: Coroutine<StoreCommand>,
) -> Coroutine<DarkModeCommand> {
    let service_handle = use_coroutine(
        move |mut rx: UnboundedReceiver<DarkModeCommand>| async move {
            log::info!("darkmode_service (coroutine) - start");

            let mut cached_value = load_theme(store_service).await;
            *THEME.write() = cached_value;

            // Flag to trash the first persist command that will come from the initial run of the "use_effect"
            let mut discard_next_persist = true;

            while let Some(cmd) = rx.next().await {
                log::debug!("darkmode_service (coroutine) - Processing command {cmd:?}...");

                match cmd {
                    DarkModeCommand::Persist { theme } => {
                        if discard_next_persist {
                            log::debug!(
                                "darkmode_service (coroutine) - Ignoring first Persist cmd."
                            );
                            discard_next_persist = false;
                        }
                        if theme != cached_value {
                            log::debug!(
                                "darkmode_service (coroutine) - Theme changed, persisting..."
                            );
                            cached_value = theme;

                            match save_theme(store_service, theme).await {
                                Ok(_) => (),
                                Err(msg) => {
                                    log::error!("{msg}");
                                    alert_error(msg);
                                }
                            };
                        } else {
                            log::debug!(
                                "darkmode_service (coroutine) - Ignoring Persist cmd: already in store."
                            );
                        }
                    }
                }

                log::debug!("darkmode_service (coroutine) - Command processed");
            }
        },
    );
    use_effect(move || {
        service_handle.send(DarkModeCommand::Persist { theme: THEME() });
    });
    service_handle
}

async fn load_theme(store_service: Coroutine<StoreCommand>) -> Theme {
    let (result, rx) = oneshot::channel();
    store_service.send(StoreCommand::GetSettings { result });
    match rx.await.expect("store_service error") {
        Ok(settings) => settings.theme,
        Err(_) => Theme::default(),
    }
}

async fn save_theme(store_service: Coroutine<StoreCommand>, theme: Theme) -> Result<(), String> {
    let (result, rx) = oneshot::channel();
    store_service.send(StoreCommand::GetSettings { result });
    let mut settings = rx
        .await
        .expect("store_service error")
        .map_err(|e| e.to_string())?;
    settings.theme = theme;

    let (result, rx) = oneshot::channel();
    store_service.send(StoreCommand::SaveSettings { settings, result });
    rx.await
        .expect("store_service error")
        .map_err(|e| e.to_string())
}
