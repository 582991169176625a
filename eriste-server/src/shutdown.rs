//! Signal handling: graceful shutdown plus SIGHUP config reload.

use crate::config::ConfigLoader;
use crate::state::AppState;
use std::sync::Arc;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::Notify;

/// Resolves once SIGTERM or SIGINT arrives.
pub async fn shutdown_signal() {
    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, shutting down");
        }
        _ = sigint.recv() => {
            tracing::info!("SIGINT received, shutting down");
        }
    }
}

/// Spawn the SIGHUP listener that re-reads the config file into `state`.
///
/// The returned [`Notify`] stops the task during shutdown.
pub fn spawn_config_reload_handler(
    state: AppState,
    config_loader: Arc<ConfigLoader>,
) -> Arc<Notify> {
    let stop = Arc::new(Notify::new());
    let stop_rx = stop.clone();

    tokio::spawn(async move {
        let mut sighup = signal(SignalKind::hangup()).expect("failed to install SIGHUP handler");

        loop {
            tokio::select! {
                _ = sighup.recv() => {
                    tracing::info!("SIGHUP received, re-reading config file");
                    match config_loader.reload() {
                        Ok(loaded) => {
                            state
                                .config
                                .update_all(
                                    loaded.server,
                                    loaded.admin,
                                    loaded.store,
                                    loaded.gateway,
                                )
                                .await;
                            tracing::info!("Config reload applied");
                        }
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                "Config reload failed; keeping the previous config"
                            );
                        }
                    }
                }
                _ = stop_rx.notified() => {
                    tracing::debug!("Config reload task stopping");
                    break;
                }
            }
        }
    });

    stop
}
