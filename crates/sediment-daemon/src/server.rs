//! Unix socket server for the object bus

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use sediment_protocol::{CallMessage, Fault, ReplyMessage, FAULT_INVALID_ARGS};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::registry::ObjectRegistry;

/// Daemon server that listens on a Unix socket
pub struct Server {
    listener: UnixListener,
    shutdown_tx: broadcast::Sender<()>,
    registry: Arc<Mutex<ObjectRegistry>>,
}

impl Server {
    /// Bind to a Unix socket path
    pub async fn bind(path: &Path) -> Result<Self> {
        // Remove stale socket
        if path.exists() {
            std::fs::remove_file(path)?;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let listener = UnixListener::bind(path)?;
        let (shutdown_tx, _) = broadcast::channel(1);

        info!("Daemon listening on {:?}", path);
        Ok(Self {
            listener,
            shutdown_tx,
            registry: Arc::new(Mutex::new(ObjectRegistry::new())),
        })
    }

    /// Get a shutdown sender for external shutdown triggers
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Run the server until shutdown
    pub async fn run(self) -> Result<()> {
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, _)) => {
                            let registry = self.registry.clone();
                            tokio::spawn(async move {
                                if let Err(e) = handle_client(stream, registry).await {
                                    error!("Client error: {}", e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Accept error: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        Ok(())
    }
}

async fn handle_client(stream: UnixStream, registry: Arc<Mutex<ObjectRegistry>>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            break;
        }

        let reply = match serde_json::from_str::<CallMessage>(&line) {
            Ok(call) => {
                debug!(
                    path = %call.path,
                    interface = %call.interface,
                    member = %call.member,
                    "dispatching call"
                );
                let mut registry = registry.lock().await;
                registry.dispatch(&call)
            }
            Err(e) => {
                warn!("Malformed call: {}", e);
                ReplyMessage::fault(
                    None,
                    Fault::new(FAULT_INVALID_ARGS, format!("malformed call: {e}")),
                )
            }
        };

        let mut output = serde_json::to_string(&reply)?;
        output.push('\n');
        writer.write_all(output.as_bytes()).await?;
    }

    Ok(())
}
