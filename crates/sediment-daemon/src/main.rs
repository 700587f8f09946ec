// sedimentd - storage-management daemon serving the sediment object bus
//
// The daemon binds a Unix socket, serves the manager object and one
// object per simulated pool, and answers every call with a result or a
// named protocol fault.

use std::process;

use sediment_daemon::{remove_socket, socket_path, Server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit codes for different scenarios
mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const BIND_ERROR: i32 = 1;
    pub const RUNTIME_ERROR: i32 = 2;
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Starting sedimentd v{}", env!("CARGO_PKG_VERSION"));

    let socket = socket_path();
    let server = match Server::bind(&socket).await {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to bind {}: {}", socket.display(), e);
            process::exit(exit_codes::BIND_ERROR);
        }
    };

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            let _ = shutdown.send(());
        }
    });

    match server.run().await {
        Ok(()) => {
            remove_socket(&socket);
            process::exit(exit_codes::SUCCESS);
        }
        Err(e) => {
            error!("Server error: {}", e);
            process::exit(exit_codes::RUNTIME_ERROR);
        }
    }
}
