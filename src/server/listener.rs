use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;

/// Validates the configuration, binds the listen socket, and serves
/// connections until the task is cancelled.
///
/// Configuration validation is fatal before any socket is opened; once
/// listening, accept errors are logged and the loop continues, and no
/// per-connection failure can reach this level.
pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    cfg.validate()?;

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "failed to accept connection");
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let config = Arc::clone(&cfg);
        tokio::spawn(async move {
            let conn = Connection::new(socket, config);
            conn.run().await;
            tracing::debug!("Connection from {} closed", peer);
        });
    }
}
