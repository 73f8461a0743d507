pub mod handler;

use anyhow::{Context, Result, anyhow};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{error, info};

use crate::config::Config;
use crate::processor::ReceiptFilter;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// `max_body_bytes` caps webhook deliveries; `None` accepts any size.
pub fn router(filter: Arc<ReceiptFilter>, max_body_bytes: Option<usize>) -> Router {
    let body_limit = match max_body_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/health", get(handler::health))
        .route("/webhook", post(handler::stream_webhook))
        .layer(body_limit)
        .with_state(filter)
}

/// Serves the webhook until ctrl-c, over TLS when the config carries
/// certificate paths.
pub async fn serve(config: &Config, filter: Arc<ReceiptFilter>) -> Result<()> {
    let app = router(filter, config.max_body_bytes);
    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    match &config.tls {
        Some(tls) => {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|e| anyhow!("Failed to install rustls crypto provider: {:?}", e))?;

            let tls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
                .await
                .map_err(|e| {
                    error!(
                        "Failed to load TLS certificates: cert={}, key={}, error={}",
                        tls.cert_path, tls.key_path, e
                    );
                    e
                })
                .context("Failed to load TLS certificates")?;

            info!(bind_addr = %config.bind_addr, "🚀 Starting HTTPS webhook server");
            axum_server::bind_rustls(config.bind_addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service_with_connect_info::<SocketAddr>())
                .await?;
        }
        None => {
            info!(bind_addr = %config.bind_addr, "🚀 Starting HTTP webhook server");
            axum_server::bind(config.bind_addr)
                .handle(handle)
                .serve(app.into_make_service_with_connect_info::<SocketAddr>())
                .await?;
        }
    }

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal");
        handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    }
}
