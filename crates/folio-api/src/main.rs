//! # folio-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the portfolio API.
//! Binds to configurable port (default 8080).

use std::sync::Arc;

use folio_api::state::{AppConfig, AppState, LogFormat};
use folio_cms_client::{CmsClient, CmsConfig, ReviewGateway};
use folio_mail::{Mailer, SmtpConfig, SmtpMailer};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Initialize structured tracing.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::debug!(?config, "configuration loaded");

    // Mail dispatcher (optional: absent means the contact endpoint returns 503).
    let mailer: Option<Arc<dyn Mailer>> = match SmtpConfig::from_env().map_err(|e| {
        tracing::error!("Invalid SMTP configuration: {e}");
        e
    })? {
        Some(smtp_config) => {
            let mailer = SmtpMailer::new(smtp_config).map_err(|e| {
                tracing::error!("Failed to create SMTP mailer: {e}");
                e
            })?;
            tracing::info!(sender = mailer.sender(), "Mail dispatcher configured");
            Some(Arc::new(mailer) as Arc<dyn Mailer>)
        }
        None => {
            tracing::warn!(
                "GMAIL_USER / GMAIL_APP_PASSWORD not set. Contact endpoint will return 503."
            );
            None
        }
    };

    // Review store (optional: absent means review endpoints return 503).
    let gateway: Option<Arc<dyn ReviewGateway>> = match CmsConfig::from_env().map_err(|e| {
        tracing::error!("Invalid CMS configuration: {e}");
        e
    })? {
        Some(cms_config) => {
            let client = CmsClient::new(cms_config).map_err(|e| {
                tracing::error!("Failed to create CMS client: {e}");
                e
            })?;
            tracing::info!(dataset = client.dataset(), "Review store configured");
            Some(Arc::new(client) as Arc<dyn ReviewGateway>)
        }
        None => {
            tracing::warn!("SANITY_PROJECT_ID not set. Review endpoints will return 503.");
            None
        }
    };

    let port = config.port;
    let app = folio_api::app(AppState::new(config, mailer, gateway));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Folio API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
