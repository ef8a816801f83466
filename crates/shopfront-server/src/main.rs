mod api;
mod middleware;

use std::sync::Arc;

use shopfront_commerce::CommerceClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::middleware::RateLimitState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopfront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // The server always proxies the commerce API, so a missing origin is fatal here.
    let commerce = Arc::new(CommerceClient::from_app_config(&config)?);
    let rate_limit = RateLimitState::from_app_config(&config);
    let app = build_app(AppState { commerce }, rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        commerce_base_url = config.commerce_base_url.as_deref().unwrap_or_default(),
        max_requests = config.api_rate_limit_max_requests,
        window_secs = config.api_rate_limit_window_secs,
        "shopfront-server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_stop())
        .await?;
    tracing::info!("shopfront-server stopped");
    Ok(())
}

/// Resolves on the first of ctrl-c or SIGTERM. A signal source that cannot be
/// installed is logged and never fires.
async fn wait_for_stop() {
    let interrupt = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "ctrl-c listener unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "SIGTERM listener unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = interrupt => "ctrl-c",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "draining in-flight storefront requests");
}
