use std::future::IntoFuture;

use anyhow::Context;
use subscription_service::http::{AppState, build_router};
use subscription_service::{App, AppConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_tracing(&config.logging).context("failed to install tracing subscriber")?;

    let app = App::new(&config.database)
        .await
        .context("failed to connect to database")?;
    app.health_check().await.context("database health check failed")?;
    app.bootstrap_schema()
        .await
        .context("failed to bootstrap schema")?;

    let state = AppState::new(app.subscription_service()?);
    let router = build_router(state, config.server.request_timeout());

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "subscription service listening");

    let (draining_tx, draining_rx) = tokio::sync::oneshot::channel();
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = draining_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result.context("server error")?,
        _ = draining_rx => {
            let limit = config.server.shutdown_timeout();
            match tokio::time::timeout(limit, &mut server).await {
                Ok(result) => result.context("server error")?,
                Err(_) => tracing::warn!(?limit, "graceful shutdown timed out, dropping open connections"),
            }
        }
    }

    app.pool().close().await;
    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
