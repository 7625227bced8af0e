use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use students_api::{
    build_router,
    config::{load_config, Cli},
    infrastructure::{Logger, SqliteStorage},
};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config_path())?;

    Logger::init("info");

    let storage = SqliteStorage::new(&config.storage_path)
        .await
        .context("failed to initialize storage")?;
    info!(
        env = %config.env,
        version = env!("CARGO_PKG_VERSION"),
        "storage initialized"
    );

    let app = build_router(Arc::new(storage), config.http_server.request_timeout());

    let listener = TcpListener::bind(&config.http_server.address)
        .await
        .with_context(|| format!("failed to bind {}", config.http_server.address))?;
    info!(address = %config.http_server.address, "server started");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tokio::select! {
        _ = shutdown_signal() => {}
        result = &mut server => {
            result.context("server task panicked")?.context("failed to start server")?;
            return Ok(());
        }
    }

    info!("shutting down the server");
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(config.http_server.shutdown_timeout(), server).await {
        Ok(Ok(Ok(()))) => info!("server shutdown successfully"),
        Ok(Ok(Err(e))) => error!(error = %e, "failed to shutdown server"),
        Ok(Err(e)) => error!(error = %e, "server task panicked"),
        Err(_) => error!("failed to shutdown server: timed out waiting for in-flight requests"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
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
                error!(error = %e, "failed to listen for SIGTERM");
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
}
