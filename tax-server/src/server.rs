use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tax_client::TaxApiClient;
use tax_core::TaxCalculator;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::{api, config::Config};

/// How long in-flight requests may keep running once shutdown starts.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire the bracket client into the calculator and serve until a shutdown
/// signal arrives.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = TaxApiClient::new(&config.tax_api_url)
        .context("failed to build tax bracket API client")?;
    info!(tax_api_url = client.base_url(), "using tax bracket API");

    let calculator = TaxCalculator::new(Arc::new(client));
    let app = api::router(calculator);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "starting server");

    serve(listener, app, shutdown_signal(), SHUTDOWN_TIMEOUT).await?;

    info!("server exited");
    Ok(())
}

/// Serve `app` until `signal` resolves, then give in-flight requests at most
/// `drain_timeout` to finish before returning anyway.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (started_tx, started_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = started_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result.context("server error"),
        Ok(()) = started_rx => {}
    }

    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(result) => result.context("server error"),
        Err(_) => {
            warn!(timeout = ?drain_timeout, "graceful shutdown timed out, forcing exit");
            Ok(())
        }
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
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

    info!("shutting down server");
}
