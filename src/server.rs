//! Server initialization and runtime lifecycle.
//!
//! Handles the database connection, service wiring, both listeners, the
//! background user counter, and graceful shutdown.

use crate::application::services::{TokenService, UserService, UserUsecase};
use crate::config::Config;
use crate::domain::user_counter::run_user_counter;
use crate::infrastructure::persistence::{self, MongoUserRepository};
use crate::routes::app_router;
use crate::rpc::rpc_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Runs the REST and RPC servers with the given configuration.
///
/// Initializes:
/// - MongoDB connection and the unique email index
/// - User service and token issuer
/// - REST listener on `http_port`, RPC listener on `rpc_port`
/// - Background user counter
///
/// On SIGINT/SIGTERM, or if either server stops, every task is signalled to
/// stop and given `shutdown_timeout` to finish before being aborted.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or index creation fails
/// - Either listener cannot bind
pub async fn run(config: Config) -> Result<()> {
    let database = persistence::connect(&config.mongo)
        .await
        .context("Failed to connect to MongoDB")?;

    let repository = Arc::new(MongoUserRepository::new(
        &database,
        &config.mongo.user_collection,
    ));
    repository
        .ensure_indexes()
        .await
        .context("Failed to create user indexes")?;

    let tokens = Arc::new(
        TokenService::new(&config.jwt_key, config.jwt_expire)
            .context("Invalid session token settings")?,
    );
    let user_service: Arc<dyn UserUsecase> = Arc::new(UserService::new(
        repository.clone(),
        tokens.clone(),
        config.bcrypt_cost,
    ));
    let state = AppState::new(user_service, tokens);

    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let http_listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", http_addr))?;

    let rpc_addr = SocketAddr::from(([0, 0, 0, 0], config.rpc_port));
    let rpc_listener = TcpListener::bind(rpc_addr)
        .await
        .with_context(|| format!("Failed to bind RPC listener on {}", rpc_addr))?;

    let shutdown = CancellationToken::new();
    let mut tasks: JoinSet<Result<&'static str>> = JoinSet::new();

    let rest_app = app_router(state.clone());
    let token = shutdown.clone();
    tasks.spawn(async move {
        tracing::info!("HTTP server listening on http://{http_addr}");
        axum::serve(
            http_listener,
            ServiceExt::<Request>::into_make_service(rest_app),
        )
        .with_graceful_shutdown(token.cancelled_owned())
        .await
        .context("HTTP server error")?;
        Ok("HTTP server")
    });

    let rpc_app = rpc_router(state);
    let token = shutdown.clone();
    tasks.spawn(async move {
        tracing::info!("RPC server listening on http://{rpc_addr}");
        axum::serve(rpc_listener, rpc_app)
            .with_graceful_shutdown(token.cancelled_owned())
            .await
            .context("RPC server error")?;
        Ok("RPC server")
    });

    let token = shutdown.clone();
    let period = config.user_count_interval;
    tasks.spawn(async move {
        run_user_counter(repository, period, token).await;
        Ok("User counter")
    });

    tokio::select! {
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
        }
        Some(joined) = tasks.join_next() => {
            log_task_exit(joined);
            tracing::warn!("A server task stopped unexpectedly, shutting down");
        }
    }

    shutdown.cancel();

    let drained = tokio::time::timeout(config.shutdown_timeout, async {
        while let Some(joined) = tasks.join_next().await {
            log_task_exit(joined);
        }
    })
    .await;

    if drained.is_err() {
        tracing::warn!(
            "Tasks still running after {}, aborting",
            humantime::format_duration(config.shutdown_timeout)
        );
        tasks.shutdown().await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

fn log_task_exit(joined: Result<Result<&'static str>, tokio::task::JoinError>) {
    match joined {
        Ok(Ok(name)) => tracing::info!("{} stopped", name),
        Ok(Err(e)) => tracing::error!(error = %format!("{:#}", e), "Task failed"),
        Err(e) => tracing::error!(error = %e, "Task panicked or was aborted"),
    }
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
