//! Application builder: wires state, router, and middleware, and runs the server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use authgate_auth::{
    AuthSessionService, DirectoryCredentialVerifier, LoginAttemptTracker, MemoryTokenStore,
    MemoryUserDirectory, PasswordHasher, PasswordValidator, SigningKey, TokenSigner, TokenStore,
    UserDirectory, UserRegistrar,
};
use authgate_core::config::{AppConfig, StorageBackend};
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_database::{DatabasePool, TokenRepository, UserRepository};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Wires the auth subsystem over the given persistence backends.
///
/// Resolves the signing key once; every component shares it by reference.
pub fn build_state(
    config: AppConfig,
    store: Arc<dyn TokenStore>,
    directory: Arc<dyn UserDirectory>,
) -> AppResult<AppState> {
    let key = SigningKey::from_config(&config.auth)?;
    info!(source = ?key.source(), "Signing key resolved");

    let signer = Arc::new(TokenSigner::new(&key, &config.auth)?);
    let hasher = PasswordHasher::new();

    let tracker = LoginAttemptTracker::new(Arc::clone(&directory), &config.auth);
    let verifier = Arc::new(DirectoryCredentialVerifier::new(
        Arc::clone(&directory),
        hasher.clone(),
    ));
    let sessions = Arc::new(AuthSessionService::new(
        signer,
        store,
        tracker,
        verifier,
        &config.auth,
    ));
    let registrar = Arc::new(UserRegistrar::new(
        Arc::clone(&directory),
        hasher,
        PasswordValidator::new(&config.auth),
    ));

    Ok(AppState {
        config: Arc::new(config),
        sessions,
        directory,
        registrar,
        database: None,
    })
}

/// State over process-local tables.
pub fn memory_state(config: AppConfig) -> AppResult<AppState> {
    build_state(
        config,
        Arc::new(MemoryTokenStore::new()),
        Arc::new(MemoryUserDirectory::new()),
    )
}

/// Runs the AuthGate server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    info!("Starting AuthGate v{}", env!("CARGO_PKG_VERSION"));

    let pool = match config.database.backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; tokens and users are lost on restart");
            None
        }
        StorageBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            authgate_database::migration::run_migrations(pool.pool()).await?;
            Some(pool)
        }
    };

    let state = match &pool {
        None => memory_state(config.clone())?,
        Some(pool) => AppState {
            database: Some(pool.clone()),
            ..build_state(
                config.clone(),
                Arc::new(TokenRepository::new(pool.pool().clone())),
                Arc::new(UserRepository::new(pool.pool().clone())),
            )?
        },
    };

    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("AuthGate listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let grace_elapsed = async move {
        if shutdown_rx.changed().await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = grace_elapsed => {
            warn!(grace_seconds = grace.as_secs(), "Open connections did not drain in time");
        }
    }

    if let Some(pool) = pool {
        pool.close().await;
    }

    info!("AuthGate stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received, draining connections");
}
