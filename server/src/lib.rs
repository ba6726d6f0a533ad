//! HTTP surface of the roster service.
//!
//! Serves `/api/users` and `/api/todos` from stores loaded once at startup.
//! Every request is read-only, so the stores are shared through `Arc`
//! without locking.

use std::sync::Arc;

use axum::Router;
use roster_core::{LoadError, RecordStore, Todo, User};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, ErrorResponse};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<RecordStore<User>>,
    pub todos: Arc<RecordStore<Todo>>,
}

impl AppState {
    pub fn new(users: RecordStore<User>, todos: RecordStore<Todo>) -> Self {
        Self {
            users: Arc::new(users),
            todos: Arc::new(todos),
        }
    }

    /// Reads both collections from the paths in `config`.
    pub fn load(config: &Config) -> Result<Self, LoadError> {
        let users = RecordStore::from_path(&config.users_path)?;
        let todos = RecordStore::from_path(&config.todos_path)?;
        Ok(Self::new(users, todos))
    }
}

pub fn app(state: AppState) -> Router {
    let routes = Router::new()
        .merge(routes::resource_router(state.users))
        .merge(routes::resource_router(state.todos));
    with_middleware(routes)
}

/// Request tracing plus the catch-all that turns handler panics into 500s.
pub fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(error::handle_panic)),
    )
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
