//! GraphQL message gateway.

pub mod feed;
pub mod routes;
pub mod schema;

use std::sync::Arc;

use axum::http::header::InvalidHeaderValue;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::storage::{self, StoreError};

pub use feed::MessageFeed;
pub use schema::build_schema;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(#[from] InvalidHeaderValue),

    #[error("message store error: {0}")]
    Store(#[from] StoreError),
}

/// Wire store, feed, schema and routes together.
pub fn build_app(config: &AppConfig) -> Result<Router, ServerError> {
    let store = storage::open_store(config.database.as_deref())?;
    let feed = Arc::new(MessageFeed::new(store)?);
    routes::create_router(build_schema(feed), config)
}

/// A bound gateway, ready to serve.
pub struct Server {
    listener: TcpListener,
    app: Router,
}

/// Bind the listener up front so an in-process client can connect right away.
pub async fn bind(config: &AppConfig) -> Result<Server, ServerError> {
    let app = build_app(config)?;
    let listener = TcpListener::bind(config.bind_address()).await?;

    log::info!(
        "GraphQL server is now running on {}/graphql",
        config.origin()
    );
    log::info!("Subscriptions at {}", config.subscriptions_url());

    Ok(Server { listener, app })
}

impl Server {
    /// Serve until the listener fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        axum::serve(self.listener, self.app).await?;
        Ok(())
    }
}
