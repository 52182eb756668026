pub mod client;
pub mod protocol;
pub mod transport;

pub use client::{Endpoints, GraphQLClient};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server rejected the connection: {0}")]
    Rejected(String),
}
