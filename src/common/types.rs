use async_graphql::{ID, SimpleObject};
use serde::{Deserialize, Serialize};

/// A chat message as stored by the gateway and pushed to every feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SimpleObject)]
pub struct Message {
    pub id: ID,
    pub user: String,
    pub content: String,
}

/// Arguments of a single `postMessage` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMessage {
    pub user: String,
    pub content: String,
}
