//! Frames of the `graphql-ws` subprotocol (subscriptions-transport-ws).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::Message;

pub const SUBPROTOCOL: &str = "graphql-ws";

pub const MESSAGES_SUBSCRIPTION: &str = "subscription { messages { id content user } }";

pub const POST_MESSAGE_MUTATION: &str =
    "mutation ($user: String!, $content: String!) { postMessage(user: $user, content: $content) }";

/// A GraphQL operation as sent in `start` frames and HTTP request bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationPayload {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

/// Frames the client sends.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    ConnectionInit {
        payload: Value,
    },
    Start {
        id: String,
        payload: OperationPayload,
    },
    ConnectionTerminate,
}

/// Frames the server sends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    ConnectionAck,
    ConnectionError {
        #[serde(default)]
        payload: Value,
    },
    /// Keep-alive.
    Ka,
    Data {
        id: String,
        payload: ExecutionResult,
    },
    Error {
        id: String,
        #[serde(default)]
        payload: Value,
    },
    Complete {
        id: String,
    },
    #[serde(other)]
    Unknown,
}

/// Standard GraphQL response body, shared by `data` frames and HTTP responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

#[derive(Deserialize)]
struct MessagesData {
    messages: Vec<Message>,
}

impl ExecutionResult {
    /// Message collection carried by a `messages` subscription result.
    pub fn messages(&self) -> Option<Vec<Message>> {
        let data = self.data.clone()?;
        serde_json::from_value::<MessagesData>(data)
            .ok()
            .map(|data| data.messages)
    }
}
