use crate::common::types::Message;

/// Events the network client sends up to the UI.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Full message collection pushed by the live feed.
    MessagesUpdated(Vec<Message>),
    /// The subscription connection ended; no more pushes will arrive.
    FeedClosed,
}
