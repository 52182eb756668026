use std::sync::RwLock;

use async_graphql::ID;
use uuid::Uuid;

use super::{MessageStore, StoreError};
use crate::common::Message;

/// Default store: messages live as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    messages: RwLock<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageStore for MemoryStore {
    fn append(&self, user: String, content: String) -> Result<Message, StoreError> {
        let message = Message {
            id: ID(Uuid::new_v4().to_string()),
            user,
            content,
        };
        self.messages
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .push(message.clone());
        Ok(message)
    }

    fn all(&self) -> Result<Vec<Message>, StoreError> {
        Ok(self
            .messages
            .read()
            .map_err(|_| StoreError::Poisoned)?
            .clone())
    }
}
