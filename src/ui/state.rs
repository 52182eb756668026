use crate::common::{Message, PostMessage};

/// The compose row: who is speaking and what they are about to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub user: String,
    pub content: String,
}

impl Draft {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            content: String::new(),
        }
    }

    /// Turn the draft into a post. Content is always cleared; the user is kept.
    /// Empty content yields nothing.
    pub fn take_send(&mut self) -> Option<PostMessage> {
        let content = std::mem::take(&mut self.content);
        if content.is_empty() {
            return None;
        }
        Some(PostMessage {
            user: self.user.clone(),
            content,
        })
    }
}

/// Local UI state.
pub struct AppState {
    /// `None` until the feed has pushed at least once.
    pub messages: Option<Vec<Message>>,
    pub draft: Draft,
    pub feed_closed: bool,
}

impl AppState {
    pub fn new(default_user: impl Into<String>) -> Self {
        Self {
            messages: None,
            draft: Draft::new(default_user),
            feed_closed: false,
        }
    }

    /// Each push carries the whole collection, so it replaces what we had.
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = Some(messages);
    }
}
