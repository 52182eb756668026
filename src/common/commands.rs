use crate::common::types::PostMessage;

/// Commands the UI sends down to the network client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    PostMessage(PostMessage),
}
