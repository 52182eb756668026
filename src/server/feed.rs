//! Live message feed: the store plus a broadcast of the latest snapshot.

use std::sync::{Arc, Mutex};

use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::watch;

use crate::common::Message;
use crate::storage::{MessageStore, StoreError};

pub type Snapshot = Arc<Vec<Message>>;

pub struct MessageFeed {
    store: Arc<dyn MessageStore>,
    snapshot: watch::Sender<Snapshot>,
    /// Serializes append + publish so a stale snapshot never overwrites a newer one.
    publish: Mutex<()>,
}

impl MessageFeed {
    pub fn new(store: Arc<dyn MessageStore>) -> Result<Self, StoreError> {
        let (snapshot, _) = watch::channel(Arc::new(store.all()?));
        Ok(Self {
            store,
            snapshot,
            publish: Mutex::new(()),
        })
    }

    /// Append a message and push the full collection to every subscriber.
    pub fn post(&self, user: String, content: String) -> Result<Message, StoreError> {
        let _guard = self.publish.lock().map_err(|_| StoreError::Poisoned)?;
        let message = self.store.append(user, content)?;
        let all = self.store.all()?;
        log::debug!(
            "Message {} from {} published ({} total, {} subscribers)",
            message.id.as_str(),
            message.user,
            all.len(),
            self.snapshot.receiver_count()
        );
        self.snapshot.send_replace(Arc::new(all));
        Ok(message)
    }

    pub fn messages(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Yields the current collection immediately, then the full collection
    /// after each post. Bursts may be coalesced into the latest snapshot.
    pub fn subscribe(&self) -> BoxStream<'static, Snapshot> {
        let mut receiver = self.snapshot.subscribe();
        receiver.mark_changed();
        futures::stream::unfold(receiver, |mut receiver| async move {
            receiver.changed().await.ok()?;
            let snapshot = receiver.borrow_and_update().clone();
            Some((snapshot, receiver))
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn feed() -> MessageFeed {
        MessageFeed::new(Arc::new(MemoryStore::new())).unwrap()
    }

    #[tokio::test]
    async fn test_subscribe_yields_current_snapshot_first() {
        let feed = feed();
        feed.post("Ryan".into(), "before".into()).unwrap();

        let mut stream = feed.subscribe();
        let first = stream.next().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].content, "before");
    }

    #[tokio::test]
    async fn test_post_pushes_full_collection() {
        let feed = feed();
        let mut stream = feed.subscribe();
        assert!(stream.next().await.unwrap().is_empty());

        feed.post("Ryan".into(), "one".into()).unwrap();
        let update = stream.next().await.unwrap();
        assert_eq!(update.len(), 1);

        feed.post("Ana".into(), "two".into()).unwrap();
        let update = stream.next().await.unwrap();
        let contents: Vec<_> = update.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["one", "two"]);
    }

    #[tokio::test]
    async fn test_every_subscriber_gets_the_update() {
        let feed = feed();
        let mut a = feed.subscribe();
        let mut b = feed.subscribe();
        a.next().await.unwrap();
        b.next().await.unwrap();

        feed.post("Ryan".into(), "hello".into()).unwrap();
        assert_eq!(a.next().await.unwrap().len(), 1);
        assert_eq!(b.next().await.unwrap().len(), 1);
    }

    #[test]
    fn test_feed_starts_from_stored_messages() {
        let store = Arc::new(MemoryStore::new());
        store.append("Ryan".into(), "old".into()).unwrap();
        let feed = MessageFeed::new(store).unwrap();
        assert_eq!(feed.messages().len(), 1);
    }
}
