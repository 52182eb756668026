use std::sync::Arc;

use async_graphql::{Context, ID, Object, Schema, Subscription};
use futures::{Stream, StreamExt};

use super::feed::MessageFeed;
use crate::common::Message;

pub type ChatSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the gateway schema around a shared message feed.
pub fn build_schema(feed: Arc<MessageFeed>) -> ChatSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(feed)
        .finish()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every message posted so far, oldest first.
    async fn messages(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Message>> {
        let feed = ctx.data::<Arc<MessageFeed>>()?;
        Ok(feed.messages().as_ref().clone())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Append a message; every open `messages` subscription receives the new collection.
    async fn post_message(
        &self,
        ctx: &Context<'_>,
        user: String,
        content: String,
    ) -> async_graphql::Result<ID> {
        let feed = ctx.data::<Arc<MessageFeed>>()?;
        let message = feed.post(user, content)?;
        Ok(message.id)
    }
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// The full message collection, now and after every change.
    async fn messages(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<impl Stream<Item = Vec<Message>>> {
        let feed = ctx.data::<Arc<MessageFeed>>()?;
        Ok(feed.subscribe().map(|snapshot| snapshot.as_ref().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_graphql::{Request, Variables};
    use serde_json::json;

    fn schema() -> ChatSchema {
        let feed = MessageFeed::new(Arc::new(MemoryStore::new())).unwrap();
        build_schema(Arc::new(feed))
    }

    fn post(user: &str, content: &str) -> Request {
        Request::new(
            "mutation ($user: String!, $content: String!) { postMessage(user: $user, content: $content) }",
        )
        .variables(Variables::from_json(
            json!({ "user": user, "content": content }),
        ))
    }

    #[tokio::test]
    async fn test_post_message_returns_id_and_is_queryable() {
        let schema = schema();

        let response = schema.execute(post("Ryan", "hello")).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        let id = data["postMessage"].as_str().unwrap().to_string();

        let response = schema.execute("{ messages { id content user } }").await;
        let data = response.data.into_json().unwrap();
        assert_eq!(
            data,
            json!({ "messages": [{ "id": id, "content": "hello", "user": "Ryan" }] })
        );
    }

    #[tokio::test]
    async fn test_missing_argument_is_rejected() {
        let schema = schema();
        let response = schema
            .execute(r#"mutation { postMessage(user: "Ryan") }"#)
            .await;
        assert!(!response.errors.is_empty());
    }

    #[tokio::test]
    async fn test_subscription_pushes_full_collection() {
        let schema = schema();
        schema.execute(post("Ryan", "first")).await;

        let mut stream = schema.execute_stream("subscription { messages { id content user } }");

        let initial = stream.next().await.unwrap().data.into_json().unwrap();
        assert_eq!(initial["messages"].as_array().unwrap().len(), 1);

        schema.execute(post("Ana", "second")).await;

        let update = stream.next().await.unwrap().data.into_json().unwrap();
        let messages = update["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["content"], "first");
        assert_eq!(messages[1]["user"], "Ana");
    }
}
