use futures::{SinkExt, StreamExt};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use crate::common::{ClientCommand, ClientEvent, PostMessage};

use super::ClientError;
use super::protocol::{
    ClientFrame, ExecutionResult, MESSAGES_SUBSCRIPTION, OperationPayload, POST_MESSAGE_MUTATION,
    ServerFrame,
};
use super::transport::{FeedSocket, connect_feed};

const SUBSCRIPTION_ID: &str = "1";

/// Endpoints of a running gateway.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub graphql_url: String,
    pub subscriptions_url: String,
}

/// Network side of the chat window: one live-feed subscription plus
/// fire-and-forget `postMessage` mutations.
pub struct GraphQLClient {
    endpoints: Endpoints,
    http: reqwest::Client,
    event_sender: mpsc::Sender<ClientEvent>,
    command_receiver: mpsc::Receiver<ClientCommand>,
}

impl GraphQLClient {
    pub fn new(
        endpoints: Endpoints,
        event_sender: mpsc::Sender<ClientEvent>,
        command_receiver: mpsc::Receiver<ClientCommand>,
    ) -> Self {
        Self {
            endpoints,
            http: reqwest::Client::new(),
            event_sender,
            command_receiver,
        }
    }

    /// Run until the feed closes or the UI drops its command sender.
    /// The connection is not retried.
    pub async fn run(mut self) -> Result<(), ClientError> {
        let result = self.run_feed().await;
        let _ = self.event_sender.send(ClientEvent::FeedClosed).await;
        result
    }

    async fn run_feed(&mut self) -> Result<(), ClientError> {
        let mut socket = connect_feed(&self.endpoints.subscriptions_url).await?;
        log::info!("Connected to {}", self.endpoints.subscriptions_url);

        send_frame(
            &mut socket,
            &ClientFrame::ConnectionInit { payload: json!({}) },
        )
        .await?;
        await_ack(&mut socket).await?;

        send_frame(
            &mut socket,
            &ClientFrame::Start {
                id: SUBSCRIPTION_ID.to_string(),
                payload: OperationPayload {
                    query: MESSAGES_SUBSCRIPTION.to_string(),
                    variables: None,
                },
            },
        )
        .await?;
        log::info!("Subscribed to message feed");

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => {
                            let _ = send_frame(&mut socket, &ClientFrame::ConnectionTerminate).await;
                            break;
                        }
                    }
                }
                frame = socket.next() => {
                    let Some(frame) = frame else {
                        log::info!("Message feed closed by server");
                        break;
                    };
                    if !self.handle_socket_message(frame?).await {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_command(&self, command: ClientCommand) {
        match command {
            ClientCommand::PostMessage(post) => {
                let http = self.http.clone();
                let url = self.endpoints.graphql_url.clone();
                tokio::spawn(async move {
                    if let Err(err) = post_message(&http, &url, &post).await {
                        log::warn!("postMessage failed: {err}");
                    }
                });
            }
        }
    }

    /// Returns `false` once the subscription is over.
    async fn handle_socket_message(&self, message: WsMessage) -> bool {
        let text = match message {
            WsMessage::Text(text) => text,
            WsMessage::Close(frame) => {
                log::info!("Message feed closed: {frame:?}");
                return false;
            }
            _ => return true,
        };

        let frame = match serde_json::from_str::<ServerFrame>(text.as_str()) {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("Ignoring malformed frame: {err}");
                return true;
            }
        };

        match frame {
            ServerFrame::Data { id, payload } => {
                if id != SUBSCRIPTION_ID {
                    log::debug!("Ignoring data for unknown operation {id}");
                    return true;
                }
                for error in &payload.errors {
                    log::warn!("Subscription error: {error}");
                }
                if let Some(messages) = payload.messages() {
                    if let Err(err) = self
                        .event_sender
                        .send(ClientEvent::MessagesUpdated(messages))
                        .await
                    {
                        log::warn!("Failed to notify UI about new messages: {err:?}");
                        return false;
                    }
                }
                true
            }
            ServerFrame::Error { id, payload } => {
                log::warn!("Operation {id} rejected: {payload}");
                true
            }
            ServerFrame::ConnectionError { payload } => {
                log::error!("Connection error from server: {payload}");
                false
            }
            ServerFrame::Complete { id } => {
                log::info!("Operation {id} completed");
                id != SUBSCRIPTION_ID
            }
            ServerFrame::Ka | ServerFrame::ConnectionAck | ServerFrame::Unknown => true,
        }
    }
}

async fn send_frame(socket: &mut FeedSocket, frame: &ClientFrame) -> Result<(), ClientError> {
    let text = serde_json::to_string(frame)?;
    socket.send(WsMessage::Text(text.into())).await?;
    Ok(())
}

async fn await_ack(socket: &mut FeedSocket) -> Result<(), ClientError> {
    while let Some(message) = socket.next().await {
        let WsMessage::Text(text) = message? else {
            continue;
        };
        match serde_json::from_str::<ServerFrame>(text.as_str())? {
            ServerFrame::ConnectionAck => return Ok(()),
            ServerFrame::ConnectionError { payload } => {
                return Err(ClientError::Rejected(payload.to_string()));
            }
            _ => {}
        }
    }
    Err(ClientError::Rejected(
        "connection closed before acknowledgement".to_string(),
    ))
}

/// Issue one `postMessage` mutation. The returned id is not used.
pub async fn post_message(
    http: &reqwest::Client,
    url: &str,
    post: &PostMessage,
) -> Result<(), ClientError> {
    let body = OperationPayload {
        query: POST_MESSAGE_MUTATION.to_string(),
        variables: Some(serde_json::to_value(post)?),
    };

    let result: ExecutionResult = http
        .post(url)
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if !result.errors.is_empty() {
        log::warn!("postMessage returned errors: {:?}", result.errors);
    }
    Ok(())
}
