use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::ClientError;
use super::protocol::SUBPROTOCOL;

pub type FeedSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Open the subscription WebSocket, negotiating the `graphql-ws` subprotocol.
pub async fn connect_feed(url: &str) -> Result<FeedSocket, ClientError> {
    let mut request = url.into_client_request()?;
    request
        .headers_mut()
        .insert(SEC_WEBSOCKET_PROTOCOL, HeaderValue::from_static(SUBPROTOCOL));

    let (socket, response) = connect_async(request).await?;
    log::debug!("Subscription socket upgraded ({})", response.status());
    Ok(socket)
}
