//! Per-connection pump
//!
//! Owns one accepted socket: performs the WebSocket handshake, attaches the
//! connection to the hub, then pumps frames both ways until either side
//! closes. Inbound frames that fail to parse are logged and ignored; they
//! never tear the connection down.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::error::Result;
use crate::hub::{Outbox, SignalHub};
use crate::protocol::{ClientMessage, ConnectionId, ServerMessage};

/// One signaling connection, from accept to close
pub struct Connection {
    id: ConnectionId,
    socket: TcpStream,
    peer_addr: SocketAddr,
    hub: Arc<SignalHub>,
}

impl Connection {
    /// Create a connection handler for an accepted socket
    pub fn new(
        id: ConnectionId,
        socket: TcpStream,
        peer_addr: SocketAddr,
        hub: Arc<SignalHub>,
    ) -> Self {
        Self {
            id,
            socket,
            peer_addr,
            hub,
        }
    }

    /// Run the connection until it closes
    ///
    /// The hub is always detached on the way out, whatever ended the pump, so
    /// release semantics run exactly once per connection.
    pub async fn run(self) -> Result<()> {
        let Connection {
            id,
            socket,
            peer_addr,
            hub,
        } = self;

        let ws = tokio_tungstenite::accept_async(socket).await?;
        tracing::debug!(conn = %id, peer = %peer_addr, "WebSocket established");

        let (outbox, rx) = Outbox::channel(id);
        hub.attach(outbox).await;

        let result = pump(id, &hub, ws, rx).await;
        hub.detach(id).await;

        result
    }
}

async fn pump(
    id: ConnectionId,
    hub: &Arc<SignalHub>,
    ws: WebSocketStream<TcpStream>,
    mut rx: UnboundedReceiver<ServerMessage>,
) -> Result<()> {
    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            outbound = rx.recv() => {
                match outbound {
                    Some(message) => {
                        let text = serde_json::to_string(&message)?;
                        sink.send(Message::Text(text.into())).await?;
                    }
                    // Hub dropped the outbox
                    None => break,
                }
            }
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(text.as_str()) {
                            Ok(message) => hub.handle(id, message).await,
                            Err(e) => {
                                tracing::debug!(conn = %id, error = %e, "Ignoring malformed message");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    // Ping/pong are handled by the protocol layer; binary
                    // frames have no meaning here
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                }
            }
        }
    }

    Ok(())
}
