use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::connect_info::ConnectInfo;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::product::Product;
use crate::catalog::service::CatalogService;
use crate::catalog::subscriber::Subscriber;

/// Transport-backed subscriber. Delivery only pushes onto a channel drained
/// by the socket task, so a slow peer never stalls the mutation path.
struct WsSubscriber {
    identity: String,
    tx: mpsc::UnboundedSender<Message>,
}

#[async_trait]
impl Subscriber for WsSubscriber {
    async fn deliver(&self, snapshot: &[Product]) -> anyhow::Result<()> {
        let payload = serde_json::to_string(snapshot)?;
        self.tx.send(Message::Text(payload))?;
        Ok(())
    }

    fn identity(&self) -> &str {
        &self.identity
    }
}

pub async fn upgrade(
    State(service): State<Arc<CatalogService>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(service, socket, addr))
}

async fn handle_socket(service: Arc<CatalogService>, socket: WebSocket, addr: SocketAddr) {
    info!(%addr, "observer connected");

    let (tx, mut rx) = mpsc::unbounded_channel();
    // Uuid suffix keeps two sockets from the same peer address distinct.
    let identity = format!("{}#{}", addr, Uuid::new_v4().simple());
    let subscriber = Arc::new(WsSubscriber {
        identity: identity.clone(),
        tx,
    });

    if let Err(err) = service.subscribe(subscriber).await {
        warn!(%addr, "failed to register observer: {err}");
        return;
    }

    let (mut sink, mut stream) = socket.split();
    loop {
        tokio::select! {
            outgoing = rx.recv() => match outgoing {
                Some(message) => {
                    if sink.send(message).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            incoming = stream.next() => match incoming {
                // Inbound frames are ignored; the socket exists to push snapshots.
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    debug!(%addr, "observer read failed: {err}");
                    break;
                }
                None => break,
            },
        }
    }

    info!(%addr, "observer disconnected");
    if let Err(err) = service.unsubscribe(&identity).await {
        warn!(%addr, "failed to deregister observer: {err}");
    }
}
