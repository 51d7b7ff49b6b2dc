#![cfg(feature = "std")]

use std::sync::Arc;

use anyhow::anyhow;
use log::{debug, warn};
use tokio::sync::broadcast::error::RecvError;

use crate::engine::{GameEngine, SessionEvent};
use crate::engine_api::dispatch;
use crate::protocol::{Message, Reply, Request, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Server side of one client connection.
pub struct Skeleton<T: Transport> {
    engine: Arc<GameEngine>,
    transport: T,
}

impl<T: Transport> Skeleton<T> {
    pub fn new(engine: Arc<GameEngine>, transport: T) -> Self {
        Self { engine, transport }
    }

    async fn handshake(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::Hello {
                        version: PROTOCOL_VERSION,
                    })
                    .await
            }
            Message::Hello { version } => Err(anyhow!(
                "Protocol version mismatch: expected {}, got {}",
                PROTOCOL_VERSION,
                version
            )),
            _ => Err(anyhow!("Expected handshake")),
        }
    }

    /// Serve calls until the peer goes away. A `Subscribe` call switches the
    /// connection to event streaming for the rest of its life.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.handshake().await?;

        while let Ok(msg) = self.transport.recv().await {
            match msg {
                Message::Call {
                    seq,
                    request: Request::Subscribe,
                } => {
                    let events = self.engine.subscribe();
                    self.transport
                        .send(Message::Return {
                            seq,
                            reply: Reply::Subscribed,
                        })
                        .await?;
                    if self.engine.is_game_over() {
                        let winner = self.engine.winner_id();
                        return self
                            .transport
                            .send(Message::Event(SessionEvent::GameOver { winner }))
                            .await;
                    }
                    return self.stream_events(events).await;
                }
                Message::Call { seq, request } => {
                    debug!("call #{}: {:?}", seq, request);
                    let reply = dispatch(&self.engine, request);
                    self.transport.send(Message::Return { seq, reply }).await?;
                }
                other => {
                    warn!("Unexpected message from client: {:?}", other);
                    return Err(anyhow!("Unexpected message (closing session)"));
                }
            }
        }
        Ok(())
    }

    async fn stream_events(
        &mut self,
        mut events: tokio::sync::broadcast::Receiver<SessionEvent>,
    ) -> anyhow::Result<()> {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let over = matches!(event, SessionEvent::GameOver { .. });
                    self.transport.send(Message::Event(event)).await?;
                    if over {
                        return Ok(());
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event subscriber lagged, {} events dropped", skipped);
                }
                Err(RecvError::Closed) => return Ok(()),
            }
        }
    }
}
