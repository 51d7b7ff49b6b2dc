#![cfg(feature = "std")]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::engine::SessionEvent;
use crate::protocol::{GameApi, Message, Reply, Request, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Client-side proxy: every `GameApi` call becomes one request/reply round
/// trip over the transport.
pub struct Stub<T: Transport> {
    transport: Mutex<T>,
    seq: AtomicU64,
    handshaken: AtomicBool,
}

async fn handshake<T: Transport>(transport: &mut T) -> anyhow::Result<()> {
    transport
        .send(Message::Hello {
            version: PROTOCOL_VERSION,
        })
        .await?;
    match transport.recv().await? {
        Message::Hello { version } if version == PROTOCOL_VERSION => Ok(()),
        Message::Hello { version } => Err(anyhow::anyhow!(
            "Protocol version mismatch: expected {}, got {}",
            PROTOCOL_VERSION,
            version
        )),
        _ => Err(anyhow::anyhow!("Unexpected message")),
    }
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
            seq: AtomicU64::new(0),
            handshaken: AtomicBool::new(false),
        }
    }

    /// Give up the request channel and follow session events instead.
    pub async fn subscribe(self) -> anyhow::Result<EventStream<T>> {
        let reply = self.call(Request::Subscribe).await?;
        match reply {
            Reply::Subscribed => Ok(EventStream {
                transport: self.transport.into_inner(),
            }),
            other => Err(anyhow::anyhow!("Unexpected reply: {:?}", other)),
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> GameApi for Stub<T> {
    async fn call(&self, request: Request) -> anyhow::Result<Reply> {
        let mut transport = self.transport.lock().await;
        if !self.handshaken.load(Ordering::SeqCst) {
            handshake(&mut *transport).await?;
            self.handshaken.store(true, Ordering::SeqCst);
        }
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        transport.send(Message::Call { seq, request }).await?;
        match transport.recv().await? {
            Message::Return {
                seq: resp_seq,
                reply,
            } if resp_seq == seq => Ok(reply),
            Message::Return { seq: resp_seq, .. } => Err(anyhow::anyhow!(
                "Sequence mismatch: expected {}, got {}",
                seq,
                resp_seq
            )),
            _ => Err(anyhow::anyhow!("Unexpected message")),
        }
    }
}

/// Session events pushed by the server after [`Stub::subscribe`].
pub struct EventStream<T: Transport> {
    transport: T,
}

impl<T: Transport> EventStream<T> {
    /// Next event; an error means the stream has ended.
    pub async fn next(&mut self) -> anyhow::Result<SessionEvent> {
        match self.transport.recv().await? {
            Message::Event(event) => Ok(event),
            other => Err(anyhow::anyhow!("Unexpected message: {:?}", other)),
        }
    }
}
