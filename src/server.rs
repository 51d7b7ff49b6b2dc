#![cfg(feature = "std")]

use std::sync::Arc;

use log::{info, warn};
use tokio::net::TcpListener;

use crate::engine::GameEngine;
use crate::skeleton::Skeleton;
use crate::transport::tcp::TcpTransport;

/// Accept connections forever, one task per client, all sharing `engine`.
///
/// A connection that fails is logged and dropped; the session is untouched.
pub async fn serve(listener: TcpListener, engine: Arc<GameEngine>) -> anyhow::Result<()> {
    info!("Listening on {}", listener.local_addr()?);
    loop {
        let (stream, addr) = listener.accept().await?;
        if let Err(e) = stream.set_nodelay(true) {
            warn!("{}: could not disable Nagle: {}", addr, e);
        }
        info!("Client connected from {}", addr);
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            let mut skeleton = Skeleton::new(engine, TcpTransport::new(stream));
            match skeleton.run().await {
                Ok(()) => info!("Client {} disconnected", addr),
                Err(e) => warn!("Client {} dropped: {}", addr, e),
            }
        });
    }
}
