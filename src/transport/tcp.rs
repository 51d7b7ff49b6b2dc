use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::Transport;

/// Default timeout for writing a frame or finishing a partially read one.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest accepted frame. Session messages are a few hundred bytes.
const MAX_MESSAGE_SIZE: u32 = 64 * 1024;

/// Length-prefixed bincode frames over TCP: a 4-byte big-endian length
/// followed by the payload.
///
/// Waiting for the next frame is unbounded, since clients may sit idle
/// between moves; once a length prefix arrives the rest of the frame must
/// follow within the timeout.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
}

fn map_io(e: std::io::Error, op: &str) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed by peer"),
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {
            anyhow::anyhow!("Connection reset by peer")
        }
        _ => anyhow::anyhow!("{} error: {}", op, e),
    }
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_timeout(stream, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self {
            stream,
            timeout_duration,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self::new(stream))
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let data =
            bincode::serialize(&msg).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
        if data.len() as u64 > self.max_message_size as u64 {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                self.max_message_size
            ));
        }

        let limit = self.timeout_duration;
        let send_op = async {
            let len = (data.len() as u32).to_be_bytes();
            self.stream
                .write_all(&len)
                .await
                .map_err(|e| map_io(e, "Write"))?;
            self.stream
                .write_all(&data)
                .await
                .map_err(|e| map_io(e, "Write"))?;
            anyhow::Ok(())
        };
        timeout(limit, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", limit))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let mut len_buf = [0u8; 4];
        self.stream
            .read_exact(&mut len_buf)
            .await
            .map_err(|e| map_io(e, "Read"))?;

        let len = u32::from_be_bytes(len_buf);
        if len == 0 {
            return Err(anyhow::anyhow!("Invalid message length: 0"));
        }
        if len > self.max_message_size {
            return Err(anyhow::anyhow!(
                "Message too large: {} bytes (max: {})",
                len,
                self.max_message_size
            ));
        }

        let limit = self.timeout_duration;
        let mut buf = vec![0u8; len as usize];
        timeout(limit, self.stream.read_exact(&mut buf))
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", limit))?
            .map_err(|e| map_io(e, "Read"))?;

        bincode::deserialize(&buf).map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))
    }
}
