//! Transport selection for the serve loop.
use std::fmt;

use tokio::io::{AsyncRead, AsyncWrite, DuplexStream};

/// Buffer size of the in-memory pipe created by [`Transport::in_memory`].
pub const IN_MEMORY_BUFFER_BYTES: usize = 64 * 1024;

/// Any bidirectional byte stream usable as a custom transport.
pub trait ByteStream: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

impl<T> ByteStream for T where T: AsyncRead + AsyncWrite + Send + Unpin + 'static {}

/// Byte-level channel carrying protocol messages.
#[derive(Default)]
pub enum Transport {
    /// Process stdin/stdout.
    #[default]
    Stdio,
    /// Server end of an in-process pipe.
    InMemory(DuplexStream),
    /// Externally supplied stream.
    Custom(Box<dyn ByteStream>),
    /// Reserved; rejected at startup.
    Http { port: u16 },
}

impl Transport {
    /// In-process transport plus the client end of the same pipe.
    pub fn in_memory() -> (Self, DuplexStream) {
        let (server, client) = tokio::io::duplex(IN_MEMORY_BUFFER_BYTES);
        (Transport::InMemory(server), client)
    }

    /// Wrap an externally supplied stream.
    pub fn custom(stream: impl ByteStream) -> Self {
        Transport::Custom(Box::new(stream))
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Transport::Stdio => "stdio",
            Transport::InMemory(_) => "in_memory",
            Transport::Custom(_) => "custom",
            Transport::Http { .. } => "http",
        }
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Http { port } => f.debug_struct("Http").field("port", port).finish(),
            other => f.write_str(other.as_str()),
        }
    }
}
