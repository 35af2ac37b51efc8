//! Transport sinks for encoded frames.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::net::UdpSocket;
use tracing::debug;

/// Destination for encoded frames. One call, one frame, no added framing.
#[async_trait]
pub trait FrameSink: Send {
    /// Deliver one frame. Delivery is best-effort; an error here means the
    /// local send failed, not that the remote end missed the datagram.
    async fn send(&mut self, frame: &[u8]) -> Result<()>;
}

/// Fire-and-forget UDP sink: each frame becomes exactly one datagram.
pub struct UdpSink {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSink {
    /// Bind an ephemeral local socket and connect it to `target`.
    ///
    /// # Errors
    /// Bind or connect failures, with the target in the error chain.
    pub async fn connect(target: SocketAddr) -> Result<Self> {
        let bind_addr = if target.is_ipv4() {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
        } else {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0)
        };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .context("failed to bind local UDP socket")?;
        socket
            .connect(target)
            .await
            .with_context(|| format!("failed to connect UDP socket to {target}"))?;
        debug!(%target, "udp sink connected");
        Ok(Self { socket, target })
    }

    /// The configured destination address.
    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

#[async_trait]
impl FrameSink for UdpSink {
    async fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.socket
            .send(frame)
            .await
            .with_context(|| format!("udp send to {} failed", self.target))?;
        Ok(())
    }
}
