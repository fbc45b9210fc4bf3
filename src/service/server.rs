//! # DHCPv6 UDP Server
//!
//! Reads datagrams from a UDP socket, decodes each one into a [`Request`],
//! runs the handler and sends back whatever reply the handler declared.
//!
//! ## Flow
//! ```text
//! socket -> Dhcp6Codec -> Request -> Handler(Response, Request) -> reply queue -> socket
//! ```
//!
//! Handlers are synchronous, so every request is dispatched on Tokio's
//! blocking pool; a slow handler delays only its own reply. At most
//! `backpressure_limit` requests are in flight at once; further datagrams
//! wait in the socket's receive buffer until a permit frees up. Malformed
//! datagrams are counted and dropped. A handler that never calls `send`
//! produces no datagram at all.

use crate::config::{ServerConfig, ALL_DHCP_RELAY_AGENTS_AND_SERVERS};
use crate::core::codec::Dhcp6Codec;
use crate::core::packet::Packet;
use crate::error::{ProtocolError, Result};
use crate::protocol::dispatcher::Handler;
use crate::protocol::request::{Request, Response};
use crate::utils::metrics::Metrics;

use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use tokio_util::udp::UdpFramed;
use tracing::{debug, info, instrument, trace, warn};

type ReplySender = mpsc::Sender<(Packet, SocketAddr)>;

pub struct Server {
    config: ServerConfig,
    handler: Arc<dyn Handler>,
    metrics: Arc<Metrics>,
}

impl Server {
    pub fn new<H>(config: ServerConfig, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        Self {
            config,
            handler: Arc::new(handler),
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        self.metrics.clone()
    }

    /// Bind the configured address and, if an interface is configured, join
    /// the All_DHCP_Relay_Agents_and_Servers group on it.
    pub async fn bind(&self) -> Result<UdpSocket> {
        let addr = self.config.socket_addr()?;
        let socket = UdpSocket::bind(addr).await?;

        if let Some(interface) = self.config.multicast_interface {
            socket.join_multicast_v6(&ALL_DHCP_RELAY_AGENTS_AND_SERVERS, interface)?;
            info!(
                group = %ALL_DHCP_RELAY_AGENTS_AND_SERVERS,
                interface,
                "Joined DHCPv6 multicast group"
            );
        }

        info!(address = %socket.local_addr()?, "Listening for DHCPv6 requests");
        Ok(socket)
    }

    /// Bind and serve until CTRL+C.
    #[instrument(skip(self), fields(address = %self.config.address))]
    pub async fn listen_and_serve(self) -> Result<()> {
        let socket = self.bind().await?;

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                info!("Received CTRL+C signal, shutting down");
                let _ = shutdown_tx.send(()).await;
            }
        });

        self.serve(socket, shutdown_rx).await
    }

    /// Serve requests on an already bound socket until `shutdown_rx` fires
    /// or its sender is dropped.
    #[instrument(skip_all)]
    pub async fn serve(self, socket: UdpSocket, mut shutdown_rx: mpsc::Receiver<()>) -> Result<()> {
        let (mut sink, mut stream) = UdpFramed::new(socket, Dhcp6Codec::new()).split();
        let limit = self.config.backpressure_limit.max(1);
        let (reply_tx, mut reply_rx) = mpsc::channel::<(Packet, SocketAddr)>(limit);
        let in_flight = Arc::new(Semaphore::new(limit));

        let metrics = self.metrics.clone();
        let writer = tokio::spawn(async move {
            while let Some((packet, peer)) = reply_rx.recv().await {
                let len = packet.encoded_len() as u64;
                match sink.send((packet, peer)).await {
                    Ok(()) => metrics.reply_sent(len),
                    Err(e) => {
                        metrics.send_error();
                        warn!(error = %e, %peer, "Failed to send reply");
                    }
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server");
                    break;
                }

                next = stream.next() => match next {
                    Some(Ok((packet, peer))) => {
                        let permit = tokio::select! {
                            _ = shutdown_rx.recv() => {
                                info!("Shutting down server");
                                break;
                            }
                            permit = in_flight.clone().acquire_owned() => match permit {
                                Ok(permit) => permit,
                                Err(_) => break,
                            },
                        };
                        self.dispatch(packet, peer, reply_tx.clone(), permit);
                    }
                    Some(Err(ProtocolError::Io(e))) => {
                        warn!(error = %e, "Error reading from socket");
                    }
                    Some(Err(e)) => {
                        self.metrics.decode_error();
                        debug!(error = %e, "Dropping malformed datagram");
                    }
                    None => break,
                }
            }
        }

        // The writer exits once every in-flight dispatch has released its sender.
        drop(reply_tx);
        drop(stream);
        if tokio::time::timeout(self.config.shutdown_timeout, writer)
            .await
            .is_err()
        {
            warn!("Shutdown timeout reached, abandoning pending replies");
        }

        self.metrics.log_metrics();
        Ok(())
    }

    /// Run the handler on the blocking pool. `permit` is held until the
    /// reply has been queued.
    fn dispatch(
        &self,
        packet: Packet,
        peer: SocketAddr,
        reply_tx: ReplySender,
        permit: OwnedSemaphorePermit,
    ) {
        let handler = self.handler.clone();
        let metrics = self.metrics.clone();
        metrics.datagram_received(packet.encoded_len() as u64);

        tokio::task::spawn_blocking(move || {
            let request = Request::parse(packet, Some(peer));
            let mut response = Response::new(request.transaction_id());

            metrics.request_dispatched();
            handler.serve_dhcp(&mut response, &request);

            match response.into_packet() {
                Some(reply) => {
                    trace!(
                        request = %request.message_type(),
                        reply = %reply.message_type,
                        transaction_id = %reply.transaction_id,
                        %peer,
                        "Queueing reply"
                    );
                    if reply_tx.blocking_send((reply, peer)).is_err() {
                        debug!(%peer, "Server stopped, dropping reply");
                    }
                }
                None => metrics.request_unanswered(),
            }
            drop(permit);
        });
    }
}
