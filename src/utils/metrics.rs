//! # Server Metrics
//!
//! Lock-free counters for a running server. Each [`Server`](crate::service::server::Server)
//! owns one [`Metrics`] instance, shared with its tasks through an `Arc`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Per-server counters
#[derive(Debug)]
pub struct Metrics {
    datagrams_received: AtomicU64,
    bytes_received: AtomicU64,
    decode_errors: AtomicU64,
    requests_dispatched: AtomicU64,
    requests_unanswered: AtomicU64,
    replies_sent: AtomicU64,
    bytes_sent: AtomicU64,
    send_errors: AtomicU64,
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            datagrams_received: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            requests_dispatched: AtomicU64::new(0),
            requests_unanswered: AtomicU64::new(0),
            replies_sent: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            send_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a datagram read from the socket
    pub fn datagram_received(&self, byte_count: u64) {
        self.datagrams_received.fetch_add(1, Ordering::Relaxed);
        self.bytes_received.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a datagram that failed to decode. Its size is unknown once
    /// the codec has rejected it, so only the datagram count moves.
    pub fn decode_error(&self) {
        self.datagrams_received.fetch_add(1, Ordering::Relaxed);
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request handed to the handler
    pub fn request_dispatched(&self) {
        self.requests_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request for which the handler declared no reply
    pub fn request_unanswered(&self) {
        self.requests_unanswered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a reply written to the socket
    pub fn reply_sent(&self, byte_count: u64) {
        self.replies_sent.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a reply that could not be encoded or written
    pub fn send_error(&self) {
        self.send_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            datagrams_received: self.datagrams_received.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            requests_dispatched: self.requests_dispatched.load(Ordering::Relaxed),
            requests_unanswered: self.requests_unanswered.load(Ordering::Relaxed),
            replies_sent: self.replies_sent.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            send_errors: self.send_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            datagrams_received = snapshot.datagrams_received,
            bytes_received = snapshot.bytes_received,
            decode_errors = snapshot.decode_errors,
            requests_dispatched = snapshot.requests_dispatched,
            requests_unanswered = snapshot.requests_unanswered,
            replies_sent = snapshot.replies_sent,
            bytes_sent = snapshot.bytes_sent,
            send_errors = snapshot.send_errors,
            uptime_seconds = snapshot.uptime_seconds,
            "DHCPv6 server metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub datagrams_received: u64,
    pub bytes_received: u64,
    pub decode_errors: u64,
    pub requests_dispatched: u64,
    pub requests_unanswered: u64,
    pub replies_sent: u64,
    pub bytes_sent: u64,
    pub send_errors: u64,
    pub uptime_seconds: u64,
}
