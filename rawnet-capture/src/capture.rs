//! Capture loop: receive, decode layer by layer, report
//!
//! The loop has a single running state and no terminal state of its own; it
//! ends only on a fatal transport error, an external cancellation, or the
//! optional frame budget. Decode failures and receive timeouts are recovered
//! in place and never abort the loop.

use crate::stats::{CaptureStats, StatsAccumulator};
use crate::transport::Transport;
use rawnet_core::{DecodeError, Packet, TransportError};
use rawnet_packet::ip::Transport as TransportLayer;
use rawnet_packet::{EthernetFrame, Ipv4Packet};
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for a capture run
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Deadline for each receive attempt
    pub receive_timeout: Duration,
    /// Stop after this many decoded frames (unbounded by default)
    pub max_frames: Option<u64>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            receive_timeout: Duration::from_secs(1),
            max_frames: None,
        }
    }
}

/// A frame decoded through all layers
#[derive(Debug, Clone)]
pub struct Dissection {
    /// The raw frame as received
    pub packet: Packet,
    /// Link layer
    pub ethernet: EthernetFrame,
    /// Network layer
    pub ip: Ipv4Packet,
    /// Transport layer, dispatched by protocol number
    pub transport: TransportLayer,
}

/// Decode one raw frame through Ethernet, IPv4, and the transport layer
pub fn dissect(packet: &Packet) -> Result<Dissection, DecodeError> {
    let ethernet = EthernetFrame::from_bytes(packet.data())?;
    let ip = Ipv4Packet::from_bytes(&ethernet.payload)?;
    let transport = ip.decode_transport()?;

    Ok(Dissection {
        packet: packet.clone(),
        ethernet,
        ip,
        transport,
    })
}

/// Repeatedly receives and dissects frames from a transport
pub struct CaptureLoop<T: Transport> {
    transport: T,
    config: CaptureConfig,
}

impl<T: Transport> CaptureLoop<T> {
    /// Create a capture loop over an already-open transport
    pub fn new(transport: T, config: CaptureConfig) -> Self {
        Self { transport, config }
    }

    /// Run until a fatal transport error or the frame budget is reached
    ///
    /// `report` is invoked once per fully-decoded frame. A [`DecodeError`]
    /// skips the frame and continues; a [`TransportError::Timeout`] triggers
    /// another receive attempt; any other transport error terminates the loop
    /// and propagates. On a bounded run the stats snapshot is returned.
    pub fn run<F>(&mut self, mut report: F) -> Result<CaptureStats, TransportError>
    where
        F: FnMut(&Dissection),
    {
        let mut stats = StatsAccumulator::new();

        loop {
            if let Some(max) = self.config.max_frames {
                if stats.snapshot().frames_received >= max {
                    debug!(max, "frame budget reached, stopping capture");
                    break;
                }
            }

            match self.transport.receive(self.config.receive_timeout) {
                Ok(packet) => {
                    stats.record_frame(packet.len());
                    match dissect(&packet) {
                        Ok(dissection) => report(&dissection),
                        Err(e) => {
                            stats.record_decode_error();
                            warn!(error = %e, bytes = packet.len(), "skipping undecodable frame");
                        }
                    }
                }
                Err(TransportError::Timeout(_)) => {
                    stats.record_timeout();
                }
                Err(e) => return Err(e),
            }
        }

        Ok(stats.snapshot())
    }

    /// Consume the loop and hand the transport back
    pub fn into_transport(self) -> T {
        self.transport
    }
}
