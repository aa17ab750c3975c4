//! Captured frame record

use crate::MacAddr;
use std::time::SystemTime;

/// A raw frame as handed over by the transport, before any decoding
#[derive(Debug, Clone)]
pub struct Packet {
    /// When the frame was received
    pub timestamp: SystemTime,
    /// Interface the frame was received on
    pub interface: String,
    /// Link-layer source address reported by the socket
    pub peer: MacAddr,
    /// Raw frame bytes (including all headers)
    pub data: Vec<u8>,
}

impl Packet {
    /// Create a new packet record timestamped now
    pub fn new(interface: String, peer: MacAddr, data: Vec<u8>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            interface,
            peer,
            data,
        }
    }

    /// Frame bytes as a slice
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Frame length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the frame is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
