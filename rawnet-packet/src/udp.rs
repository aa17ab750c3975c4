//! UDP datagram parsing
//!
//! Four big-endian 16-bit fields at successive 2-byte offsets, then payload.

use rawnet_core::{DecodeError, Layer};

/// UDP datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpDatagram {
    /// Source port
    pub source_port: u16,
    /// Destination port
    pub destination_port: u16,
    /// Length (header + data)
    pub length: u16,
    /// Checksum as seen on the wire
    pub checksum: u16,
    /// Payload data
    pub payload: Vec<u8>,
}

impl UdpDatagram {
    /// UDP header size in bytes
    pub const HEADER_SIZE: usize = 8;

    /// Parse a UDP datagram from raw bytes
    ///
    /// Fails with `TooShort` if `data` is shorter than the 8-byte header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::HEADER_SIZE {
            return Err(DecodeError::too_short(
                Layer::Udp,
                Self::HEADER_SIZE,
                data.len(),
            ));
        }

        Ok(UdpDatagram {
            source_port: u16::from_be_bytes([data[0], data[1]]),
            destination_port: u16::from_be_bytes([data[2], data[3]]),
            length: u16::from_be_bytes([data[4], data[5]]),
            checksum: u16::from_be_bytes([data[6], data[7]]),
            payload: data[Self::HEADER_SIZE..].to_vec(),
        })
    }
}
