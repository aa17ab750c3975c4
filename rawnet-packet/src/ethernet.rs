//! Ethernet II frame parsing and construction
//!
//! The Ethernet header is a fixed 14 bytes: destination MAC, source MAC, and
//! a big-endian EtherType. Everything after offset 14 is payload and is
//! handed verbatim to the next layer's decoder.

use bytes::{BufMut, BytesMut};
use rawnet_core::{DecodeError, Layer, MacAddr};
use std::fmt;

/// Common EtherType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherType {
    /// IPv4 (0x0800)
    Ipv4,
    /// ARP (0x0806)
    Arp,
    /// IPv6 (0x86DD)
    Ipv6,
    /// Any other EtherType
    Custom(u16),
}

impl EtherType {
    /// Convert EtherType to its wire value
    pub fn to_u16(self) -> u16 {
        match self {
            EtherType::Ipv4 => 0x0800,
            EtherType::Arp => 0x0806,
            EtherType::Ipv6 => 0x86DD,
            EtherType::Custom(val) => val,
        }
    }

    /// Create EtherType from its wire value
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0800 => EtherType::Ipv4,
            0x0806 => EtherType::Arp,
            0x86DD => EtherType::Ipv6,
            val => EtherType::Custom(val),
        }
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtherType::Ipv4 => write!(f, "IPv4"),
            EtherType::Arp => write!(f, "ARP"),
            EtherType::Ipv6 => write!(f, "IPv6"),
            EtherType::Custom(val) => write!(f, "0x{val:04X}"),
        }
    }
}

/// Ethernet II frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetFrame {
    /// Destination MAC address
    pub destination: MacAddr,
    /// Source MAC address
    pub source: MacAddr,
    /// EtherType of the payload
    pub ethertype: EtherType,
    /// Payload data (bytes after the 14-byte header)
    pub payload: Vec<u8>,
}

impl EthernetFrame {
    /// Ethernet header size (dst + src + type)
    pub const HEADER_SIZE: usize = 14;

    /// Create a new Ethernet frame
    pub fn new(
        destination: MacAddr,
        source: MacAddr,
        ethertype: EtherType,
        payload: Vec<u8>,
    ) -> Self {
        EthernetFrame {
            destination,
            source,
            ethertype,
            payload,
        }
    }

    /// Parse an Ethernet frame from raw bytes
    ///
    /// Fails with `TooShort` if `data` is shorter than the 14-byte header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::HEADER_SIZE {
            return Err(DecodeError::too_short(
                Layer::Ethernet,
                Self::HEADER_SIZE,
                data.len(),
            ));
        }

        // from_slice cannot fail on a checked 6-byte range
        let destination = MacAddr::from_slice(&data[0..6]).unwrap_or(MacAddr::zero());
        let source = MacAddr::from_slice(&data[6..12]).unwrap_or(MacAddr::zero());
        let ethertype = EtherType::from_u16(u16::from_be_bytes([data[12], data[13]]));

        Ok(EthernetFrame {
            destination,
            source,
            ethertype,
            payload: data[Self::HEADER_SIZE..].to_vec(),
        })
    }

    /// Convert the frame to wire bytes
    ///
    /// The output is exactly header plus payload; no minimum-size padding is
    /// applied, so `from_bytes(&frame.to_bytes())` reproduces `frame`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.len());

        buffer.put_slice(self.destination.as_bytes());
        buffer.put_slice(self.source.as_bytes());
        buffer.put_u16(self.ethertype.to_u16());
        buffer.put_slice(&self.payload);

        buffer.to_vec()
    }

    /// Total frame size in bytes
    pub fn len(&self) -> usize {
        Self::HEADER_SIZE + self.payload.len()
    }

    /// Check if the frame carries no payload
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame_bytes() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]); // dst
        data.extend_from_slice(&[0x11, 0x12, 0x13, 0x14, 0x15, 0x16]); // src
        data.extend_from_slice(&0x0800u16.to_be_bytes());
        data.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        data
    }

    #[test]
    fn test_ethertype_conversion() {
        assert_eq!(EtherType::Ipv4.to_u16(), 0x0800);
        assert_eq!(EtherType::from_u16(0x0800), EtherType::Ipv4);
        assert_eq!(EtherType::from_u16(0x1234), EtherType::Custom(0x1234));
    }

    #[test]
    fn test_decode_sample_frame_fields() {
        let frame = EthernetFrame::from_bytes(&sample_frame_bytes()).unwrap();
        assert_eq!(frame.destination.octets(), [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(frame.source.octets(), [0x11, 0x12, 0x13, 0x14, 0x15, 0x16]);
        assert_eq!(frame.ethertype, EtherType::Ipv4);
        assert_eq!(frame.payload, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_decode_encode_roundtrip_is_exact() {
        let original = sample_frame_bytes();
        let frame = EthernetFrame::from_bytes(&original).unwrap();
        assert_eq!(frame.to_bytes(), original);
    }

    #[test]
    fn test_thirteen_bytes_too_short() {
        let err = EthernetFrame::from_bytes(&[0u8; 13]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                layer: rawnet_core::Layer::Ethernet,
                required: 14,
                actual: 13,
            }
        );
    }

    #[test]
    fn test_fourteen_bytes_empty_payload() {
        let frame = EthernetFrame::from_bytes(&[0u8; 14]).unwrap();
        assert!(frame.payload.is_empty());
        assert_eq!(frame.len(), 14);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let bytes = sample_frame_bytes();
        let first = EthernetFrame::from_bytes(&bytes).unwrap();
        let second = EthernetFrame::from_bytes(&bytes).unwrap();
        assert_eq!(first, second);
    }
}
