//! ICMP message parsing and echo request construction
//!
//! Only the 4-byte common header (type, code, checksum) is decoded; the rest
//! of the message is payload. The construction side builds the echo request
//! used by the ping workflow, with identifier and sequence in the first four
//! payload bytes as RFC 792 lays them out.

use crate::checksum::internet_checksum;
use bytes::{BufMut, BytesMut};
use rawnet_core::{DecodeError, Layer};
use std::fmt;

/// ICMP message types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcmpType {
    /// Echo Reply (0)
    EchoReply,
    /// Destination Unreachable (3)
    DestinationUnreachable,
    /// Echo Request (8)
    EchoRequest,
    /// Time Exceeded (11)
    TimeExceeded,
    /// Any other type
    Custom(u8),
}

impl IcmpType {
    pub fn to_u8(self) -> u8 {
        match self {
            IcmpType::EchoReply => 0,
            IcmpType::DestinationUnreachable => 3,
            IcmpType::EchoRequest => 8,
            IcmpType::TimeExceeded => 11,
            IcmpType::Custom(val) => val,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => IcmpType::EchoReply,
            3 => IcmpType::DestinationUnreachable,
            8 => IcmpType::EchoRequest,
            11 => IcmpType::TimeExceeded,
            val => IcmpType::Custom(val),
        }
    }
}

impl fmt::Display for IcmpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IcmpType::EchoReply => write!(f, "echo reply"),
            IcmpType::DestinationUnreachable => write!(f, "destination unreachable"),
            IcmpType::EchoRequest => write!(f, "echo request"),
            IcmpType::TimeExceeded => write!(f, "time exceeded"),
            IcmpType::Custom(val) => write!(f, "type {val}"),
        }
    }
}

/// ICMP message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcmpPacket {
    /// Message type
    pub icmp_type: IcmpType,
    /// Message code
    pub code: u8,
    /// Message checksum as seen on the wire
    pub checksum: u16,
    /// Everything after the 4-byte common header
    pub payload: Vec<u8>,
}

impl IcmpPacket {
    /// Common ICMP header size (type, code, checksum)
    pub const HEADER_SIZE: usize = 4;

    /// Build an echo request (type 8, code 0) with identifier and sequence
    ///
    /// The identifier/sequence words and the data go into the payload; the
    /// checksum covers the whole message and is computed here.
    pub fn echo_request(identifier: u16, sequence: u16, data: Vec<u8>) -> Self {
        let mut payload = Vec::with_capacity(4 + data.len());
        payload.extend_from_slice(&identifier.to_be_bytes());
        payload.extend_from_slice(&sequence.to_be_bytes());
        payload.extend_from_slice(&data);

        let mut packet = IcmpPacket {
            icmp_type: IcmpType::EchoRequest,
            code: 0,
            checksum: 0,
            payload,
        };
        packet.checksum = internet_checksum(&packet.to_bytes());
        packet
    }

    /// Parse an ICMP message from raw bytes
    ///
    /// Fails with `TooShort` if `data` is shorter than the 4-byte header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::HEADER_SIZE {
            return Err(DecodeError::too_short(
                Layer::Icmp,
                Self::HEADER_SIZE,
                data.len(),
            ));
        }

        Ok(IcmpPacket {
            icmp_type: IcmpType::from_u8(data[0]),
            code: data[1],
            checksum: u16::from_be_bytes([data[2], data[3]]),
            payload: data[Self::HEADER_SIZE..].to_vec(),
        })
    }

    /// Convert the message to wire bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.len());

        buffer.put_u8(self.icmp_type.to_u8());
        buffer.put_u8(self.code);
        buffer.put_u16(self.checksum);
        buffer.put_slice(&self.payload);

        buffer.to_vec()
    }

    /// Echo identifier, if the payload carries one
    pub fn identifier(&self) -> Option<u16> {
        self.payload
            .get(0..2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
    }

    /// Echo sequence number, if the payload carries one
    pub fn sequence(&self) -> Option<u16> {
        self.payload
            .get(2..4)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::validate_checksum;

    #[test]
    fn test_three_bytes_too_short() {
        let err = IcmpPacket::from_bytes(&[0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                layer: Layer::Icmp,
                required: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_four_bytes_empty_payload() {
        let packet = IcmpPacket::from_bytes(&[0, 0, 0x12, 0x34]).unwrap();
        assert_eq!(packet.icmp_type, IcmpType::EchoReply);
        assert_eq!(packet.checksum, 0x1234);
        assert!(packet.payload.is_empty());
    }

    #[test]
    fn test_echo_request_layout() {
        let packet = IcmpPacket::echo_request(0xBEEF, 1, b"Hello".to_vec());
        assert_eq!(packet.icmp_type, IcmpType::EchoRequest);
        assert_eq!(packet.code, 0);
        assert_eq!(packet.identifier(), Some(0xBEEF));
        assert_eq!(packet.sequence(), Some(1));

        let bytes = packet.to_bytes();
        assert_eq!(bytes[0], 8);
        assert_eq!(&bytes[8..], b"Hello");
    }

    #[test]
    fn test_echo_request_checksum_validates() {
        let packet = IcmpPacket::echo_request(42, 1, b"Hello".to_vec());
        assert!(validate_checksum(&packet.to_bytes()));
    }

    #[test]
    fn test_echo_request_roundtrip() {
        let packet = IcmpPacket::echo_request(7, 3, vec![1, 2, 3, 4]);
        let parsed = IcmpPacket::from_bytes(&packet.to_bytes()).unwrap();
        assert_eq!(parsed, packet);
    }
}
