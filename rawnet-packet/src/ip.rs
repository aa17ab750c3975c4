//! IPv4 packet parsing, construction, and transport dispatch
//!
//! The IPv4 header is variable length: the low nibble of byte 0 holds the
//! header length in 32-bit words (minimum 5, so 20 bytes). The payload handed
//! to the transport-layer decoders starts after the full header, options
//! included.

use crate::checksum::internet_checksum;
use crate::icmp::IcmpPacket;
use crate::tcp::TcpSegment;
use crate::udp::UdpDatagram;
use bytes::{BufMut, BytesMut};
use rawnet_core::{DecodeError, Layer};
use std::fmt;
use std::net::Ipv4Addr;

/// IP protocol numbers (IANA assigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpProtocol {
    /// ICMP (1)
    Icmp,
    /// TCP (6)
    Tcp,
    /// UDP (17)
    Udp,
    /// Any other protocol number
    Custom(u8),
}

impl IpProtocol {
    pub fn to_u8(self) -> u8 {
        match self {
            IpProtocol::Icmp => 1,
            IpProtocol::Tcp => 6,
            IpProtocol::Udp => 17,
            IpProtocol::Custom(val) => val,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => IpProtocol::Icmp,
            6 => IpProtocol::Tcp,
            17 => IpProtocol::Udp,
            val => IpProtocol::Custom(val),
        }
    }
}

impl fmt::Display for IpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpProtocol::Icmp => write!(f, "ICMP"),
            IpProtocol::Tcp => write!(f, "TCP"),
            IpProtocol::Udp => write!(f, "UDP"),
            IpProtocol::Custom(val) => write!(f, "protocol {val}"),
        }
    }
}

/// Decoded transport layer of an IPv4 packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Icmp(IcmpPacket),
    Tcp(TcpSegment),
    Udp(UdpDatagram),
}

/// IPv4 packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Packet {
    /// Version (always 4)
    pub version: u8,
    /// Internet Header Length in 32-bit words (minimum 5)
    pub ihl: u8,
    /// Type of Service
    pub tos: u8,
    /// Total length (header + data) in bytes
    pub total_length: u16,
    /// Time to Live
    pub ttl: u8,
    /// Encapsulated protocol
    pub protocol: IpProtocol,
    /// Header checksum
    pub checksum: u16,
    /// Source IP address
    pub source: Ipv4Addr,
    /// Destination IP address
    pub destination: Ipv4Addr,
    /// Payload data (bytes after ihl * 4)
    pub payload: Vec<u8>,
}

impl Ipv4Packet {
    /// Minimum IPv4 header size (ihl = 5, no options)
    pub const MIN_HEADER_SIZE: usize = 20;

    /// Create a new minimal IPv4 packet (ihl = 5, TTL 64, checksum unset)
    ///
    /// The header checksum is computed by [`to_bytes`](Self::to_bytes).
    pub fn new(
        source: Ipv4Addr,
        destination: Ipv4Addr,
        protocol: IpProtocol,
        payload: Vec<u8>,
    ) -> Self {
        let total_length = (Self::MIN_HEADER_SIZE + payload.len()) as u16;

        Ipv4Packet {
            version: 4,
            ihl: 5,
            tos: 0,
            total_length,
            ttl: 64,
            protocol,
            checksum: 0,
            source,
            destination,
            payload,
        }
    }

    /// Set the Time to Live
    pub fn with_ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    /// Header length in bytes (ihl * 4)
    pub fn header_len(&self) -> usize {
        self.ihl as usize * 4
    }

    /// Parse an IPv4 packet from raw bytes
    ///
    /// Validation order: minimum 20 bytes, version must be 4, header length
    /// at least 5 words, input at least as long as the full header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::MIN_HEADER_SIZE {
            return Err(DecodeError::too_short(
                Layer::Ipv4,
                Self::MIN_HEADER_SIZE,
                data.len(),
            ));
        }

        let version = data[0] >> 4;
        let ihl = data[0] & 0x0F;

        if version != 4 {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        if ihl < 5 {
            return Err(DecodeError::InvalidHeaderLength(ihl));
        }

        let header_len = ihl as usize * 4;
        if data.len() < header_len {
            return Err(DecodeError::too_short(Layer::Ipv4, header_len, data.len()));
        }

        Ok(Ipv4Packet {
            version,
            ihl,
            tos: data[1],
            total_length: u16::from_be_bytes([data[2], data[3]]),
            ttl: data[8],
            protocol: IpProtocol::from_u8(data[9]),
            checksum: u16::from_be_bytes([data[10], data[11]]),
            source: Ipv4Addr::new(data[12], data[13], data[14], data[15]),
            destination: Ipv4Addr::new(data[16], data[17], data[18], data[19]),
            payload: data[header_len..].to_vec(),
        })
    }

    /// Decode the payload according to the protocol number
    ///
    /// Dispatches on the IANA assignment: 1 to ICMP, 6 to TCP, 17 to UDP.
    /// Any other protocol fails with `UnsupportedProtocol`.
    pub fn decode_transport(&self) -> Result<Transport, DecodeError> {
        match self.protocol {
            IpProtocol::Icmp => Ok(Transport::Icmp(IcmpPacket::from_bytes(&self.payload)?)),
            IpProtocol::Tcp => Ok(Transport::Tcp(TcpSegment::from_bytes(&self.payload)?)),
            IpProtocol::Udp => Ok(Transport::Udp(UdpDatagram::from_bytes(&self.payload)?)),
            IpProtocol::Custom(val) => Err(DecodeError::UnsupportedProtocol(val)),
        }
    }

    /// Convert the packet to wire bytes, computing the header checksum
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(self.header_len() + self.payload.len());

        buffer.put_u8((self.version << 4) | (self.ihl & 0x0F));
        buffer.put_u8(self.tos);
        buffer.put_u16(self.total_length);
        buffer.put_u16(0); // identification
        buffer.put_u16(0x4000); // don't fragment, offset 0
        buffer.put_u8(self.ttl);
        buffer.put_u8(self.protocol.to_u8());
        buffer.put_u16(0); // checksum placeholder
        buffer.put_slice(&self.source.octets());
        buffer.put_slice(&self.destination.octets());

        let checksum = internet_checksum(&buffer);
        buffer[10..12].copy_from_slice(&checksum.to_be_bytes());

        buffer.put_slice(&self.payload);
        buffer.to_vec()
    }
}
