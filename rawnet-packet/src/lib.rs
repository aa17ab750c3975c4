//! Packet construction and parsing library for rawnet
//!
//! This crate provides the layered frame decoder: pure functions mapping raw
//! bytes to structured frame values, one module per protocol layer, plus the
//! construction side needed to emit a valid ICMP echo request.
//!
//! - **Ethernet II frames** (14-byte fixed header)
//! - **IPv4** packets with header-length validation and checksum calculation
//! - **ICMP** messages including echo request construction
//! - **UDP** datagrams and **TCP** segments (decode only)
//!
//! # Architecture
//!
//! - [`ethernet`] - Ethernet II frame parsing and construction
//! - [`ip`] - IPv4 packet parsing, construction, and transport dispatch
//! - [`icmp`] - ICMP message parsing and echo request construction
//! - [`tcp`] - TCP segment parsing
//! - [`udp`] - UDP datagram parsing
//! - [`checksum`] - Internet checksum (RFC 1071)
//! - [`format`] - Diagnostic rendering of already-decoded frames
//!
//! Decoding never prints or logs; every decode function validates lengths
//! before indexing and returns a [`DecodeError`](rawnet_core::DecodeError)
//! instead of panicking. Each layer's payload is the verbatim byte range
//! handed to the next layer's decoder.
//!
//! # Quick Start
//!
//! ```
//! use rawnet_packet::ethernet::EthernetFrame;
//! use rawnet_packet::ip::{Ipv4Packet, Transport};
//!
//! # fn main() -> Result<(), rawnet_core::DecodeError> {
//! # let bytes = {
//! #     use rawnet_core::MacAddr;
//! #     use rawnet_packet::ethernet::EtherType;
//! #     use rawnet_packet::icmp::IcmpPacket;
//! #     use std::net::Ipv4Addr;
//! #     let icmp = IcmpPacket::echo_request(1, 1, b"hi".to_vec());
//! #     let ip = Ipv4Packet::new(
//! #         Ipv4Addr::new(10, 0, 0, 1),
//! #         Ipv4Addr::new(10, 0, 0, 2),
//! #         rawnet_packet::ip::IpProtocol::Icmp,
//! #         icmp.to_bytes(),
//! #     );
//! #     EthernetFrame::new(MacAddr::broadcast(), MacAddr::zero(), EtherType::Ipv4, ip.to_bytes())
//! #         .to_bytes()
//! # };
//! let eth = EthernetFrame::from_bytes(&bytes)?;
//! let ip = Ipv4Packet::from_bytes(&eth.payload)?;
//! match ip.decode_transport()? {
//!     Transport::Icmp(icmp) => println!("ICMP type {}", icmp.icmp_type.to_u8()),
//!     Transport::Tcp(tcp) => println!("TCP {} -> {}", tcp.source_port, tcp.destination_port),
//!     Transport::Udp(udp) => println!("UDP {} -> {}", udp.source_port, udp.destination_port),
//! }
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod ethernet;
pub mod format;
pub mod icmp;
pub mod ip;
pub mod tcp;
pub mod udp;

pub use checksum::internet_checksum;
pub use ethernet::{EtherType, EthernetFrame};
pub use icmp::{IcmpPacket, IcmpType};
pub use ip::{IpProtocol, Ipv4Packet, Transport};
pub use tcp::TcpSegment;
pub use udp::UdpDatagram;
