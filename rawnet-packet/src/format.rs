//! Diagnostic rendering of decoded frames
//!
//! Decoding is pure; anything human-readable lives here and takes an
//! already-decoded frame. Callers (the capture loop, the CLI) decide whether
//! and where to print.

use crate::ethernet::EthernetFrame;
use crate::icmp::IcmpPacket;
use crate::ip::{Ipv4Packet, Transport};
use crate::tcp::TcpSegment;
use crate::udp::UdpDatagram;

/// One-line summary of an Ethernet frame header
pub fn ethernet_summary(frame: &EthernetFrame) -> String {
    format!(
        "{} -> {} [{}] {} bytes payload",
        frame.source,
        frame.destination,
        frame.ethertype,
        frame.payload.len()
    )
}

/// One-line summary of an IPv4 header
pub fn ipv4_summary(packet: &Ipv4Packet) -> String {
    format!(
        "{} -> {} {} ttl={} len={}",
        packet.source, packet.destination, packet.protocol, packet.ttl, packet.total_length
    )
}

/// One-line summary of an ICMP message
pub fn icmp_summary(packet: &IcmpPacket) -> String {
    format!(
        "ICMP {} code={} checksum=0x{:04x}",
        packet.icmp_type, packet.code, packet.checksum
    )
}

/// One-line summary of a TCP segment
pub fn tcp_summary(segment: &TcpSegment) -> String {
    format!(
        "TCP {} -> {} seq={} ack={} flags=0x{:02x}",
        segment.source_port,
        segment.destination_port,
        segment.sequence,
        segment.acknowledgment,
        segment.flags
    )
}

/// One-line summary of a UDP datagram
pub fn udp_summary(datagram: &UdpDatagram) -> String {
    format!(
        "UDP {} -> {} len={}",
        datagram.source_port, datagram.destination_port, datagram.length
    )
}

/// One-line summary of a decoded transport layer
pub fn transport_summary(transport: &Transport) -> String {
    match transport {
        Transport::Icmp(icmp) => icmp_summary(icmp),
        Transport::Tcp(tcp) => tcp_summary(tcp),
        Transport::Udp(udp) => udp_summary(udp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethernet::EtherType;
    use rawnet_core::MacAddr;

    #[test]
    fn test_ethernet_summary_contains_addresses() {
        let frame = EthernetFrame::new(
            MacAddr::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]),
            MacAddr::new([0x11, 0x12, 0x13, 0x14, 0x15, 0x16]),
            EtherType::Ipv4,
            vec![0; 4],
        );
        let summary = ethernet_summary(&frame);
        assert!(summary.contains("11:12:13:14:15:16"));
        assert!(summary.contains("01:02:03:04:05:06"));
        assert!(summary.contains("IPv4"));
    }

    #[test]
    fn test_udp_summary() {
        let datagram = UdpDatagram {
            source_port: 53,
            destination_port: 5353,
            length: 8,
            checksum: 0,
            payload: vec![],
        };
        assert_eq!(udp_summary(&datagram), "UDP 53 -> 5353 len=8");
    }
}
