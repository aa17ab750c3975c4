//! Single-shot ICMP echo session
//!
//! Builds an echo request, encapsulates it in IPv4 and Ethernet, sends it,
//! and waits for any ICMP frame back within one overall deadline. The state
//! machine is `Init -> RequestSent -> AwaitingReply -> {Matched, TimedOut}`;
//! correlation stops at the protocol-number match, which is sufficient for
//! one session at a time.

use crate::transport::Transport;
use rawnet_core::{MacAddr, TransportError};
use rawnet_packet::ethernet::{EtherType, EthernetFrame};
use rawnet_packet::icmp::IcmpPacket;
use rawnet_packet::ip::{IpProtocol, Ipv4Packet};
use std::net::Ipv4Addr;
use std::process;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// States of a ping session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingState {
    /// Nothing sent yet
    Init,
    /// Echo request handed to the transport
    RequestSent,
    /// Waiting for an ICMP frame within the deadline
    AwaitingReply,
    /// An ICMP reply arrived (terminal)
    Matched,
    /// The deadline expired with no reply (terminal)
    TimedOut,
}

/// Configuration for one ping session
#[derive(Debug, Clone)]
pub struct PingConfig {
    /// Source IPv4 address placed in the request
    pub source_ip: Ipv4Addr,
    /// Destination IPv4 address
    pub destination_ip: Ipv4Addr,
    /// MAC address of the interface the request leaves through
    pub source_mac: MacAddr,
    /// Next-hop MAC address the frame is addressed to
    pub destination_mac: MacAddr,
    /// Echo identifier (process-scoped by default)
    pub identifier: u16,
    /// Echo sequence number
    pub sequence: u16,
    /// Echo data
    pub payload: Vec<u8>,
    /// Overall reply deadline
    pub timeout: Duration,
}

impl PingConfig {
    /// Config with defaults: process-derived identifier, sequence 1,
    /// "Hello" payload, 5 second deadline
    pub fn new(
        source_ip: Ipv4Addr,
        destination_ip: Ipv4Addr,
        source_mac: MacAddr,
        destination_mac: MacAddr,
    ) -> Self {
        Self {
            source_ip,
            destination_ip,
            source_mac,
            destination_mac,
            identifier: (process::id() & 0xFFFF) as u16,
            sequence: 1,
            payload: b"Hello".to_vec(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set the reply deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the echo data
    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }
}

/// Terminal result of a ping session
#[derive(Debug, Clone)]
pub enum PingOutcome {
    /// An ICMP reply arrived before the deadline
    Matched {
        /// IP source of the reply
        reply_from: Ipv4Addr,
        /// The decoded ICMP message
        reply: IcmpPacket,
        /// Time between send and reply
        elapsed: Duration,
    },
    /// No reply before the deadline
    TimedOut,
}

/// One-shot ping state machine
pub struct PingSession {
    config: PingConfig,
    state: PingState,
    trace: Vec<PingState>,
}

impl PingSession {
    /// Create a session in the `Init` state
    pub fn new(config: PingConfig) -> Self {
        Self {
            config,
            state: PingState::Init,
            trace: vec![PingState::Init],
        }
    }

    /// Current state
    pub fn state(&self) -> PingState {
        self.state
    }

    /// All states visited so far, `Init` first
    pub fn trace(&self) -> &[PingState] {
        &self.trace
    }

    fn transition(&mut self, next: PingState) {
        debug!(from = ?self.state, to = ?next, "ping state transition");
        self.state = next;
        self.trace.push(next);
    }

    /// Build the echo request frame: ICMP in IPv4 in Ethernet
    fn build_request(&self) -> Vec<u8> {
        let icmp = IcmpPacket::echo_request(
            self.config.identifier,
            self.config.sequence,
            self.config.payload.clone(),
        );
        let ip = Ipv4Packet::new(
            self.config.source_ip,
            self.config.destination_ip,
            IpProtocol::Icmp,
            icmp.to_bytes(),
        );
        EthernetFrame::new(
            self.config.destination_mac,
            self.config.source_mac,
            EtherType::Ipv4,
            ip.to_bytes(),
        )
        .to_bytes()
    }

    /// Decode a received frame and extract the ICMP layer if it is one
    ///
    /// Decode failures and non-ICMP traffic leave the session waiting.
    fn examine(&self, data: &[u8]) -> Option<(Ipv4Addr, IcmpPacket)> {
        let ethernet = match EthernetFrame::from_bytes(data) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "ignoring undecodable frame while awaiting reply");
                return None;
            }
        };

        let ip = match Ipv4Packet::from_bytes(&ethernet.payload) {
            Ok(packet) => packet,
            Err(e) => {
                warn!(error = %e, "ignoring undecodable frame while awaiting reply");
                return None;
            }
        };

        if ip.protocol != IpProtocol::Icmp {
            debug!(protocol = %ip.protocol, "ignoring non-ICMP frame while awaiting reply");
            return None;
        }

        match IcmpPacket::from_bytes(&ip.payload) {
            Ok(icmp) => Some((ip.source, icmp)),
            Err(e) => {
                warn!(error = %e, "ignoring truncated ICMP frame while awaiting reply");
                None
            }
        }
    }

    /// Send the request and wait for a reply or the deadline
    ///
    /// `TimedOut` is a terminal outcome, not an error; only fatal transport
    /// failures surface as `Err`.
    pub fn run<T: Transport>(&mut self, transport: &mut T) -> Result<PingOutcome, TransportError> {
        let request = self.build_request();

        transport.send(&request)?;
        self.transition(PingState::RequestSent);
        info!(
            destination = %self.config.destination_ip,
            identifier = self.config.identifier,
            sequence = self.config.sequence,
            "echo request sent"
        );

        let sent_at = Instant::now();
        let deadline = sent_at + self.config.timeout;
        self.transition(PingState::AwaitingReply);

        loop {
            let now = Instant::now();
            if now >= deadline {
                self.transition(PingState::TimedOut);
                return Ok(PingOutcome::TimedOut);
            }

            match transport.receive(deadline - now) {
                Ok(packet) => {
                    if let Some((reply_from, reply)) = self.examine(packet.data()) {
                        let elapsed = sent_at.elapsed();
                        self.transition(PingState::Matched);
                        info!(from = %reply_from, ?elapsed, "echo reply matched");
                        return Ok(PingOutcome::Matched {
                            reply_from,
                            reply,
                            elapsed,
                        });
                    }
                }
                Err(TransportError::Timeout(_)) => {
                    self.transition(PingState::TimedOut);
                    return Ok(PingOutcome::TimedOut);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::ScriptedTransport;
    use rawnet_packet::icmp::IcmpType;
    use std::io;

    fn config() -> PingConfig {
        PingConfig::new(
            Ipv4Addr::new(192, 168, 3, 4),
            Ipv4Addr::new(192, 168, 3, 1),
            MacAddr::new([0x11, 0x12, 0x13, 0x14, 0x15, 0x16]),
            MacAddr::new([0x6c, 0x7e, 0x67, 0xcb, 0x97, 0xaa]),
        )
        .with_timeout(Duration::from_millis(200))
    }

    /// Echo reply frame from 192.168.3.1, as the remote host would send it
    fn reply_frame() -> Vec<u8> {
        let mut icmp = IcmpPacket::echo_request(1, 1, b"Hello".to_vec());
        icmp.icmp_type = IcmpType::EchoReply;
        let ip = Ipv4Packet::new(
            Ipv4Addr::new(192, 168, 3, 1),
            Ipv4Addr::new(192, 168, 3, 4),
            IpProtocol::Icmp,
            icmp.to_bytes(),
        );
        EthernetFrame::new(
            MacAddr::new([0x11, 0x12, 0x13, 0x14, 0x15, 0x16]),
            MacAddr::new([0x6c, 0x7e, 0x67, 0xcb, 0x97, 0xaa]),
            EtherType::Ipv4,
            ip.to_bytes(),
        )
        .to_bytes()
    }

    #[test]
    fn test_immediate_reply_matches() {
        let mut transport = ScriptedTransport::new(vec![Ok(reply_frame())]);
        let mut session = PingSession::new(config());

        let outcome = session.run(&mut transport).unwrap();
        assert!(matches!(outcome, PingOutcome::Matched { .. }));
        assert_eq!(
            session.trace(),
            &[
                PingState::Init,
                PingState::RequestSent,
                PingState::AwaitingReply,
                PingState::Matched,
            ]
        );
    }

    #[test]
    fn test_request_frame_layout() {
        let mut transport = ScriptedTransport::new(vec![Ok(reply_frame())]);
        let mut session = PingSession::new(config());
        session.run(&mut transport).unwrap();

        assert_eq!(transport.send_calls, 1);
        let eth = EthernetFrame::from_bytes(&transport.sent[0]).unwrap();
        assert_eq!(eth.destination.octets(), [0x6c, 0x7e, 0x67, 0xcb, 0x97, 0xaa]);
        assert_eq!(eth.source.octets(), [0x11, 0x12, 0x13, 0x14, 0x15, 0x16]);
        assert_eq!(eth.ethertype, EtherType::Ipv4);

        let ip = Ipv4Packet::from_bytes(&eth.payload).unwrap();
        assert_eq!(ip.version, 4);
        assert_eq!(ip.protocol, IpProtocol::Icmp);
        assert_eq!(ip.source, Ipv4Addr::new(192, 168, 3, 4));
        assert_eq!(ip.destination, Ipv4Addr::new(192, 168, 3, 1));

        let icmp = IcmpPacket::from_bytes(&ip.payload).unwrap();
        assert_eq!(icmp.icmp_type, IcmpType::EchoRequest);
        assert_eq!(icmp.code, 0);
        assert_eq!(icmp.sequence(), Some(1));
    }

    #[test]
    fn test_timeout_is_terminal_without_retry() {
        let mut transport = ScriptedTransport::new(vec![Err(TransportError::Timeout(
            Duration::from_millis(200),
        ))]);
        let mut session = PingSession::new(config());

        let outcome = session.run(&mut transport).unwrap();
        assert!(matches!(outcome, PingOutcome::TimedOut));
        assert_eq!(session.state(), PingState::TimedOut);
        // Exactly one receive attempt: the deadline expiry is not retried.
        assert_eq!(transport.receive_calls, 1);
    }

    #[test]
    fn test_garbage_does_not_change_state() {
        let mut transport = ScriptedTransport::new(vec![
            Ok(vec![0xFF; 6]), // too short for Ethernet
            Ok(reply_frame()),
        ]);
        let mut session = PingSession::new(config());

        let outcome = session.run(&mut transport).unwrap();
        assert!(matches!(outcome, PingOutcome::Matched { .. }));
        assert_eq!(transport.receive_calls, 2);
        // The undecodable frame produced no extra transition.
        assert_eq!(
            session.trace(),
            &[
                PingState::Init,
                PingState::RequestSent,
                PingState::AwaitingReply,
                PingState::Matched,
            ]
        );
    }

    #[test]
    fn test_non_icmp_traffic_keeps_waiting() {
        // A UDP frame arrives first; protocol number 17 must not match.
        let udp_ip = Ipv4Packet::new(
            Ipv4Addr::new(192, 168, 3, 1),
            Ipv4Addr::new(192, 168, 3, 4),
            IpProtocol::Udp,
            vec![0u8; 8],
        );
        let udp_frame = EthernetFrame::new(
            MacAddr::broadcast(),
            MacAddr::zero(),
            EtherType::Ipv4,
            udp_ip.to_bytes(),
        )
        .to_bytes();

        let mut transport = ScriptedTransport::new(vec![Ok(udp_frame), Ok(reply_frame())]);
        let mut session = PingSession::new(config());

        let outcome = session.run(&mut transport).unwrap();
        assert!(matches!(outcome, PingOutcome::Matched { .. }));
        assert_eq!(transport.receive_calls, 2);
    }

    #[test]
    fn test_io_error_propagates() {
        let mut transport = ScriptedTransport::new(vec![Err(TransportError::Io(
            io::Error::new(io::ErrorKind::BrokenPipe, "socket closed"),
        ))]);
        let mut session = PingSession::new(config());

        let err = session.run(&mut transport).unwrap_err();
        assert!(matches!(err, TransportError::Io(_)));
        assert_eq!(session.state(), PingState::AwaitingReply);
    }

    #[test]
    fn test_reply_carries_source_address() {
        let mut transport = ScriptedTransport::new(vec![Ok(reply_frame())]);
        let mut session = PingSession::new(config());

        match session.run(&mut transport).unwrap() {
            PingOutcome::Matched { reply_from, reply, .. } => {
                assert_eq!(reply_from, Ipv4Addr::new(192, 168, 3, 1));
                assert_eq!(reply.icmp_type, IcmpType::EchoReply);
            }
            PingOutcome::TimedOut => panic!("expected a match"),
        }
    }
}
