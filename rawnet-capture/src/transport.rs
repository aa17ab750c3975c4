//! Raw link-layer socket transport
//!
//! [`Transport`] is the seam between the workflows (capture loop, ping
//! session) and the OS socket, so both can run against a simulated transport
//! in tests. [`RawSocket`] is the real implementation: one datalink channel
//! bound to one named interface, filtered to one EtherType.

use pnet_datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender};
use rawnet_core::{MacAddr, Packet, TransportError};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Interval at which a blocked receive re-checks its deadline
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Blocking send/receive over a link-layer socket
///
/// `receive` blocks the calling thread until a frame arrives or the timeout
/// elapses, then fails with [`TransportError::Timeout`] (retryable). Every
/// other failure is [`TransportError::Io`] and fatal to the caller.
pub trait Transport {
    /// Send one raw frame, Ethernet header included
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportError>;

    /// Receive one raw frame, waiting at most `timeout`
    fn receive(&mut self, timeout: Duration) -> Result<Packet, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        (**self).send(frame)
    }

    fn receive(&mut self, timeout: Duration) -> Result<Packet, TransportError> {
        (**self).receive(timeout)
    }
}

/// Configuration for opening a raw socket
#[derive(Debug, Clone)]
pub struct RawSocketConfig {
    /// Interface to bind to
    pub interface: String,
    /// Only frames with this EtherType are delivered (0x0800 for IPv4)
    pub ethertype: u16,
}

impl RawSocketConfig {
    /// Config delivering IPv4 frames from the named interface
    pub fn ipv4(interface: &str) -> Self {
        Self {
            interface: interface.to_string(),
            ethertype: 0x0800,
        }
    }
}

/// Raw socket over a pnet datalink Ethernet channel
///
/// The socket is a scoped resource: it is acquired by [`open`](Self::open),
/// owned exclusively by the workflow that opened it, and released when the
/// value is dropped on any exit path. It is never reopened implicitly.
pub struct RawSocket {
    interface_name: String,
    source_mac: MacAddr,
    ethertype: u16,
    tx: Box<dyn DataLinkSender>,
    rx: Box<dyn DataLinkReceiver>,
}

impl RawSocket {
    /// Open a link-layer socket on the configured interface
    pub fn open(config: &RawSocketConfig) -> Result<Self, TransportError> {
        let interface = pnet_datalink::interfaces()
            .into_iter()
            .find(|iface| iface.name == config.interface)
            .ok_or_else(|| TransportError::InterfaceNotFound(config.interface.clone()))?;

        let source_mac = interface
            .mac
            .map(|mac| MacAddr::new([mac.0, mac.1, mac.2, mac.3, mac.4, mac.5]))
            .unwrap_or_else(MacAddr::zero);

        let channel_config = Config {
            read_timeout: Some(POLL_INTERVAL),
            ..Config::default()
        };

        let (tx, rx) = match pnet_datalink::channel(&interface, channel_config) {
            Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
            Ok(_) => {
                return Err(TransportError::ChannelUnsupported(config.interface.clone()));
            }
            Err(e) => return Err(TransportError::Io(e)),
        };

        debug!(
            interface = %config.interface,
            ethertype = config.ethertype,
            "raw socket opened"
        );

        Ok(Self {
            interface_name: config.interface.clone(),
            source_mac,
            ethertype: config.ethertype,
            tx,
            rx,
        })
    }

    /// Name of the bound interface
    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    /// MAC address of the bound interface
    pub fn source_mac(&self) -> MacAddr {
        self.source_mac
    }
}

/// Whether a frame passes the EtherType filter
fn matches_filter(frame: &[u8], ethertype: u16) -> bool {
    frame.len() >= 14 && u16::from_be_bytes([frame[12], frame[13]]) == ethertype
}

impl Transport for RawSocket {
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        match self.tx.send_to(frame, None) {
            Some(Ok(())) => Ok(()),
            Some(Err(e)) => Err(TransportError::Io(e)),
            None => Err(TransportError::Io(io::Error::new(
                io::ErrorKind::Other,
                "datalink sender rejected the frame",
            ))),
        }
    }

    fn receive(&mut self, timeout: Duration) -> Result<Packet, TransportError> {
        let deadline = Instant::now() + timeout;

        loop {
            match self.rx.next() {
                Ok(frame) => {
                    if matches_filter(frame, self.ethertype) {
                        let data = frame.to_vec();
                        let peer = MacAddr::from_slice(&data[6..12]).unwrap_or_else(MacAddr::zero);
                        return Ok(Packet::new(self.interface_name.clone(), peer, data));
                    }
                    // Frame for another EtherType; keep reading until deadline
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut
                    || e.kind() == io::ErrorKind::WouldBlock => {}
                Err(e) => return Err(TransportError::Io(e)),
            }

            if Instant::now() >= deadline {
                return Err(TransportError::Timeout(timeout));
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_config() {
        let config = RawSocketConfig::ipv4("eth0");
        assert_eq!(config.interface, "eth0");
        assert_eq!(config.ethertype, 0x0800);
    }

    #[test]
    fn test_ethertype_filter() {
        let mut frame = vec![0u8; 14];
        frame[12..14].copy_from_slice(&0x0800u16.to_be_bytes());
        assert!(matches_filter(&frame, 0x0800));
        assert!(!matches_filter(&frame, 0x0806));
        assert!(!matches_filter(&frame[..13], 0x0800));
    }
}
