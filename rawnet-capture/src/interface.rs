//! Network interface enumeration and information

use ipnetwork::IpNetwork;
use pnet_datalink::{self, NetworkInterface};
use rawnet_core::{MacAddr, TransportError};
use std::net::{IpAddr, Ipv4Addr};

/// Information about a network interface
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    /// Interface name (e.g., "eth0", "en0")
    pub name: String,
    /// Interface index
    pub index: u32,
    /// MAC address if available
    pub mac: Option<MacAddr>,
    /// IP addresses assigned to this interface
    pub ips: Vec<IpAddr>,
    /// Whether the interface is up
    pub is_up: bool,
    /// Whether the interface is a loopback
    pub is_loopback: bool,
}

impl From<&NetworkInterface> for InterfaceInfo {
    fn from(iface: &NetworkInterface) -> Self {
        let mac = iface
            .mac
            .map(|mac| MacAddr::new([mac.0, mac.1, mac.2, mac.3, mac.4, mac.5]));
        let ips: Vec<IpAddr> = iface.ips.iter().map(IpNetwork::ip).collect();

        InterfaceInfo {
            name: iface.name.clone(),
            index: iface.index,
            mac,
            ips,
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

impl InterfaceInfo {
    /// Check if the interface is suitable for packet capture
    pub fn is_capture_capable(&self) -> bool {
        self.is_up && !self.is_loopback
    }

    /// First IPv4 address assigned to the interface, if any
    pub fn primary_ipv4(&self) -> Option<Ipv4Addr> {
        self.ips.iter().find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(*v4),
            IpAddr::V6(_) => None,
        })
    }
}

/// List all available network interfaces
pub fn list_interfaces() -> Result<Vec<InterfaceInfo>, TransportError> {
    let interfaces = pnet_datalink::interfaces();

    if interfaces.is_empty() {
        return Err(TransportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no network interfaces found; are you running with sufficient privileges?",
        )));
    }

    Ok(interfaces.iter().map(InterfaceInfo::from).collect())
}

/// Get information about a specific interface by name
pub fn get_interface(name: &str) -> Result<InterfaceInfo, TransportError> {
    pnet_datalink::interfaces()
        .iter()
        .find(|iface| iface.name == name)
        .map(InterfaceInfo::from)
        .ok_or_else(|| TransportError::InterfaceNotFound(name.to_string()))
}

/// Pick the first capture-capable interface
pub fn default_interface() -> Result<InterfaceInfo, TransportError> {
    list_interfaces()?
        .into_iter()
        .find(InterfaceInfo::is_capture_capable)
        .ok_or_else(|| TransportError::InterfaceNotFound("<default>".to_string()))
}
