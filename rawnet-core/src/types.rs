//! Common types used throughout rawnet

use std::fmt;
use std::str::FromStr;

/// MAC Address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Create a new MAC address
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const fn broadcast() -> Self {
        Self([0xff, 0xff, 0xff, 0xff, 0xff, 0xff])
    }

    /// Zero MAC address (00:00:00:00:00:00)
    pub const fn zero() -> Self {
        Self([0x00, 0x00, 0x00, 0x00, 0x00, 0x00])
    }

    /// Get bytes as slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to array
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Create a MAC address from a slice, if it is exactly 6 bytes
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 6 {
            let mut bytes = [0u8; 6];
            bytes.copy_from_slice(slice);
            Some(MacAddr(bytes))
        } else {
            None
        }
    }

    /// Check if this is a broadcast address
    pub fn is_broadcast(&self) -> bool {
        self.0 == [0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    }

    /// Check if this is a multicast address (bit 0 of first octet is 1)
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 == 0x01
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(crate::Error::invalid_parameter(
                "mac",
                "expected six colon-separated octets",
            ));
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            bytes[i] = u8::from_str_radix(part, 16)
                .map_err(|_| crate::Error::invalid_parameter("mac", "invalid hex octet"))?;
        }

        Ok(MacAddr(bytes))
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lowercase_colon_separated() {
        let mac = MacAddr::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(mac.to_string(), "01:02:03:04:05:06");
    }

    #[test]
    fn test_from_str_roundtrip() {
        let mac: MacAddr = "6c:7e:67:cb:97:aa".parse().unwrap();
        assert_eq!(mac.octets(), [0x6c, 0x7e, 0x67, 0xcb, 0x97, 0xaa]);
        assert_eq!(mac.to_string(), "6c:7e:67:cb:97:aa");
    }

    #[test]
    fn test_from_str_rejects_malformed() {
        assert!("01:02:03".parse::<MacAddr>().is_err());
        assert!("01:02:03:04:05:zz".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_from_slice_length_check() {
        assert!(MacAddr::from_slice(&[1, 2, 3]).is_none());
        assert!(MacAddr::from_slice(&[1, 2, 3, 4, 5, 6]).is_some());
    }

    #[test]
    fn test_broadcast_and_multicast() {
        assert!(MacAddr::broadcast().is_broadcast());
        assert!(MacAddr::broadcast().is_multicast());
        assert!(!MacAddr::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]).is_multicast());
    }
}
