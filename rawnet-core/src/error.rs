//! Error types for rawnet

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for rawnet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Protocol layer a decode error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Ethernet,
    Ipv4,
    Icmp,
    Tcp,
    Udp,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Ethernet => write!(f, "Ethernet"),
            Layer::Ipv4 => write!(f, "IPv4"),
            Layer::Icmp => write!(f, "ICMP"),
            Layer::Tcp => write!(f, "TCP"),
            Layer::Udp => write!(f, "UDP"),
        }
    }
}

/// Parsing-level error
///
/// Decode errors are always recovered at the point of occurrence: the
/// offending frame is reported and skipped, never propagated past the
/// workflow that observed it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input shorter than the layer's header requires
    #[error("{layer} input too short: need {required} bytes, got {actual}")]
    TooShort {
        layer: Layer,
        required: usize,
        actual: usize,
    },

    /// IP version field is not 4
    #[error("unsupported IP version {0}")]
    UnsupportedVersion(u8),

    /// IP header length below the 5-word minimum
    #[error("invalid IP header length: {0} words (minimum 5)")]
    InvalidHeaderLength(u8),

    /// IP protocol number with no decoder (not ICMP/TCP/UDP)
    #[error("unsupported IP protocol number {0}")]
    UnsupportedProtocol(u8),
}

impl DecodeError {
    /// Shorthand for [`DecodeError::TooShort`]
    pub fn too_short(layer: Layer, required: usize, actual: usize) -> Self {
        DecodeError::TooShort {
            layer,
            required,
            actual,
        }
    }
}

/// Socket-level error
///
/// `Timeout` is retryable and each caller decides what retrying means;
/// everything else is fatal and surfaces to the top-level entry point.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Underlying socket I/O failure (fatal)
    #[error("socket I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No data arrived before the deadline (retryable)
    #[error("receive timed out after {0:?}")]
    Timeout(Duration),

    /// Named interface does not exist on this host
    #[error("interface '{0}' not found")]
    InterfaceNotFound(String),

    /// The datalink channel is not an Ethernet channel
    #[error("unsupported datalink channel on interface '{0}'")]
    ChannelUnsupported(String),
}

impl TransportError {
    /// Whether the caller may retry the operation
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

/// Top-level error type for the rawnet binary
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Invalid configuration value (bad MAC string, bad address, ...)
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
