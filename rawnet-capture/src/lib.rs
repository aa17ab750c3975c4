//! Raw-socket workflows for rawnet
//!
//! This crate hosts everything that touches a link-layer socket:
//!
//! - [`interface`] - Network interface enumeration and lookup
//! - [`transport`] - The [`Transport`] seam and its [`RawSocket`]
//!   implementation over a datalink channel
//! - [`capture`] - The capture loop, decoding each received frame layer by
//!   layer
//! - [`ping`] - The single-shot ICMP echo session state machine
//! - [`stats`] - Capture statistics
//!
//! Both workflows own their socket exclusively for their whole run and
//! execute single-threaded and blocking; the bounded receive is the only
//! suspension point.

pub mod capture;
pub mod interface;
pub mod ping;
pub mod stats;
pub mod transport;

pub use capture::{CaptureConfig, CaptureLoop, Dissection};
pub use interface::{default_interface, get_interface, list_interfaces, InterfaceInfo};
pub use ping::{PingConfig, PingOutcome, PingSession, PingState};
pub use stats::CaptureStats;
pub use transport::{RawSocket, RawSocketConfig, Transport};
