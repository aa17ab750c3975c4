//! Core types for rawnet
//!
//! This crate provides the shared building blocks used by the packet and
//! capture crates:
//!
//! - [`error`] - Error taxonomy split between parsing ([`DecodeError`]) and
//!   socket-level ([`TransportError`]) failures
//! - [`types`] - Common value types such as [`MacAddr`]
//! - [`packet`] - The captured-frame record handed from the transport to the
//!   decoders

pub mod error;
pub mod packet;
pub mod types;

pub use error::{DecodeError, Error, Layer, Result, TransportError};
pub use packet::Packet;
pub use types::MacAddr;
