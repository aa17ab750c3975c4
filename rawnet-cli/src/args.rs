//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::net::Ipv4Addr;

#[derive(Parser, Debug)]
#[command(name = "rawnet")]
#[command(version, about = "Raw Ethernet capture and link-layer ping", long_about = None)]
pub struct Cli {
    /// Verbose output (-v, -vv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture IPv4 frames and print a per-layer summary of each
    #[command(visible_alias = "c")]
    Capture {
        /// Network interface to capture on
        #[arg(short, long)]
        interface: String,

        /// Stop after this many frames (runs until interrupted by default)
        #[arg(long)]
        max_frames: Option<u64>,

        /// Receive deadline per attempt, in milliseconds
        #[arg(long, default_value = "1000")]
        timeout_ms: u64,
    },

    /// Send one ICMP echo request and wait for a reply
    #[command(visible_alias = "p")]
    Ping {
        /// Network interface to send from
        #[arg(short, long)]
        interface: String,

        /// Source IPv4 address placed in the request
        #[arg(short, long)]
        source: Ipv4Addr,

        /// Destination IPv4 address
        #[arg(short, long)]
        destination: Ipv4Addr,

        /// Next-hop MAC address (e.g. the gateway), colon-separated hex
        #[arg(long)]
        dest_mac: String,

        /// Reply deadline, in milliseconds
        #[arg(long, default_value = "5000")]
        timeout_ms: u64,

        /// Echo data to carry
        #[arg(long, default_value = "Hello")]
        payload: String,
    },

    /// List capture-capable network interfaces
    Interfaces,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
