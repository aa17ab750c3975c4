//! rawnet binary entry point
//!
//! Wires the CLI surface to the capture and ping workflows. The library
//! crates return typed errors; exit policy lives here.

mod args;

use args::{Cli, Commands};
use rawnet_capture::{
    list_interfaces, CaptureConfig, CaptureLoop, PingConfig, PingOutcome, PingSession, RawSocket,
    RawSocketConfig,
};
use rawnet_core::{Error, MacAddr};
use rawnet_packet::format;
use std::net::Ipv4Addr;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Error> {
    match cli.command {
        Commands::Capture {
            interface,
            max_frames,
            timeout_ms,
        } => run_capture(&interface, max_frames, timeout_ms),
        Commands::Ping {
            interface,
            source,
            destination,
            dest_mac,
            timeout_ms,
            payload,
        } => run_ping(&interface, source, destination, &dest_mac, timeout_ms, payload),
        Commands::Interfaces => run_interfaces(),
    }
}

fn run_capture(
    interface: &str,
    max_frames: Option<u64>,
    timeout_ms: u64,
) -> Result<ExitCode, Error> {
    let socket = RawSocket::open(&RawSocketConfig::ipv4(interface))?;
    let config = CaptureConfig {
        receive_timeout: Duration::from_millis(timeout_ms),
        max_frames,
    };

    let stats = CaptureLoop::new(socket, config).run(|dissection| {
        println!("{}", format::ethernet_summary(&dissection.ethernet));
        println!("  {}", format::ipv4_summary(&dissection.ip));
        println!("  {}", format::transport_summary(&dissection.transport));
    })?;

    println!("{}", stats.format());
    Ok(ExitCode::SUCCESS)
}

fn run_ping(
    interface: &str,
    source: Ipv4Addr,
    destination: Ipv4Addr,
    dest_mac: &str,
    timeout_ms: u64,
    payload: String,
) -> Result<ExitCode, Error> {
    let destination_mac: MacAddr = dest_mac.parse()?;
    let mut socket = RawSocket::open(&RawSocketConfig::ipv4(interface))?;

    let config = PingConfig::new(source, destination, socket.source_mac(), destination_mac)
        .with_timeout(Duration::from_millis(timeout_ms))
        .with_payload(payload.into_bytes());

    let mut session = PingSession::new(config);
    match session.run(&mut socket)? {
        PingOutcome::Matched {
            reply_from,
            reply,
            elapsed,
        } => {
            println!(
                "reply from {} ({}) in {:.1} ms",
                reply_from,
                format::icmp_summary(&reply),
                elapsed.as_secs_f64() * 1000.0
            );
            Ok(ExitCode::SUCCESS)
        }
        PingOutcome::TimedOut => {
            println!("no reply from {destination} within {timeout_ms} ms");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_interfaces() -> Result<ExitCode, Error> {
    for info in list_interfaces()? {
        let mac = info
            .mac
            .map(|mac| mac.to_string())
            .unwrap_or_else(|| "-".to_string());
        let state = if info.is_capture_capable() {
            "up"
        } else if info.is_loopback {
            "loopback"
        } else {
            "down"
        };
        let ipv4 = info
            .primary_ipv4()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<12} {:<18} {:<10} {}", info.name, mac, state, ipv4);
    }
    Ok(ExitCode::SUCCESS)
}
