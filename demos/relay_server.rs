//! Simple signaling relay server
//!
//! Run with: cargo run --example relay_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example relay_server                    # binds to 0.0.0.0:8080
//!   cargo run --example relay_server localhost          # binds to 127.0.0.1:8080
//!   cargo run --example relay_server 127.0.0.1:9090     # binds to 127.0.0.1:9090
//!
//! ## Trying it out
//!
//! Connect two WebSocket clients (e.g. with `websocat ws://localhost:8080`)
//! and paste messages:
//!
//! Operator side:
//!   {"type":"identify","userId":"op","isOperator":true}
//!   {"type":"call.invite","targetUserId":"user-1","operatorName":"Ana"}
//!
//! User side:
//!   {"type":"identify","userId":"user-1"}
//!   {"type":"call.ready"}
//!
//! The user receives `call.invited` with the operator's connection id; from
//! there the two sides exchange `sdp.offer` / `sdp.answer` / `ice.candidate`
//! addressed by connection id and the relay forwards them verbatim.

use std::net::SocketAddr;
use std::time::Duration;

use signaling_rs::{ServerConfig, SignalingServer};

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:8080
/// - "localhost:9090" -> 127.0.0.1:9090
/// - "127.0.0.1" -> 127.0.0.1:8080
/// - "0.0.0.0:8080" -> 0.0.0.0:8080
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 8080;

    // Replace "localhost" with "127.0.0.1"
    let normalized = arg.replace("localhost", "127.0.0.1");

    // Try parsing as SocketAddr first (includes port)
    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    // Try parsing as IP address without port
    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: relay_server [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 0.0.0.0:8080)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  relay_server                     # binds to 0.0.0.0:8080");
    eprintln!("  relay_server localhost           # binds to 127.0.0.1:8080");
    eprintln!("  relay_server 127.0.0.1:9090      # binds to 127.0.0.1:9090");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:8080".parse().unwrap(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("signaling_rs=debug".parse()?)
                .add_directive("relay_server=debug".parse()?),
        )
        .init();

    let config = ServerConfig {
        bind_addr,
        ..ServerConfig::default()
    };

    println!("Starting signaling relay on {}", config.bind_addr);
    println!();
    println!("Connect with: websocat ws://localhost:{}", config.bind_addr.port());
    println!();

    let server = SignalingServer::new(config);
    let hub = server.hub().clone();

    // Periodic stats report
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(30));
        loop {
            ticker.tick().await;
            let stats = hub.stats().await;
            tracing::info!(
                connections = stats.active_connections,
                identified = stats.identified_users,
                operators = stats.operator_connections,
                broadcast = stats.broadcast_active,
                viewers = stats.viewer_count,
                calls = stats.call_sessions,
                relayed = stats.messages_relayed,
                dropped = stats.messages_dropped,
                "Hub stats"
            );
        }
    });

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                eprintln!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
    }

    Ok(())
}
