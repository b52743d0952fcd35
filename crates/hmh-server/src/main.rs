//! Help My Health server CLI
//!
//! Starts the HTTP server for chat answers and emergency-number lookup.

use hmh_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("No config file specified, using defaults");
        eprintln!("Usage: hmh-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await
}

fn print_help() {
    println!("Help My Health - trusted health guidance with ranked evidence");
    println!();
    println!("USAGE:");
    println!("    hmh-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    hmh-server --config crates/hmh-server/config/server.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    bind_address, bind_port, log_filter at the top level;");
    println!("    optional [geocode], [locator], [evidence], [extractor], [trust]");
    println!("    and [pipeline] sections. RUST_LOG overrides log_filter.");
    println!();
}
