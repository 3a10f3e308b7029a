//! Server configuration from command-line flags and environment variables
//!
//! Flags win over environment variables; anything left unset falls back to
//! its default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;
use tesla_fleet::FleetConfig;

pub const DEFAULT_PORT: u16 = 8080;

pub const ENV_PORT: &str = "PORT";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const ENV_API_KEY: &str = "TESLA_API_KEY";
pub const ENV_VIN: &str = "TESLA_VIN";

/// What the process was asked to do
#[derive(Debug)]
pub enum Command {
    Run(ServerConfig),
    Help,
}

/// Everything the daemon needs to start
#[derive(Debug)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    /// Shared secret for the production surface
    pub api_key: Option<String>,
    /// Vehicle to bind the real adapter to; `None` leaves the production surface degraded
    pub vin: Option<String>,
    pub fleet: FleetConfig,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Parse process arguments and environment
pub fn from_env() -> anyhow::Result<Command> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse(&args, |key| std::env::var(key).ok())
}

/// Parse `args` (without the program name) using `lookup` for environment values
pub fn parse<F>(args: &[String], lookup: F) -> anyhow::Result<Command>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let mut port_arg = None;
    let mut bind_arg = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                let value = args
                    .get(i + 1)
                    .context("Missing argument for --port")?;
                port_arg = Some(value.clone());
                i += 2;
            }
            "--bind" | "-b" => {
                let value = args
                    .get(i + 1)
                    .context("Missing argument for --bind")?;
                bind_arg = Some(value.clone());
                i += 2;
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => {
                tracing::warn!("Unknown argument: {}", other);
                i += 1;
            }
        }
    }

    let port = match port_arg.or_else(|| env(ENV_PORT)) {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("Invalid port: {}", raw))?,
        None => DEFAULT_PORT,
    };

    let bind = match bind_arg.or_else(|| env(ENV_BIND_ADDRESS)) {
        Some(raw) => raw
            .trim()
            .parse::<IpAddr>()
            .with_context(|| format!("Invalid bind address: {}", raw))?,
        None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    };

    Ok(Command::Run(ServerConfig {
        bind,
        port,
        api_key: env(ENV_API_KEY),
        vin: env(ENV_VIN).map(|v| v.trim().to_string()),
        fleet: FleetConfig::from_lookup(&lookup),
    }))
}

pub fn print_help() {
    eprintln!(
        r#"teslad - vehicle-control daemon

Usage: teslad [OPTIONS]

Options:
  -p, --port <port>     Listen port (env: PORT, default: 8080)
  -b, --bind <address>  Listen address (env: BIND_ADDRESS, default: 0.0.0.0)
  -h, --help            Print this help message

Environment:
  TESLA_API_KEY         Shared secret required in X-API-KEY on /api/*
  TESLA_VIN             Vehicle to control; unset disables /api/*
  TESLA_COMMAND_URL     Vehicle-command backend (default: https://localhost:4443)
  TESLA_ACCESS_TOKEN    OAuth access token for the backend
  TESLA_TOKEN_FILE      File holding the access token
  RUST_LOG              Log filter

A .env file in the working directory is loaded first if present.

Examples:
  # Development surface only
  teslad

  # Real vehicle on port 3000
  TESLA_VIN=5YJ3E1EA7KF000001 TESLA_API_KEY=secret teslad --port 3000
"#
    );
}
