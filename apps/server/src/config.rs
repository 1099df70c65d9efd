//! Server configuration
//!
//! Settings come from the environment (a `.env` file is honored when present)
//! with command-line flags taking precedence.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "dosette-server")]
#[clap(about = "Validation server for FHIR medication records")]
pub struct Config {
    /// Address to bind to
    #[clap(long, env = "DOSETTE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[clap(long, env = "DOSETTE_PORT", default_value = "8080")]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[clap(long, env = "DOSETTE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from the environment and command line.
    pub fn load() -> Self {
        // Make .env variables visible before clap reads them.
        dotenvy::dotenv().ok();
        Config::parse()
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid host {:?}: {e}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
