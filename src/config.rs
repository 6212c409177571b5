// ABOUTME: Command-line and environment configuration for the server
// ABOUTME: Every option can be given as a flag or through its environment variable

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "marketplace-accounts", about = "User, profile and listing backend")]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SeaORM connection string; SQLite and PostgreSQL are supported
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:marketplace.db?mode=rwc")]
    pub database_url: String,

    /// Directory uploaded images are written to and served from
    #[arg(long, env = "MEDIA_ROOT", default_value = "media")]
    pub media_root: PathBuf,

    /// Fallback log filter when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
