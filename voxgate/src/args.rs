use std::path::PathBuf;

use clap::Parser;

/// Voxgate RVC relay
#[derive(Debug, Parser)]
#[command(name = "voxgate", about = "HTTP relay for RVC voice training and conversion")]
pub struct Args {
    /// Path to configuration file; omit to configure from environment variables
    #[arg(short, long, env = "VOXGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "VOXGATE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
