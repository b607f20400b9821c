//! CLI argument definitions for the `ppal` binary.

pub mod ask;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ppal", about = "Pocketpal safety-gated chat relay", version)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Export spans via OpenTelemetry (stdout exporter)
    #[arg(long, global = true)]
    pub otel: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the relay HTTP server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 8787)]
        port: u16,

        /// Host interface to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Send one question through a running relay and print the normalized reply
    Ask {
        /// The question to relay
        message: String,

        /// Identity key for quota tracking (omit to stay unthrottled)
        #[arg(long)]
        identity: Option<String>,

        /// Base URL of the relay
        #[arg(long, default_value = "http://127.0.0.1:8787", env = "POCKETPAL_RELAY_URL")]
        relay_url: String,
    },
}
