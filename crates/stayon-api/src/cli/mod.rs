//! CLI command definitions for the `stayon` binary.

pub mod config;
pub mod transcripts;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Retention-call script assistant for insurance consultants.
#[derive(Parser)]
#[command(name = "stayon", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1", env = "STAYON_HOST")]
        host: String,

        /// Port to listen on.
        #[arg(long, short, default_value_t = 8501, env = "STAYON_PORT")]
        port: u16,
    },

    /// Browse saved transcripts.
    #[command(alias = "t")]
    Transcripts {
        #[command(subcommand)]
        action: TranscriptsCommand,
    },

    /// Print the effective configuration.
    Config {
        /// Also send a tiny completion request to verify the key and endpoint.
        #[arg(long)]
        check: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum TranscriptsCommand {
    /// List an agent's transcripts, newest first.
    #[command(alias = "ls")]
    List {
        /// Agent folder, `{name}_{code}`.
        #[arg(long, short)]
        user: String,

        /// Case-insensitive filename filter.
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Print one transcript.
    Show {
        #[arg(long, short)]
        user: String,

        /// Transcript filename.
        file: String,
    },

    /// Delete one transcript.
    #[command(alias = "rm")]
    Delete {
        #[arg(long, short)]
        user: String,

        file: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
