//! StayOn CLI and REST API entry point.
//!
//! Binary name: `stayon`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! matching command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, TranscriptsCommand};
use state::AppState;
use stayon_infra::config::load_global_config;
use stayon_infra::filesystem::{resolve_data_dir, resolve_history_dir};
use stayon_infra::transcript::FsTranscriptStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "stayon", &mut std::io::stdout());
        return Ok(());
    }

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn,stayon=info",
        1 => "info,stayon=debug",
        _ => "trace",
    };
    stayon_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();
    let config = load_global_config(&data_dir).await;
    let history_dir = resolve_history_dir(&config, &data_dir);

    let result = match cli.command {
        Commands::Serve { host, port } => serve(config, data_dir, &host, port).await,

        Commands::Transcripts { action } => {
            let store = FsTranscriptStore::new(&history_dir);
            match action {
                TranscriptsCommand::List { user, search } => {
                    cli::transcripts::list_transcripts(&store, &user, search.as_deref(), cli.json)
                        .await
                }
                TranscriptsCommand::Show { user, file } => {
                    cli::transcripts::show_transcript(&store, &user, &file, cli.json).await
                }
                TranscriptsCommand::Delete { user, file, force } => {
                    cli::transcripts::delete_transcript(&store, &user, &file, force, cli.json).await
                }
            }
        }

        Commands::Config { check } => {
            cli::config::show_config(&config, &data_dir, &history_dir, check, cli.json).await
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    stayon_observe::tracing_setup::shutdown_tracing();
    result
}

async fn serve(
    config: stayon_types::config::GlobalConfig,
    data_dir: std::path::PathBuf,
    host: &str,
    port: u16,
) -> anyhow::Result<()> {
    let state = AppState::init(config, data_dir).await?;
    let sweeper = state::spawn_idle_sweeper(state.clone());

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    println!(
        "  {} StayOn listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
