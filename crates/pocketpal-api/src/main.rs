//! Pocketpal relay CLI and HTTP entry point.
//!
//! Binary name: `ppal`
//!
//! Parses CLI arguments, initializes tracing, then either starts the relay
//! HTTP server or sends a one-shot question through a running relay.

mod cli;
mod client;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use pocketpal_infra::config::{load_relay_config, resolve_data_dir};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn,pocketpal=info",
        1 => "info,pocketpal=debug",
        _ => "trace",
    };
    pocketpal_observe::tracing_setup::init_tracing(cli.otel, filter)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    match cli.command {
        Commands::Serve { port, host } => {
            let state = AppState::init().await?;

            if !state.provider_ready {
                println!(
                    "  {} No completion credential found (set OPENAI_API_KEY); \
                     chats will return the fallback reply.",
                    console::style("!").yellow().bold()
                );
            }

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Pocketpal relay listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Ask {
            message,
            identity,
            relay_url,
        } => {
            // The ask side only needs the normalizer tables from config.
            let config = load_relay_config(&resolve_data_dir()).await;
            cli::ask::ask(&config, &relay_url, &message, identity.as_deref(), cli.json).await?;
        }
    }

    pocketpal_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
