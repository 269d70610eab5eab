//! Recall Stack CLI and REST API entry point.
//!
//! Binary name: `recall-stack`
//!
//! Parses CLI arguments, resolves configuration, opens the database, then
//! dispatches to a command handler or starts the REST API server.

mod cli;
mod http;
mod state;
mod telemetry;

use clap::Parser;

use cli::{Cli, Commands};
use recall_infra::config::load_server_config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing(cli.verbose, cli.quiet, cli.log_format)?;

    // Defaults < config file < env / CLI flags
    let mut config = load_server_config(cli.config.as_deref()).await?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let state = AppState::init(config).await?;
            let addr = state.config.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(
                %addr,
                database = %state.config.database_path,
                "recall-stack API listening"
            );
            if !cli.quiet {
                println!(
                    "  {} Recall Stack API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("server stopped");
        }

        Commands::Log(args) => {
            let state = AppState::init(config).await?;
            cli::memory::log_memory(&state, args.into(), cli.json).await?;
        }

        Commands::Recall(args) => {
            let state = AppState::init(config).await?;
            cli::memory::recall_memories(&state, args.into(), cli.json).await?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
