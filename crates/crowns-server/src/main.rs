use std::path::PathBuf;

use clap::Parser;

use crowns_server::config::ServerSettings;
use crowns_server::logging::init_logging;
use crowns_server::{AdviceServer, AdviceService};

/// HTTP advisor for Five Crowns bots.
#[derive(Debug, Parser)]
#[command(
    name = "crowns-server",
    author,
    version,
    about = "Five Crowns draw, discard and meld advice over HTTP"
)]
struct Cli {
    /// Path to the YAML configuration file (defaults to config/crowns.yaml when present).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the listen address.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Override the number of worker threads.
    #[arg(long, value_name = "COUNT")]
    workers: Option<usize>,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Exit after validating the configuration (no listener is opened).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = ServerSettings::load(cli.config.as_deref())?;

    if let Some(bind) = cli.bind {
        settings.server.bind = bind;
    }

    if let Some(workers) = cli.workers {
        settings.server.workers = workers;
    }

    if let Some(level) = cli.log_level {
        settings.logging.tracing_level = level;
    }

    settings.validate()?;

    let names: Vec<String> = settings
        .strategies
        .iter()
        .map(|strategy| format!("{} ({})", strategy.name, strategy.kind))
        .collect();
    println!(
        "{} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "Loaded configuration with {} strateg{}: {}",
        names.len(),
        if names.len() == 1 { "y" } else { "ies" },
        names.join(", ")
    );

    if cli.validate_only {
        println!("Validation-only mode: server not started.");
        return Ok(());
    }

    let _logging_guard = init_logging(&settings.logging)?;
    let service = AdviceService::from_settings(&settings);
    let server = AdviceServer::bind(&settings.server.bind, service, settings.server.workers)?;

    tracing::info!(
        target: "crowns_server::http",
        bind = %settings.server.bind,
        local_addr = ?server.local_addr(),
        workers = settings.server.workers,
        strategies = ?names,
        "listening"
    );

    server.run()
}
