use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use works_portal::portal::{handle_line, PortalConfig, PortalState};
use works_portal::portal::util::init_logging;

/// Works portal server - line-delimited JSON-RPC over stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "portal_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides the config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(long, conflicts_with = "database")]
    in_memory: bool,

    /// Log filter, e.g. "info" or "works_portal=debug"
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_file.as_deref())?;

    let mut config = PortalConfig::load(args.config.as_deref())?;
    if let Some(database) = args.database {
        config.database_path = database;
    }

    let state = if args.in_memory {
        PortalState::in_memory(config)?
    } else {
        PortalState::open(config)?
    };
    info!(database = %state.config.database_path.display(), in_memory = args.in_memory,
        "portal server started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(error = %e, "error reading stdin");
                continue;
            }
        };

        let response = match handle_line(&state, &line) {
            Some(response) => response,
            None => continue,
        };

        let response_json = serde_json::to_string(&response).context("failed to serialize response")?;
        writeln!(stdout, "{}", response_json).context("failed to write response")?;
        stdout.flush().context("failed to flush stdout")?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
