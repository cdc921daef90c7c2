//! Ordcache Shell - line-oriented command interface to an LRU cache

mod command;
mod handler;
mod reply;
mod session;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ordcache::{CacheConfig, ConcurrentLruCache};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::handler::CommandHandler;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maximum number of entries (0 = unbounded)
    #[arg(short, long, default_value_t = 0)]
    max_size: usize,

    /// Number of entries to pre-allocate
    #[arg(long, default_value_t = 0)]
    initial_capacity: usize,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Print STATS replies as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so replies on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Starting ordsh v{}", env!("CARGO_PKG_VERSION"));
    if args.max_size == 0 {
        info!("Cache bound: unbounded");
    } else {
        info!("Cache bound: {} entries", args.max_size);
    }

    let config = CacheConfig::new()
        .with_max_size(args.max_size)
        .with_initial_capacity(args.initial_capacity);
    let handler = CommandHandler::new(ConcurrentLruCache::with_config(config), args.json);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let executed = match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            info!("Running script {}", path.display());
            session::run(&handler, BufReader::new(file), &mut out)?
        }
        None => session::run(&handler, io::stdin().lock(), &mut out)?,
    };

    info!("Session finished after {} commands", executed);
    Ok(())
}
