use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use hiergraph_cli::{HiergraphOptions, run_main};
use hiergraph_render::Format;

#[derive(Parser, Debug)]
#[command(
    name = "hiergraph",
    about = "hiergraph: draw a simulation hierarchy one level at a time",
    version
)]
pub struct Cli {
    /// Structure snapshot to render (JSON)
    #[arg(short = 's', long = "snapshot", value_name = "FILE")]
    snapshot: PathBuf,

    /// Output format: 'dbgjson', 'json', 'd3json' or 'elkt' (default: from the output extension)
    #[arg(long, value_name = "FORMAT")]
    format: Option<Format>,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// TOML file extending the kind tables
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Document title (default: snapshot file stem)
    #[arg(long)]
    title: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let total_start = Instant::now();

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let opts = HiergraphOptions {
        snapshot: args.snapshot,
        output: args.output,
        format: args.format,
        config: args.config,
        title: args.title,
    };

    let report = run_main(&opts, &mut io::stdout().lock())
        .with_context(|| format!("failed to dump {}", opts.snapshot.display()))?;

    if report.scan.unknown > 0 || report.scan.malformed > 0 {
        eprintln!(
            "skipped {} unknown and {} malformed objects",
            report.scan.unknown, report.scan.malformed
        );
    }
    if let Some(path) = &opts.output {
        tracing::info!(path = %path.display(), "output written");
    }
    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(
        total_secs,
        components = report.components,
        edges = report.edges,
        "complete"
    );
    Ok(())
}
