//! Neon Matrix CLI
//!
//! Runs the demonstration sequence once and exits.

use anyhow::Context as _;
use clap::Parser;
use neon_env::{Endpoint, TokioContext};
use neon_sim::{driver, MatrixConfig, RunReport, SimContext, DEFAULT_ENDPOINT};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Neon Cyberpunk Matrix demonstration
#[derive(Parser, Debug)]
#[command(name = "neon-matrix")]
#[command(about = "Run the Neon Cyberpunk Matrix demonstration", long_about = None)]
struct Args {
    /// Mainframe endpoint as `host[:port]` (host must start with "neon." and be longer than 10 chars)
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    endpoint: Endpoint,

    /// Number of neural nodes to add
    #[arg(short, long, default_value = "10")]
    nodes: usize,

    /// Number of synthetic data points to summarize
    #[arg(long, default_value = "50")]
    samples: usize,

    /// Data-flow threshold for the high-flow list
    #[arg(short, long, default_value = "5.0")]
    threshold: f64,

    /// Master seed (0 = pick one at random; the chosen seed is logged and reported)
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Use a virtual clock instead of really waiting
    #[arg(long)]
    simulate: bool,

    /// Print the run report as JSON instead of console lines
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> MatrixConfig {
        MatrixConfig::default()
            .with_seed(self.seed)
            .with_endpoint(self.endpoint.clone())
            .with_nodes(self.nodes)
            .with_samples(self.samples)
            .with_threshold(self.threshold)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("NEON_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

async fn execute<W: Write>(args: &Args, out: &mut W) -> anyhow::Result<RunReport> {
    let config = args.config();
    let config = match config.seed {
        0 => {
            let seed = resolve_random_seed();
            info!(seed, "no seed given, picked one at random");
            config.with_seed(seed)
        }
        _ => config,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let report = if args.simulate {
        let ctx = SimContext::new(config.seed);
        driver::run(&ctx, &mut rng, &config, out).await
    } else {
        let ctx = TokioContext::new();
        driver::run(&ctx, &mut rng, &config, out).await
    };

    report.context("neon matrix run failed")
}

/// Draws a non-zero seed from OS entropy so the run can be replayed.
fn resolve_random_seed() -> u64 {
    rand::random::<u64>().max(1)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    info!("Neon Matrix v{}", env!("CARGO_PKG_VERSION"));

    if args.json {
        let report = execute(&args, &mut io::sink()).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        execute(&args, &mut out).await?;
    }

    Ok(())
}
