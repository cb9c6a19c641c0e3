// crates/fpipe-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::Result;
use clap::Parser;
use fpipe_solvers::{run, SOLVERS};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "fpipe",
    about = "Run the self-checking puzzle solvers",
    long_about = "Run the self-checking puzzle solvers.\n\nWith no arguments every solver runs in order. Otherwise each argument is a 1-based solver index; duplicates run once and unknown indices are ignored.",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// 1-based indices of the solvers to run.
    #[arg(value_name = "INDEX", allow_hyphen_values = true)]
    solvers: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    debug!(requested = cli.solvers.len(), available = SOLVERS.len(), "fpipe");
    run(SOLVERS, &cli.solvers, &mut std::io::stdout()).await
}

/// Initialize tracing once with an env-driven filter (`RUST_LOG`), defaulting to `info`.
///
/// Logs go to stderr so stdout carries only solver ids and timings.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
