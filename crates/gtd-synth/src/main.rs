//! GTD Synth CLI
//!
//! Writes a synthetic dataset archive and optionally checks a running service.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use gtd_dataset::TextEncoding;
use gtd_synth::{check_all, to_csv, verify, write_archive, EventGenerator, SynthConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gtd-synth")]
#[command(about = "Generate a synthetic GTD archive and check the query service")]
struct Args {
    /// Output archive path
    #[arg(short, long, default_value = "globalterrorismdb_0718dist.zip")]
    output: PathBuf,

    /// Number of events
    #[arg(short, long, default_value = "5000")]
    events: usize,

    /// Random seed
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Probability that an optional cell is left empty
    #[arg(long, default_value = "0.05")]
    missing_rate: f64,

    /// Text encoding of the CSV entry
    #[arg(long, default_value = "latin1")]
    encoding: TextEncoding,

    /// Base URL of a running service to check, e.g. http://localhost:8000
    #[arg(long)]
    verify_url: Option<String>,

    /// Only run the endpoint checks
    #[arg(long, requires = "verify_url")]
    skip_generate: bool,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gtd_synth=info".parse()?))
        .init();

    let args = Args::parse();

    if !args.skip_generate {
        generate(&args)?;
    }

    if let Some(url) = &args.verify_url {
        let client = verify::client(Duration::from_millis(args.timeout_ms))?;
        info!(%url, "Checking query service");

        let checks = check_all(&client, url).await;
        let failed = checks.iter().filter(|c| !c.passed).count();
        for check in &checks {
            let status = check.status.map_or_else(|| "---".to_string(), |s| s.to_string());
            if check.passed {
                info!("  PASS {} [{}] {}", check.endpoint, status, check.detail);
            } else {
                warn!("  FAIL {} [{}] {}", check.endpoint, status, check.detail);
            }
        }

        if failed > 0 {
            bail!("{failed} of {} endpoint checks failed", checks.len());
        }
        info!("All {} endpoint checks passed", checks.len());
    }

    Ok(())
}

fn generate(args: &Args) -> Result<()> {
    let config = SynthConfig {
        events: args.events,
        seed: args.seed,
        missing_rate: args.missing_rate,
        ..SynthConfig::default()
    };
    info!(
        "Generating {} events (seed {}, missing rate {})",
        config.events, config.seed, config.missing_rate
    );

    let events = EventGenerator::new(config)?.generate();
    let csv = to_csv(&events)?;
    let size = write_archive(&args.output, &csv, args.encoding)?;

    info!(
        "Wrote {} ({} bytes, {})",
        args.output.display(),
        size,
        args.encoding
    );
    Ok(())
}
