use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use bracket_core::{simulate, SimOptions, SimulationRequest};

#[derive(Parser, Debug)]
#[command(name = "bracket-sim")]
#[command(version)]
#[command(about = "Estimates tournament advancement odds from seeds and team ratings")]
struct Args {
    /// JSON request file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the JSON result (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the request's trial count
    #[arg(long)]
    sims: Option<u64>,

    /// Override the request's rng_seed
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Run trials across threads, one seeded stream per trial
    #[arg(long, env = "BRACKET_SIM_PARALLEL")]
    parallel: bool,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

fn read_payload(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read request from {}", path.display())),
        None => {
            let mut payload = String::new();
            io::stdin()
                .read_to_string(&mut payload)
                .context("Failed to read request from stdin")?;
            Ok(payload)
        }
    }
}

fn write_result(output: Option<&PathBuf>, json: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write result to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let payload = read_payload(args.input.as_ref())?;
    let mut request = SimulationRequest::from_json(&payload).context("Invalid simulation request")?;

    if let Some(sims) = args.sims {
        request.sims = sims;
    }
    if let Some(seed) = args.seed {
        request.rng_seed = Some(seed);
    }

    let options = SimOptions {
        parallel: args.parallel,
    };
    let result = simulate(&request, &options).context("Simulation failed")?;

    tracing::info!(
        teams = result.advancement.len(),
        champions = result.champion_probs.len(),
        "simulation complete"
    );

    let json = result.to_json(args.pretty)?;
    write_result(args.output.as_ref(), &json)
}
