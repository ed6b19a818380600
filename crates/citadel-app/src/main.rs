//! citadel: headless CITADEL runner.
//!
//! Usage:
//!   citadel [config.toml] [--verbose] [--ticks N]

use std::process;

use tracing::{error, info, Level};

use citadel_app::autoplay::run_session;
use citadel_sim::engine::{SimConfig, SimulationEngine};

struct Args {
    config_path: Option<String>,
    verbose: bool,
    max_ticks: Option<u64>,
}

fn main() {
    let args = match parse_args(std::env::args().skip(1).collect()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(2);
        }
    };

    init_tracing(args.verbose);

    let config = match &args.config_path {
        Some(path) => SimConfig::load(path),
        None => Ok(SimConfig::default()),
    };
    let mut engine = match config.and_then(SimulationEngine::new) {
        Ok(engine) => engine,
        Err(err) => {
            error!(error = %err, "startup failed");
            process::exit(1);
        }
    };

    let summary = run_session(&mut engine, args.max_ticks);
    match serde_json::to_string(&summary) {
        Ok(json) => info!(summary = %json, "session finished"),
        Err(err) => error!(error = %err, "failed to encode summary"),
    }
}

fn parse_args(args: Vec<String>) -> Result<Args, String> {
    let mut parsed = Args {
        config_path: None,
        verbose: false,
        max_ticks: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" | "-v" => parsed.verbose = true,
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a value")?;
                let ticks = value
                    .parse()
                    .map_err(|_| format!("invalid tick count: {value}"))?;
                parsed.max_ticks = Some(ticks);
            }
            "help" | "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other if other.starts_with('-') => return Err(format!("Unknown option: {other}")),
            path => {
                if parsed.config_path.is_some() {
                    return Err(format!("Unexpected argument: {path}"));
                }
                parsed.config_path = Some(path.to_string());
            }
        }
    }
    Ok(parsed)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();
}

fn print_usage() {
    eprintln!(
        "citadel: headless CITADEL tower defense runner\n\
         \n\
         Usage: citadel [config.toml] [--verbose] [--ticks N]\n\
         \n\
           config.toml   Engine config (seed, time_scale, initial_money,\n\
                         initial_health, [level]). Built-in defaults if omitted.\n\
           --verbose     Debug-level logging\n\
           --ticks N     Stop after N ticks even if the run is not over\n"
    );
}
