#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions)]

mod cli;
mod run;

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use auton_core::MissionOutcome;
use cli::{Cli, Commands, FILE_GUARD, JSON_MODE};

fn init_tracing(args: &Cli, cfg: &auton_config::Config) {
    let level = args
        .log_level
        .clone()
        .or_else(|| cfg.logging.level.clone())
        .unwrap_or_else(|| "info".to_owned());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = cfg.logging.file.as_deref().map(|path| {
        let appender = tracing_appender::rolling::never(".", path);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
    });

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if args.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_ansi(false))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_config(args: &Cli) -> Result<auton_config::Config> {
    let text = fs::read_to_string(&args.config)
        .wrap_err_with(|| format!("failed to read config {}", args.config.display()))?;
    let cfg = auton_config::load_toml(&text)
        .wrap_err_with(|| format!("failed to parse config {}", args.config.display()))?;
    auton_config::validate(&cfg)?;
    Ok(cfg)
}

fn report_outcome(outcome: &MissionOutcome, print_ticks: bool) -> Result<()> {
    let json = JSON_MODE.get().copied().unwrap_or(false);
    match outcome {
        MissionOutcome::Done { ticks } => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "outcome": "done", "ticks": ticks })
                );
            } else {
                println!("Mission complete.");
                if print_ticks {
                    println!("Ticks: {ticks}");
                }
            }
            Ok(())
        }
        MissionOutcome::Interrupted { ticks, stage } => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "outcome": "interrupted",
                        "ticks": ticks,
                        "stage": format!("{stage:?}"),
                    })
                );
            }
            eyre::bail!("mission interrupted at tick {ticks} in stage {stage:?}")
        }
        MissionOutcome::TickBudgetExhausted { ticks, stage } => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "outcome": "tick-budget-exhausted",
                        "ticks": ticks,
                        "stage": format!("{stage:?}"),
                    })
                );
            }
            eyre::bail!("tick budget exhausted after {ticks} ticks in stage {stage:?}")
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    let _ = JSON_MODE.set(args.json);

    let cfg = load_config(&args)?;
    init_tracing(&args, &cfg);

    match args.cmd {
        Commands::CheckConfig => {
            println!("Config OK: {}", args.config.display());
            Ok(())
        }
        Commands::Run {
            max_ticks,
            control_period_ms,
            print_ticks,
        } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&shutdown);
            ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
                .wrap_err("failed to install Ctrl-C handler")?;

            let outcome = run::run(&cfg, max_ticks, control_period_ms, shutdown)?;
            report_outcome(&outcome, print_ticks)
        }
    }
}
