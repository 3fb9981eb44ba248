//! resmond - host resource watchdog daemon
//!
//! Samples the selected host resources at a fixed cadence and notifies the
//! user when one stays over its threshold for a sustained period.

use clap::Parser;
use resmond::alerts::{DesktopNotifier, NotificationManager, TerminalNotifier, ThresholdMonitor};
use resmond::cli::args::{generate_completions, parse_selection, Cli};
use resmond::cli::output::{print_output, ReadingReport};
use resmond::config::ConfigBuilder;
use resmond::error::AppError;
use resmond::metrics::host_source;
use resmond::services::Scheduler;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return;
    }

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose)
        .with_interval(cli.interval)
        .build()?;

    // Verbose may also come from the config file
    if config.general.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let selection = parse_selection(&cli.resources);
    if selection.is_empty() {
        return Err(AppError::EmptySelection);
    }

    let mut notifications = NotificationManager::new();
    if config.notify.desktop {
        notifications.add_notifier(Box::new(DesktopNotifier::new()));
    }
    if config.notify.terminal {
        notifications.add_notifier(Box::new(TerminalNotifier::new()));
    }

    // Cooperative shutdown: the signal handler only flips the flag, the loop
    // exits at the next tick boundary.
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::Relaxed);
    })
    .map_err(|e| AppError::SignalHandler(e.to_string()))?;

    let mut scheduler = Scheduler::new(
        Duration::from_secs(config.general.interval_seconds),
        notifications,
        shutdown,
    );
    for &resource in &selection {
        scheduler.track(
            host_source(resource),
            ThresholdMonitor::with_policy(resource, config.policy_for(resource)),
        );
    }

    if cli.once {
        let readings = scheduler.tick();
        let report = ReadingReport::new(&readings);
        print_output(&report, cli.format)?;
        return Ok(());
    }

    scheduler.run();
    println!("Shutting down correctly...");
    Ok(())
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    if matches!(err, AppError::EmptySelection) {
        eprintln!();
        eprintln!("Usage: resmond <RESOURCE>...");
        eprintln!("       e.g. resmond cpu ram disc");
    }
}
