// Festival Crowd Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/festival-crowd-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/festival-crowd-simulator --attendee-count 500 --seed 42 --verbose
// ```

use clap::Parser;
use festival_crowd_simulator::persistence::JsonlStore;
use festival_crowd_simulator::simulation::{FestivalSimulation, LoggingConfig, SimulationReport};
use festival_crowd_simulator::types::config::CliArgs;
use festival_crowd_simulator::types::SimulationConfig;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        let default_config = SimulationConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Festival Crowd Simulator");

    // Load configuration from CLI arguments and optional config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(errors) = config.validate() {
        for validation_error in &errors {
            error!("Configuration validation failed: {}", validation_error);
        }
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    let simulation = match FestivalSimulation::new(config.clone()) {
        Ok(simulation) => simulation,
        Err(e) => {
            error!("Failed to initialize simulation: {}", e);
            process::exit(1);
        }
    };

    let report = match simulation.run() {
        Ok(report) => report,
        Err(e) => {
            error!("Simulation failed: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = persist_report(&config, &report) {
        error!("Failed to persist simulation results: {}", e);
        process::exit(1);
    }

    println!("\n{}", report.statistics.summary());
    info!("Festival Crowd Simulator completed successfully");
}

/// Write the report to JSONL files if the configuration asks for them
fn persist_report(config: &SimulationConfig, report: &SimulationReport) -> Result<(), String> {
    if config.attendees_output.is_none() && config.orders_output.is_none() {
        return Ok(());
    }

    let mut store = JsonlStore::new(
        config.attendees_output.as_ref().map(PathBuf::from),
        config.orders_output.as_ref().map(PathBuf::from),
    );
    report
        .persist(&mut store)
        .and_then(|()| store.flush())
        .map_err(|e| e.to_string())?;

    if let Some(path) = &config.attendees_output {
        eprintln!("Attendee records written to: {}", path);
    }
    if let Some(path) = &config.orders_output {
        eprintln!("Order records written to: {}", path);
    }
    Ok(())
}

/// Print the startup banner
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Festival Crowd Simulator");
    eprintln!("========================");
    print_configuration_summary(config);
    eprintln!();
}

/// Print a configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Attendees:        {}", config.attendee_count);
    eprintln!("  Security staff:   {}", config.security_count);
    eprintln!(
        "  Bars:             {} ({} baristas each)",
        config.bar_count, config.baristas_per_bar
    );
    eprintln!(
        "  Food trucks:      {} ({} cooks each)",
        config.food_truck_count, config.cooks_per_truck
    );
    eprintln!("  Stalls per zone:  {}", config.stalls_per_zone);
    eprintln!("  Doctors:          {}", config.doctor_count);
    eprintln!("  Roster:           {} performers", config.roster.len());
    match config.seed {
        Some(seed) => eprintln!("  Seed:             {}", seed),
        None => eprintln!("  Seed:             (entropy)"),
    }
}
