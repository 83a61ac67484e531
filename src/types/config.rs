//! Configuration structures for the festival simulator
//!
//! This module contains the simulation configuration, the clap-based CLI
//! argument structure, and the validation logic that guards a run before
//! any thread is spawned.

use crate::types::Genre;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A millisecond range `(min, max)` sampled uniformly for simulated holds
pub type MsRange = (u64, u64);

/// One entry of the performer roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformerSpec {
    /// Stage name of the performer
    pub name: String,
    /// Genre slot the performer plays on
    pub genre: Genre,
    /// Set duration in milliseconds
    pub set_ms: u64,
}

impl PerformerSpec {
    /// Create a roster entry
    pub fn new(name: impl Into<String>, genre: Genre, set_ms: u64) -> Self {
        Self { name: name.into(), genre, set_ms }
    }
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// The offending field
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Command line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "festival-crowd-simulator",
    version,
    about = "Festival Crowd Simulator - concurrent attendees competing for staffed services",
    long_about = "Simulates a large crowd event: hundreds of attendee threads place \
probabilistic demand into shared FIFO queues that fixed-size worker pools \
(entrance gate, bars, food trucks, restrooms, first aid) drain concurrently, \
while genre stages run exclusive performance slots.

EXAMPLES:
    # Run with default settings
    festival-crowd-simulator

    # Use a configuration file
    festival-crowd-simulator --config festival.json

    # Override specific settings
    festival-crowd-simulator --attendee-count 500 --seed 7

    # Generate a configuration template
    festival-crowd-simulator --print-config > festival.json

    # Validate configuration without running
    festival-crowd-simulator --config festival.json --dry-run

CONFIGURATION:
    Settings are resolved in order of priority:
    1. Command line arguments (highest)
    2. Configuration file (--config flag, JSON)
    3. Default values (lowest)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(short, long, help = "Configuration file path (JSON format)")]
    pub config: Option<String>,

    /// Number of attendees in the population
    #[arg(long, help = "Number of attendees to simulate")]
    pub attendee_count: Option<usize>,

    /// Number of security workers at the entrance gate
    #[arg(long, help = "Security workers at the entrance")]
    pub security_count: Option<usize>,

    /// Number of bars
    #[arg(long, help = "Number of bars")]
    pub bar_count: Option<usize>,

    /// Number of food trucks
    #[arg(long, help = "Number of food trucks")]
    pub food_truck_count: Option<usize>,

    /// Baristas per bar
    #[arg(long, help = "Workers per bar")]
    pub baristas_per_bar: Option<usize>,

    /// Cooks per food truck
    #[arg(long, help = "Workers per food truck")]
    pub cooks_per_truck: Option<usize>,

    /// Stalls per restroom zone
    #[arg(long, help = "Stalls per restroom zone")]
    pub stalls_per_zone: Option<usize>,

    /// Doctors at the first-aid unit
    #[arg(long, help = "Doctors at the first-aid unit")]
    pub doctor_count: Option<usize>,

    /// Random seed for reproducible runs
    #[arg(long, help = "Random seed for reproducible runs")]
    pub seed: Option<u64>,

    /// Output path for attendee records (JSONL)
    #[arg(long, help = "Output path for attendee records JSONL file")]
    pub attendees_output: Option<String>,

    /// Output path for order records (JSONL)
    #[arg(long, help = "Output path for order records JSONL file")]
    pub orders_output: Option<String>,

    /// Print a default configuration template and exit
    #[arg(long, help = "Print default configuration as JSON and exit")]
    pub print_config: bool,

    /// Validate configuration without running the simulation
    #[arg(long, help = "Validate configuration and exit")]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of attendees in the population
    pub attendee_count: usize,
    /// Security workers at the entrance gate
    pub security_count: usize,
    /// Number of bars (an attendee is assigned one at spawn)
    pub bar_count: usize,
    /// Workers per bar
    pub baristas_per_bar: usize,
    /// Number of food trucks
    pub food_truck_count: usize,
    /// Workers per food truck
    pub cooks_per_truck: usize,
    /// Stalls per restroom zone
    pub stalls_per_zone: usize,
    /// Doctors at the first-aid unit
    pub doctor_count: usize,
    /// Fraction of attendees holding a free-of-charge benefit pass (0.0-1.0)
    pub free_pass_ratio: f64,
    /// Entrance credential check hold, milliseconds
    pub entry_check_ms: MsRange,
    /// Attendee think-time before an activity, milliseconds
    pub think_time_ms: MsRange,
    /// Attendee cooldown after an activity, milliseconds
    pub activity_cooldown_ms: MsRange,
    /// Restroom occupancy hold, milliseconds
    pub bathroom_ms: MsRange,
    /// First-aid treatment hold, milliseconds
    pub treatment_ms: MsRange,
    /// Time an attendee spends watching a set, milliseconds
    pub stage_watch_ms: MsRange,
    /// Idle worker wait on an empty queue before re-checking shutdown
    pub worker_poll_ms: u64,
    /// Random seed; entropy-based when absent
    pub seed: Option<u64>,
    /// Output path for attendee records (JSONL)
    pub attendees_output: Option<String>,
    /// Output path for order records (JSONL)
    pub orders_output: Option<String>,
    /// Performer roster, statically partitioned by genre into stage slots
    pub roster: Vec<PerformerSpec>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            attendee_count: 200,
            security_count: 4,
            bar_count: 2,
            baristas_per_bar: 2,
            food_truck_count: 2,
            cooks_per_truck: 2,
            stalls_per_zone: 3,
            doctor_count: 2,
            free_pass_ratio: 0.5,
            entry_check_ms: (20, 80),
            think_time_ms: (30, 100),
            activity_cooldown_ms: (100, 300),
            bathroom_ms: (100, 300),
            treatment_ms: (30, 100),
            stage_watch_ms: (250, 500),
            worker_poll_ms: 10,
            seed: None,
            attendees_output: None,
            orders_output: None,
            roster: default_roster(),
        }
    }
}

/// The default sixteen-artist roster across the three genre stages
pub fn default_roster() -> Vec<PerformerSpec> {
    vec![
        PerformerSpec::new("Bad Bunny", Genre::Reggaeton, 600),
        PerformerSpec::new("Tyler the Creator", Genre::Rap, 600),
        PerformerSpec::new("Doja Cat", Genre::Rap, 600),
        PerformerSpec::new("Kendrick Lamar", Genre::Rap, 300),
        PerformerSpec::new("Bad Gyal", Genre::Reggaeton, 600),
        PerformerSpec::new("Daddy Yankee", Genre::Reggaeton, 400),
        PerformerSpec::new("Karol G", Genre::Reggaeton, 250),
        PerformerSpec::new("Saiko", Genre::Reggaeton, 400),
        PerformerSpec::new("Ariana Grande", Genre::Pop, 350),
        PerformerSpec::new("The Weeknd", Genre::Rap, 200),
        PerformerSpec::new("Billie Eilish", Genre::Pop, 600),
        PerformerSpec::new("Post Malone", Genre::Rap, 300),
        PerformerSpec::new("Lil Nas X", Genre::Rap, 300),
        PerformerSpec::new("Dua Lipa", Genre::Pop, 600),
        PerformerSpec::new("Ed Sheeran", Genre::Pop, 350),
        PerformerSpec::new("Lizzo", Genre::Pop, 600),
    ]
}

impl SimulationConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))
    }

    /// Build configuration from CLI arguments, layering them over an
    /// optional config file and the defaults
    pub fn from_cli_args(args: CliArgs) -> Result<Self, String> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(v) = args.attendee_count {
            config.attendee_count = v;
        }
        if let Some(v) = args.security_count {
            config.security_count = v;
        }
        if let Some(v) = args.bar_count {
            config.bar_count = v;
        }
        if let Some(v) = args.food_truck_count {
            config.food_truck_count = v;
        }
        if let Some(v) = args.baristas_per_bar {
            config.baristas_per_bar = v;
        }
        if let Some(v) = args.cooks_per_truck {
            config.cooks_per_truck = v;
        }
        if let Some(v) = args.stalls_per_zone {
            config.stalls_per_zone = v;
        }
        if let Some(v) = args.doctor_count {
            config.doctor_count = v;
        }
        if let Some(v) = args.seed {
            config.seed = Some(v);
        }
        if let Some(v) = args.attendees_output {
            config.attendees_output = Some(v);
        }
        if let Some(v) = args.orders_output {
            config.orders_output = Some(v);
        }

        Ok(config)
    }

    /// Validate the configuration, collecting every problem found
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let positive_counts = [
            ("attendee_count", self.attendee_count),
            ("security_count", self.security_count),
            ("bar_count", self.bar_count),
            ("baristas_per_bar", self.baristas_per_bar),
            ("food_truck_count", self.food_truck_count),
            ("cooks_per_truck", self.cooks_per_truck),
            ("stalls_per_zone", self.stalls_per_zone),
            ("doctor_count", self.doctor_count),
        ];
        for (field, value) in positive_counts {
            if value == 0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.free_pass_ratio) {
            errors.push(ConfigValidationError {
                field: "free_pass_ratio".to_string(),
                message: "must be within 0.0 and 1.0".to_string(),
            });
        }

        let ranges = [
            ("entry_check_ms", self.entry_check_ms),
            ("think_time_ms", self.think_time_ms),
            ("activity_cooldown_ms", self.activity_cooldown_ms),
            ("bathroom_ms", self.bathroom_ms),
            ("treatment_ms", self.treatment_ms),
            ("stage_watch_ms", self.stage_watch_ms),
        ];
        for (field, (min, max)) in ranges {
            if min > max {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("min ({}) must not exceed max ({})", min, max),
                });
            }
        }

        if self.roster.is_empty() {
            errors.push(ConfigValidationError {
                field: "roster".to_string(),
                message: "must contain at least one performer".to_string(),
            });
        }
        for spec in &self.roster {
            if spec.set_ms == 0 {
                errors.push(ConfigValidationError {
                    field: "roster".to_string(),
                    message: format!("performer '{}' has a zero-length set", spec.name),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Serialize the configuration as pretty JSON (used by `--print-config`)
    pub fn print_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
