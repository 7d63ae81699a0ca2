use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::vehicle::{FailureRoll, RepairCountdown, VehicleModel};
use crate::services::monte_carlo::SimulationConfig;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Fleet YAML file listing every vehicle
    #[arg(short = 'f', long)]
    pub fleet: String,
    /// Requirements YAML file with per-district daily vehicle counts
    #[arg(short, long)]
    pub requirements: String,
    /// First simulated day (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: String,
    /// Last simulated day, inclusive (YYYY-MM-DD)
    #[arg(short, long)]
    pub end_date: String,
    /// Number of simulation iterations
    #[arg(short = 'n', long, default_value_t = 10000)]
    pub iterations: usize,
    /// Which side of the daily roll counts as a breakdown
    #[arg(long, value_enum, default_value_t = FailureRoll::Above)]
    pub failure_roll: FailureRoll,
    /// Whether repair countdowns tick down each day
    #[arg(long, value_enum, default_value_t = RepairCountdown::Frozen)]
    pub repair_countdown: RepairCountdown,
}

impl InputArgs {
    pub fn model(&self) -> VehicleModel {
        VehicleModel::new(self.failure_roll, self.repair_countdown)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast district vehicle shortages with a Monte Carlo simulation
    Simulate {
        #[command(flatten)]
        input: InputArgs,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Number of worker threads (defaults to one per core)
        #[arg(short = 'j', long)]
        threads: Option<usize>,
    },
    /// Check fleet and requirement inputs without simulating
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn simulation_config(input: &InputArgs, seed: Option<u64>, threads: Option<usize>) -> SimulationConfig {
    SimulationConfig {
        seed,
        model: input.model(),
        threads,
    }
}
