use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::district::{DistrictId, RequirementTable};
use crate::domain::vehicle::{VehicleConfig, VehicleModel};
use crate::services::cancellation::CancellationToken;
use crate::services::repair_time_sampler::WeibullRepairTime;
use crate::services::simulation_types::{
    DistrictForecast, SeriesPercentiles, SimulationOutput, SimulationReport, TrialResult,
};
use crate::services::statistics::{mean, percentile_sorted, population_std_dev};
use crate::services::trial_runner::{TrialError, TrialRunner};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("iterations must be greater than zero")]
    InvalidIterations,
    #[error("start date {start_date} is after end date {end_date}")]
    InvalidDateRange {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[error(transparent)]
    Trial(#[from] TrialError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("simulation was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Seed for the per-trial random sources; drawn from the OS when absent.
    pub seed: Option<u64>,
    pub model: VehicleModel,
    /// Worker threads; the global rayon pool is used when absent.
    pub threads: Option<usize>,
}

/// Repeats trials over one roster and requirement table and reduces them to
/// per-district statistics.
pub struct MonteCarloEngine<'a> {
    roster: &'a [VehicleConfig],
    requirements: &'a RequirementTable,
    config: SimulationConfig,
    cancellation: CancellationToken,
}

impl<'a> MonteCarloEngine<'a> {
    pub fn new(roster: &'a [VehicleConfig], requirements: &'a RequirementTable) -> Self {
        Self {
            roster,
            requirements,
            config: SimulationConfig::default(),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Checks the whole configuration without running any trial.
    pub fn validate(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        iterations: usize,
    ) -> Result<TrialRunner<'a, WeibullRepairTime>, SimulationError> {
        if iterations == 0 {
            return Err(SimulationError::InvalidIterations);
        }
        if start_date > end_date {
            return Err(SimulationError::InvalidDateRange {
                start_date,
                end_date,
            });
        }
        let runner = TrialRunner::from_roster(self.roster, self.requirements, self.config.model)?;
        runner.check_requirements(start_date, end_date)?;
        Ok(runner)
    }

    pub fn run(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        iterations: usize,
    ) -> Result<SimulationOutput, SimulationError> {
        let runner = self.validate(start_date, end_date, iterations)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        info!(
            iterations,
            seed,
            vehicles = runner.vehicle_count(),
            %start_date,
            %end_date,
            "starting fleet simulation"
        );

        let run_trials = || {
            (0..iterations)
                .into_par_iter()
                .map(|index| {
                    if self.cancellation.is_cancelled() {
                        return Err(SimulationError::Cancelled);
                    }
                    let mut rng = trial_rng(seed, index);
                    Ok(runner.run(start_date, end_date, &mut rng)?)
                })
                .collect::<Result<Vec<TrialResult>, SimulationError>>()
        };
        let trials = match self.config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(run_trials),
            None => run_trials(),
        };
        let trials = trials.inspect_err(|error| {
            if matches!(error, SimulationError::Cancelled) {
                warn!(seed, "fleet simulation cancelled");
            }
        })?;
        debug!(trials = trials.len(), "all trials finished");

        let districts = runner
            .districts()
            .map(|district| summarize_district(district, &trials))
            .collect::<Vec<_>>();
        info!(districts = districts.len(), "fleet simulation complete");

        let report = SimulationReport {
            fleet_source: String::new(),
            requirements_source: String::new(),
            start_date: start_date.format("%Y-%m-%d").to_string(),
            end_date: end_date.format("%Y-%m-%d").to_string(),
            simulated_days: (end_date - start_date).num_days() as u64 + 1,
            iterations,
            seed,
            vehicles: runner.vehicle_count(),
            model: self.config.model,
            districts,
        };
        Ok(SimulationOutput { report, trials })
    }
}

/// Random source for trial `index`: the run seed on its own ChaCha stream, so
/// results do not depend on which worker picks up the trial.
pub fn trial_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Reduces one district's per-trial shortages to means, population standard
/// deviations and percentiles.
pub fn summarize_district(district: DistrictId, trials: &[TrialResult]) -> DistrictForecast {
    let mut days_short = Vec::with_capacity(trials.len());
    let mut total_moves = Vec::with_capacity(trials.len());
    for trial in trials {
        let shortage = trial.get(district).copied().unwrap_or_default();
        days_short.push(shortage.days_with_shortage);
        total_moves.push(shortage.total_shortfall_units);
    }

    DistrictForecast {
        district,
        mean_days_short: mean(&days_short).unwrap_or(0.0).round() as u64,
        std_dev_days_short: population_std_dev(&days_short).unwrap_or(0.0),
        mean_total_moves: mean(&total_moves).unwrap_or(0.0).round() as u64,
        std_dev_total_moves: population_std_dev(&total_moves).unwrap_or(0.0),
        days_short_percentiles: series_percentiles(days_short),
        total_moves_percentiles: series_percentiles(total_moves),
    }
}

fn series_percentiles(mut values: Vec<u64>) -> SeriesPercentiles {
    values.sort_unstable();
    SeriesPercentiles {
        p50: percentile_sorted(&values, 50.0).unwrap_or(0),
        p85: percentile_sorted(&values, 85.0).unwrap_or(0),
        p100: percentile_sorted(&values, 100.0).unwrap_or(0),
    }
}
