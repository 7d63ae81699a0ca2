use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::district::DistrictId;
use crate::domain::vehicle::VehicleModel;

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistrictShortage {
    pub days_with_shortage: u64,
    pub total_shortfall_units: u64,
}

/// Outcome of a single trial, keyed by district.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialResult {
    pub districts: BTreeMap<DistrictId, DistrictShortage>,
}

impl TrialResult {
    pub fn get(&self, district: DistrictId) -> Option<&DistrictShortage> {
        self.districts.get(&district)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SeriesPercentiles {
    pub p50: u64,
    pub p85: u64,
    pub p100: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DistrictForecast {
    pub district: DistrictId,
    pub mean_days_short: u64,
    pub std_dev_days_short: f64,
    pub mean_total_moves: u64,
    pub std_dev_total_moves: f64,
    pub days_short_percentiles: SeriesPercentiles,
    pub total_moves_percentiles: SeriesPercentiles,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub fleet_source: String,
    pub requirements_source: String,
    pub start_date: String,
    pub end_date: String,
    pub simulated_days: u64,
    pub iterations: usize,
    pub seed: u64,
    pub vehicles: usize,
    pub model: VehicleModel,
    pub districts: Vec<DistrictForecast>,
}

impl SimulationReport {
    pub fn district(&self, district: DistrictId) -> Option<&DistrictForecast> {
        self.districts.iter().find(|forecast| forecast.district == district)
    }
}

#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub report: SimulationReport,
    pub trials: Vec<TrialResult>,
}
