use clap::ValueEnum;
use rand::Rng;
use rand_distr::{Distribution, Standard};
use serde::Serialize;

use crate::domain::district::DistrictId;
use crate::services::repair_time_sampler::{RepairTimeSampler, WeibullParamError, WeibullRepairTime};

/// Static description of one vehicle in the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleConfig {
    pub id: Option<String>,
    pub district: DistrictId,
    pub failure_probability: f64,
    pub repair_shape: f64,
    pub repair_scale: f64,
}

impl VehicleConfig {
    pub fn new(district: DistrictId, failure_probability: f64, repair_shape: f64, repair_scale: f64) -> Self {
        Self {
            id: None,
            district,
            failure_probability,
            repair_shape,
            repair_scale,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Name used in error messages: the roster id when present, else the
    /// 1-based roster position.
    pub fn label(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("#{}", index + 1),
        }
    }

    pub fn repair_time(&self) -> Result<WeibullRepairTime, WeibullParamError> {
        WeibullRepairTime::new(self.repair_shape, self.repair_scale)
    }
}

/// Which side of the daily roll counts as a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FailureRoll {
    /// Break down when the roll is above the failure probability, so a vehicle
    /// fails with probability `1 - p`. This is the historical behaviour of
    /// the availability model and stays the default.
    #[default]
    Above,
    /// Break down when the roll is at or below the failure probability.
    AtOrBelow,
}

impl FailureRoll {
    pub fn fails(self, roll: f64, failure_probability: f64) -> bool {
        match self {
            FailureRoll::Above => roll > failure_probability,
            FailureRoll::AtOrBelow => roll <= failure_probability,
        }
    }
}

/// How the repair countdown of an unavailable vehicle evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RepairCountdown {
    /// The countdown is never decremented: a vehicle comes back on the day it
    /// breaks down if the sampled repair time is zero, otherwise not at all.
    #[default]
    Frozen,
    /// The countdown drops by one every day; a repair time of `n` keeps the
    /// vehicle off the road for `n` days.
    Decrementing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VehicleModel {
    pub failure_roll: FailureRoll,
    pub repair_countdown: RepairCountdown,
}

impl VehicleModel {
    pub fn new(failure_roll: FailureRoll, repair_countdown: RepairCountdown) -> Self {
        Self {
            failure_roll,
            repair_countdown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleState {
    #[default]
    Available,
    Unavailable { days_remaining: u64 },
}

impl VehicleState {
    pub fn is_available(&self) -> bool {
        matches!(self, VehicleState::Available)
    }
}

/// Per-trial availability state machine for one vehicle.
#[derive(Debug, Clone)]
pub struct SimulatedVehicle<S> {
    district: DistrictId,
    failure_probability: f64,
    repair_time: S,
    state: VehicleState,
}

impl<S: RepairTimeSampler> SimulatedVehicle<S> {
    pub fn new(district: DistrictId, failure_probability: f64, repair_time: S) -> Self {
        Self {
            district,
            failure_probability,
            repair_time,
            state: VehicleState::Available,
        }
    }

    pub fn district(&self) -> DistrictId {
        self.district
    }

    pub fn state(&self) -> VehicleState {
        self.state
    }

    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }

    /// Advances the vehicle by one simulated day.
    ///
    /// An available vehicle rolls for a breakdown and, if it breaks down, draws
    /// its repair time. An unavailable vehicle (including one that broke down a
    /// moment ago) returns to service once its countdown reads zero.
    pub fn advance_day<R: Rng + ?Sized>(&mut self, model: VehicleModel, rng: &mut R) {
        if self.state.is_available() {
            let roll: f64 = Standard.sample(rng);
            if model.failure_roll.fails(roll, self.failure_probability) {
                self.state = VehicleState::Unavailable {
                    days_remaining: self.repair_time.sample_days(rng),
                };
            }
        }

        if let VehicleState::Unavailable { days_remaining } = self.state {
            self.state = match (days_remaining, model.repair_countdown) {
                (0, _) => VehicleState::Available,
                (_, RepairCountdown::Decrementing) => VehicleState::Unavailable {
                    days_remaining: days_remaining - 1,
                },
                (_, RepairCountdown::Frozen) => self.state,
            };
        }
    }
}
