use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;

use crate::domain::district::{DistrictId, RequirementTable, days_inclusive, simulated_districts};
use crate::domain::vehicle::{SimulatedVehicle, VehicleConfig, VehicleModel};
use crate::services::repair_time_sampler::{RepairTimeSampler, WeibullParamError, WeibullRepairTime};
use crate::services::simulation_types::{DistrictShortage, TrialResult};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrialError {
    #[error("vehicle {vehicle}: failure probability must be within (0, 1), got {value}")]
    InvalidFailureProbability { vehicle: String, value: f64 },
    #[error("vehicle {vehicle}: invalid repair time distribution: {source}")]
    InvalidRepairTime {
        vehicle: String,
        source: WeibullParamError,
    },
    #[error("district {district} has no vehicle requirement for {date}")]
    MissingRequirement { district: DistrictId, date: NaiveDate },
}

/// Runs single trials over a fixed roster and requirement table.
///
/// The roster is kept as a set of vehicles in their initial state; every trial
/// works on a fresh copy so no state carries over between trials.
#[derive(Debug, Clone)]
pub struct TrialRunner<'a, S> {
    vehicles: Vec<SimulatedVehicle<S>>,
    districts: Vec<(DistrictId, Vec<usize>)>,
    requirements: &'a RequirementTable,
    model: VehicleModel,
}

impl<'a> TrialRunner<'a, WeibullRepairTime> {
    /// Validates every roster entry and prepares a runner for it.
    pub fn from_roster(
        roster: &[VehicleConfig],
        requirements: &'a RequirementTable,
        model: VehicleModel,
    ) -> Result<Self, TrialError> {
        let vehicles = roster
            .iter()
            .enumerate()
            .map(|(index, config)| build_vehicle(index, config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(vehicles, requirements, model))
    }
}

impl<'a, S: RepairTimeSampler + Clone> TrialRunner<'a, S> {
    pub fn new(
        vehicles: Vec<SimulatedVehicle<S>>,
        requirements: &'a RequirementTable,
        model: VehicleModel,
    ) -> Self {
        let mut members: BTreeMap<DistrictId, Vec<usize>> =
            simulated_districts(requirements, vehicles.iter().map(|vehicle| vehicle.district()))
                .into_iter()
                .map(|district| (district, Vec::new()))
                .collect();
        for (index, vehicle) in vehicles.iter().enumerate() {
            members.entry(vehicle.district()).or_default().push(index);
        }

        Self {
            vehicles,
            districts: members.into_iter().collect(),
            requirements,
            model,
        }
    }

    pub fn districts(&self) -> impl Iterator<Item = DistrictId> + '_ {
        self.districts.iter().map(|(district, _)| *district)
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Checks that every simulated district has a requirement for every date
    /// in `[start_date, end_date]`.
    pub fn check_requirements(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<(), TrialError> {
        for district in self.districts() {
            if let Some(date) = self
                .requirements
                .first_missing_date(district, start_date, end_date)
            {
                return Err(TrialError::MissingRequirement { district, date });
            }
        }
        Ok(())
    }

    /// Simulates every day of `[start_date, end_date]` once.
    ///
    /// An inverted range yields a zeroed result for every district.
    pub fn run<R: Rng + ?Sized>(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rng: &mut R,
    ) -> Result<TrialResult, TrialError> {
        let mut vehicles = self.vehicles.clone();
        let mut result = TrialResult {
            districts: self
                .districts()
                .map(|district| (district, DistrictShortage::default()))
                .collect(),
        };

        for date in days_inclusive(start_date, end_date) {
            for vehicle in vehicles.iter_mut() {
                vehicle.advance_day(self.model, rng);
            }

            for (district, members) in &self.districts {
                let required = self
                    .requirements
                    .required(*district, date)
                    .ok_or(TrialError::MissingRequirement {
                        district: *district,
                        date,
                    })? as u64;
                let available = members
                    .iter()
                    .filter(|index| vehicles[**index].is_available())
                    .count() as u64;

                if available < required {
                    let shortage = result.districts.entry(*district).or_default();
                    shortage.days_with_shortage += 1;
                    shortage.total_shortfall_units += required - available;
                }
            }
        }

        Ok(result)
    }
}

fn build_vehicle(
    index: usize,
    config: &VehicleConfig,
) -> Result<SimulatedVehicle<WeibullRepairTime>, TrialError> {
    let probability = config.failure_probability;
    if !(probability > 0.0 && probability < 1.0) {
        return Err(TrialError::InvalidFailureProbability {
            vehicle: config.label(index),
            value: probability,
        });
    }
    let repair_time = config
        .repair_time()
        .map_err(|source| TrialError::InvalidRepairTime {
            vehicle: config.label(index),
            source,
        })?;
    Ok(SimulatedVehicle::new(config.district, probability, repair_time))
}
