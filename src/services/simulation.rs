use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::domain::district::DistrictId;
use crate::services::fleet_yaml::{FleetYamlError, load_fleet_from_yaml_file};
use crate::services::monte_carlo::{MonteCarloEngine, SimulationConfig, SimulationError};
use crate::services::requirements_yaml::{RequirementsYamlError, load_requirements_from_yaml_file};
use crate::services::simulation_types::SimulationReport;

#[derive(Error, Debug)]
pub enum FleetSimulationError {
    #[error(transparent)]
    Fleet(#[from] FleetYamlError),
    #[error(transparent)]
    Requirements(#[from] RequirementsYamlError),
    #[error("invalid start date: {0}")]
    InvalidStartDate(String),
    #[error("invalid end date: {0}")]
    InvalidEndDate(String),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Dates and iteration count of one simulation request, as given on the
/// command line.
#[derive(Debug, Clone)]
pub struct SimulationRequest<'a> {
    pub fleet_path: &'a str,
    pub requirements_path: &'a str,
    pub start_date: &'a str,
    pub end_date: &'a str,
    pub iterations: usize,
}

pub fn simulate_from_files(
    request: &SimulationRequest<'_>,
    config: SimulationConfig,
) -> Result<SimulationReport, FleetSimulationError> {
    let (start_date, end_date) = parse_range(request)?;
    let fleet = load_fleet_from_yaml_file(request.fleet_path)?;
    let requirements = load_requirements_from_yaml_file(request.requirements_path)?;
    debug!(
        vehicles = fleet.len(),
        fleet = request.fleet_path,
        requirements = request.requirements_path,
        "loaded simulation inputs"
    );

    let output = MonteCarloEngine::new(&fleet, &requirements)
        .with_config(config)
        .run(start_date, end_date, request.iterations)?;

    let mut report = output.report;
    report.fleet_source = data_source_name(request.fleet_path);
    report.requirements_source = data_source_name(request.requirements_path);
    Ok(report)
}

/// Loads and validates the inputs without running any trial, returning the
/// districts that would be simulated.
pub fn validate_files(
    request: &SimulationRequest<'_>,
    config: SimulationConfig,
) -> Result<Vec<DistrictId>, FleetSimulationError> {
    let (start_date, end_date) = parse_range(request)?;
    let fleet = load_fleet_from_yaml_file(request.fleet_path)?;
    let requirements = load_requirements_from_yaml_file(request.requirements_path)?;

    let runner = MonteCarloEngine::new(&fleet, &requirements)
        .with_config(config)
        .validate(start_date, end_date, request.iterations)?;
    Ok(runner.districts().collect())
}

fn parse_range(request: &SimulationRequest<'_>) -> Result<(NaiveDate, NaiveDate), FleetSimulationError> {
    let start_date = NaiveDate::parse_from_str(request.start_date, "%Y-%m-%d")
        .map_err(|_| FleetSimulationError::InvalidStartDate(request.start_date.to_string()))?;
    let end_date = NaiveDate::parse_from_str(request.end_date, "%Y-%m-%d")
        .map_err(|_| FleetSimulationError::InvalidEndDate(request.end_date.to_string()))?;
    Ok((start_date, end_date))
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vehicle::{FailureRoll, RepairCountdown, VehicleModel};
    use assert_fs::prelude::*;

    const FLEET: &str = r#"
- id: AMB-1
  district: 1
  failure_probability: 0.05
  repair_shape: 1.5
  repair_scale: 3.0
- id: AMB-2
  district: 1
  failure_probability: 0.05
  repair_shape: 1.5
  repair_scale: 3.0
"#;

    const REQUIREMENTS: &str = r#"
- district: 1
  ranges:
    - start_date: 2026-01-01
      end_date: 2026-01-31
      required: 1
- district: 2
  ranges:
    - start_date: 2026-01-01
      end_date: 2026-01-31
      required: 1
"#;

    fn config() -> SimulationConfig {
        SimulationConfig {
            seed: Some(12),
            model: VehicleModel::new(FailureRoll::AtOrBelow, RepairCountdown::Decrementing),
            threads: None,
        }
    }

    #[test]
    fn simulate_from_files_sets_report_fields() {
        let temp = assert_fs::TempDir::new().unwrap();
        let fleet = temp.child("fleet.yaml");
        fleet.write_str(FLEET).unwrap();
        let requirements = temp.child("requirements.yaml");
        requirements.write_str(REQUIREMENTS).unwrap();

        let request = SimulationRequest {
            fleet_path: fleet.path().to_str().unwrap(),
            requirements_path: requirements.path().to_str().unwrap(),
            start_date: "2026-01-01",
            end_date: "2026-01-31",
            iterations: 7,
        };
        let report = simulate_from_files(&request, config()).unwrap();

        assert_eq!(report.fleet_source, "fleet.yaml");
        assert_eq!(report.requirements_source, "requirements.yaml");
        assert_eq!(report.iterations, 7);
        assert_eq!(report.seed, 12);
        assert_eq!(report.vehicles, 2);
        assert_eq!(report.simulated_days, 31);
        assert_eq!(report.districts.len(), 2);
        assert_eq!(report.district(2).unwrap().mean_days_short, 31);
    }

    #[test]
    fn validate_files_reports_missing_coverage() {
        let temp = assert_fs::TempDir::new().unwrap();
        let fleet = temp.child("fleet.yaml");
        fleet.write_str(FLEET).unwrap();
        let requirements = temp.child("requirements.yaml");
        requirements.write_str(REQUIREMENTS).unwrap();

        let mut request = SimulationRequest {
            fleet_path: fleet.path().to_str().unwrap(),
            requirements_path: requirements.path().to_str().unwrap(),
            start_date: "2026-01-01",
            end_date: "2026-01-31",
            iterations: 1,
        };
        assert_eq!(validate_files(&request, config()).unwrap(), vec![1, 2]);

        request.end_date = "2026-02-01";
        let err = validate_files(&request, config()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "district 1 has no vehicle requirement for 2026-02-01"
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        let request = SimulationRequest {
            fleet_path: "fleet.yaml",
            requirements_path: "requirements.yaml",
            start_date: "2026-13-01",
            end_date: "2026-01-31",
            iterations: 1,
        };
        let err = simulate_from_files(&request, config()).unwrap_err();
        assert!(matches!(err, FleetSimulationError::InvalidStartDate(value) if value == "2026-13-01"));
    }
}
