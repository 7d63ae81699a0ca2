use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::district::DistrictId;
use crate::domain::vehicle::VehicleConfig;

#[derive(Error, Debug)]
pub enum FleetYamlError {
    #[error("failed to read fleet yaml file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse fleet yaml file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("fleet yaml file contains no vehicles: {0}")]
    Empty(PathBuf),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VehicleRecord {
    id: Option<String>,
    district: DistrictId,
    failure_probability: f64,
    repair_shape: f64,
    repair_scale: f64,
}

/// Loads the vehicle roster from a YAML list of vehicles.
///
/// Parameter ranges are not checked here; the simulation validates them and
/// reports the offending vehicle.
pub fn load_fleet_from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Vec<VehicleConfig>, FleetYamlError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| FleetYamlError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize_fleet_from_yaml_str(&contents, path)
}

pub fn deserialize_fleet_from_yaml_str(
    input: &str,
    origin_path: &Path,
) -> Result<Vec<VehicleConfig>, FleetYamlError> {
    let records: Vec<VehicleRecord> =
        serde_yaml::from_str(input).map_err(|source| FleetYamlError::Parse {
            path: origin_path.to_path_buf(),
            source,
        })?;
    if records.is_empty() {
        return Err(FleetYamlError::Empty(origin_path.to_path_buf()));
    }

    Ok(records
        .into_iter()
        .map(|record| VehicleConfig {
            id: record.id,
            district: record.district,
            failure_probability: record.failure_probability,
            repair_shape: record.repair_shape,
            repair_scale: record.repair_scale,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vehicles_with_and_without_ids() {
        let yaml = r#"
- id: AMB-01
  district: 1
  failure_probability: 0.02
  repair_shape: 1.5
  repair_scale: 4.0
- district: 2
  failure_probability: 0.1
  repair_shape: 1
  repair_scale: 2
"#;
        let fleet = deserialize_fleet_from_yaml_str(yaml, Path::new("fleet.yaml")).unwrap();

        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[0], VehicleConfig::new(1, 0.02, 1.5, 4.0).with_id("AMB-01"));
        assert_eq!(fleet[1], VehicleConfig::new(2, 0.1, 1.0, 2.0));
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = deserialize_fleet_from_yaml_str("[]", Path::new("fleet.yaml")).unwrap_err();
        assert!(matches!(err, FleetYamlError::Empty(p) if p == Path::new("fleet.yaml")));
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let yaml = "- district: 1\n  failure_probability: 0.1\n  repair_shape: 1.0\n";
        let err = deserialize_fleet_from_yaml_str(yaml, Path::new("fleet.yaml")).unwrap_err();
        assert!(matches!(err, FleetYamlError::Parse { .. }));
        assert!(err.to_string().contains("repair_scale"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = load_fleet_from_yaml_file(temp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, FleetYamlError::ReadFile { .. }));
    }
}
