use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::district::{DistrictId, RequirementTable, days_inclusive};

#[derive(Error, Debug)]
pub enum RequirementsYamlError {
    #[error("failed to read requirements yaml file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse requirements yaml file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid date format in {path}: {value} (expected YYYY-MM-DD)")]
    InvalidDate { path: PathBuf, value: String },
    #[error(
        "invalid date range in {path}: start_date {start_date} is after end_date {end_date}"
    )]
    InvalidDateRange {
        path: PathBuf,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[error("duplicate requirement in {path}: district {district} on {date}")]
    DuplicateEntry {
        path: PathBuf,
        district: DistrictId,
        date: NaiveDate,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DistrictRecord {
    district: DistrictId,
    days: Option<Vec<DayRecord>>,
    ranges: Option<Vec<RangeRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DayRecord {
    date: String,
    required: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeRecord {
    start_date: String,
    end_date: String,
    required: u32,
}

/// Loads the per-district daily requirement table.
///
/// Each district lists single `days` and/or inclusive `ranges`; every date may
/// be given only once per district.
///
/// # Errors
/// - Returns an error on I/O or parse failures.
/// - Returns an error for malformed dates, inverted ranges and duplicate dates.
pub fn load_requirements_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<RequirementTable, RequirementsYamlError> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).map_err(|source| RequirementsYamlError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    deserialize_requirements_from_yaml_str(&contents, path)
}

pub fn deserialize_requirements_from_yaml_str(
    input: &str,
    origin_path: &Path,
) -> Result<RequirementTable, RequirementsYamlError> {
    let records: Vec<DistrictRecord> =
        serde_yaml::from_str(input).map_err(|source| RequirementsYamlError::Parse {
            path: origin_path.to_path_buf(),
            source,
        })?;

    let mut table = RequirementTable::new();
    for record in records {
        table.add_district(record.district);
        for day in record.days.unwrap_or_default() {
            let date = parse_date(&day.date, origin_path)?;
            insert_unique(&mut table, record.district, date, day.required, origin_path)?;
        }
        for range in record.ranges.unwrap_or_default() {
            let start_date = parse_date(&range.start_date, origin_path)?;
            let end_date = parse_date(&range.end_date, origin_path)?;
            if start_date > end_date {
                return Err(RequirementsYamlError::InvalidDateRange {
                    path: origin_path.to_path_buf(),
                    start_date,
                    end_date,
                });
            }
            for date in days_inclusive(start_date, end_date) {
                insert_unique(&mut table, record.district, date, range.required, origin_path)?;
            }
        }
    }
    Ok(table)
}

fn insert_unique(
    table: &mut RequirementTable,
    district: DistrictId,
    date: NaiveDate,
    required: u32,
    origin_path: &Path,
) -> Result<(), RequirementsYamlError> {
    match table.insert(district, date, required) {
        None => Ok(()),
        Some(_) => Err(RequirementsYamlError::DuplicateEntry {
            path: origin_path.to_path_buf(),
            district,
            date,
        }),
    }
}

fn parse_date(value: &str, origin_path: &Path) -> Result<NaiveDate, RequirementsYamlError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| RequirementsYamlError::InvalidDate {
        path: origin_path.to_path_buf(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::on_date;

    fn parse(yaml: &str) -> Result<RequirementTable, RequirementsYamlError> {
        deserialize_requirements_from_yaml_str(yaml, Path::new("requirements.yaml"))
    }

    #[test]
    fn expands_ranges_and_single_days() {
        let table = parse(
            r#"
- district: 1
  ranges:
    - start_date: 2026-01-01
      end_date: 2026-01-03
      required: 2
  days:
    - date: 2026-01-04
      required: 5
- district: 2
"#,
        )
        .unwrap();

        assert_eq!(table.required(1, on_date(2026, 1, 1)), Some(2));
        assert_eq!(table.required(1, on_date(2026, 1, 3)), Some(2));
        assert_eq!(table.required(1, on_date(2026, 1, 4)), Some(5));
        assert_eq!(table.required(1, on_date(2026, 1, 5)), None);
        assert_eq!(table.districts().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn returns_error_on_invalid_date_format() {
        let err = parse("- district: 1\n  days:\n    - date: 2026-02-xx\n      required: 1\n")
            .unwrap_err();
        assert!(matches!(err, RequirementsYamlError::InvalidDate { ref value, .. } if value == "2026-02-xx"));
    }

    #[test]
    fn returns_error_when_range_start_is_after_end() {
        let err = parse(
            "- district: 1\n  ranges:\n    - start_date: 2026-02-21\n      end_date: 2026-02-20\n      required: 1\n",
        )
        .unwrap_err();
        assert!(matches!(err, RequirementsYamlError::InvalidDateRange { .. }));
    }

    #[test]
    fn returns_error_on_overlapping_entries() {
        let err = parse(
            r#"
- district: 3
  ranges:
    - start_date: 2026-01-01
      end_date: 2026-01-10
      required: 1
- district: 3
  days:
    - date: 2026-01-05
      required: 4
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RequirementsYamlError::DuplicateEntry { district: 3, date, .. } if date == on_date(2026, 1, 5)
        ));
    }

    #[test]
    fn negative_requirement_is_a_parse_error() {
        let err = parse("- district: 1\n  days:\n    - date: 2026-01-01\n      required: -1\n")
            .unwrap_err();
        assert!(matches!(err, RequirementsYamlError::Parse { .. }));
    }
}
