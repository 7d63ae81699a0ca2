use chrono::NaiveDate;
use rand::Rng;

use crate::domain::district::{DistrictId, RequirementTable};
use crate::domain::vehicle::VehicleConfig;
use crate::services::repair_time_sampler::RepairTimeSampler;

// A RepairTimeSampler that always returns the same number of days
#[derive(Debug, Clone, Copy)]
pub struct FixedRepairTime(pub u64);

impl RepairTimeSampler for FixedRepairTime {
    fn sample_days<R: Rng + ?Sized>(&self, _rng: &mut R) -> u64 {
        self.0
    }
}

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn constant_requirements(
    districts: &[(DistrictId, u32)],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> RequirementTable {
    let mut table = RequirementTable::new();
    for (district, required) in districts {
        table.add_district(*district);
        table.insert_range(*district, start_date, end_date, *required);
    }
    table
}

pub fn vehicles_in(
    district: DistrictId,
    count: usize,
    failure_probability: f64,
    repair_shape: f64,
    repair_scale: f64,
) -> Vec<VehicleConfig> {
    (0..count)
        .map(|idx| {
            VehicleConfig::new(district, failure_probability, repair_shape, repair_scale)
                .with_id(&format!("D{district}-{idx}"))
        })
        .collect()
}
