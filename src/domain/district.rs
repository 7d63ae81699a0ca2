use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

pub type DistrictId = i64;

/// Every date in `[start_date, end_date]`, including `NaiveDate::MAX` when it
/// closes the range. Empty when `start_date > end_date`.
pub fn days_inclusive(start_date: NaiveDate, end_date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let count = if start_date > end_date {
        0
    } else {
        (end_date - start_date).num_days() as usize + 1
    };
    std::iter::successors(Some(start_date), |date| date.succ_opt()).take(count)
}

/// Date-indexed number of vehicles each district must have on the road.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementTable {
    districts: BTreeMap<DistrictId, BTreeMap<NaiveDate, u32>>,
}

impl RequirementTable {
    pub fn new() -> Self {
        Self {
            districts: BTreeMap::new(),
        }
    }

    /// Sets the requirement for one district and date, returning the previous
    /// value if one was already present.
    pub fn insert(&mut self, district: DistrictId, date: NaiveDate, required: u32) -> Option<u32> {
        self.districts
            .entry(district)
            .or_default()
            .insert(date, required)
    }

    /// Registers a district without any dated entries yet.
    pub fn add_district(&mut self, district: DistrictId) {
        self.districts.entry(district).or_default();
    }

    pub fn required(&self, district: DistrictId, date: NaiveDate) -> Option<u32> {
        self.districts.get(&district)?.get(&date).copied()
    }

    pub fn districts(&self) -> impl Iterator<Item = DistrictId> + '_ {
        self.districts.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Fills every date in `[start_date, end_date]` with the same requirement.
    pub fn insert_range(
        &mut self,
        district: DistrictId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        required: u32,
    ) {
        for date in days_inclusive(start_date, end_date) {
            self.insert(district, date, required);
        }
    }

    /// Returns the first date in `[start_date, end_date]` for which `district`
    /// has no entry.
    pub fn first_missing_date(
        &self,
        district: DistrictId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Option<NaiveDate> {
        let days = self.districts.get(&district);
        days_inclusive(start_date, end_date)
            .find(|date| days.is_none_or(|days| !days.contains_key(date)))
    }
}

/// Districts taking part in a simulation: every district with requirements plus
/// every district owning at least one vehicle.
pub fn simulated_districts<I>(requirements: &RequirementTable, vehicle_districts: I) -> BTreeSet<DistrictId>
where
    I: IntoIterator<Item = DistrictId>,
{
    requirements.districts().chain(vehicle_districts).collect()
}
