use crate::domain::vehicle::{FailureRoll, RepairCountdown};
use crate::services::simulation_types::{DistrictForecast, SimulationReport};

pub fn format_simulation_report(report: &SimulationReport) -> String {
    let mut lines = Vec::new();
    lines.push("Fleet Availability Report".to_string());
    lines.push(format!("Fleet: {}", report.fleet_source));
    lines.push(format!("Requirements: {}", report.requirements_source));
    lines.push(format!(
        "Period: {} to {} ({} days)",
        report.start_date, report.end_date, report.simulated_days
    ));
    lines.push(format!("Vehicles: {}", report.vehicles));
    lines.push(format!("Iterations: {}", report.iterations));
    lines.push(format!("Seed: {}", report.seed));
    lines.push(format!(
        "Model: {}, {}",
        failure_roll_label(report.model.failure_roll),
        countdown_label(report.model.repair_countdown)
    ));
    lines.push(String::new());
    lines.push("District | Days short (mean ± sd) | Moves (mean ± sd) | Days short P85".to_string());
    lines.push("---------|------------------------|-------------------|---------------".to_string());
    for forecast in &report.districts {
        lines.push(format_district_row(forecast));
    }

    lines.join("\n")
}

fn format_district_row(forecast: &DistrictForecast) -> String {
    format!(
        "{district} | {days} ± {days_sd:.2} | {moves} ± {moves_sd:.2} | {p85}",
        district = forecast.district,
        days = forecast.mean_days_short,
        days_sd = forecast.std_dev_days_short,
        moves = forecast.mean_total_moves,
        moves_sd = forecast.std_dev_total_moves,
        p85 = forecast.days_short_percentiles.p85,
    )
}

fn failure_roll_label(roll: FailureRoll) -> &'static str {
    match roll {
        FailureRoll::Above => "fails when roll > p",
        FailureRoll::AtOrBelow => "fails when roll <= p",
    }
}

fn countdown_label(countdown: RepairCountdown) -> &'static str {
    match countdown {
        RepairCountdown::Frozen => "frozen repair countdown",
        RepairCountdown::Decrementing => "daily repair countdown",
    }
}
