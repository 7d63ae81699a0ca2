use std::process::ExitCode;

use tracing::error;

use crate::commands::base_commands::{Commands, simulation_config};
use crate::commands::report_format::format_simulation_report;
use crate::services::simulation::{SimulationRequest, simulate_from_files};

pub fn simulate_command(cmd: Commands) -> ExitCode {
    let Commands::Simulate {
        input,
        output,
        seed,
        threads,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let request = SimulationRequest {
        fleet_path: &input.fleet,
        requirements_path: &input.requirements,
        start_date: &input.start_date,
        end_date: &input.end_date,
        iterations: input.iterations,
    };
    let report = match simulate_from_files(&request, simulation_config(&input, seed, threads)) {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "simulation failed");
            eprintln!("Failed to simulate fleet availability: {e}");
            return ExitCode::FAILURE;
        }
    };

    let yaml = match serde_yaml::to_string(&report) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize simulation report: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::write(&output, yaml) {
        eprintln!("Failed to write simulation report: {e}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_simulation_report(&report));
    println!("Simulation report written to {output}");
    ExitCode::SUCCESS
}
