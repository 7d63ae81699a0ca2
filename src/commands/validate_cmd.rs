use std::process::ExitCode;

use crate::commands::base_commands::{Commands, simulation_config};
use crate::services::simulation::{SimulationRequest, validate_files};

pub fn validate_command(cmd: Commands) -> ExitCode {
    let Commands::Validate { input } = cmd else {
        return ExitCode::FAILURE;
    };

    let request = SimulationRequest {
        fleet_path: &input.fleet,
        requirements_path: &input.requirements,
        start_date: &input.start_date,
        end_date: &input.end_date,
        iterations: input.iterations,
    };
    match validate_files(&request, simulation_config(&input, None, None)) {
        Ok(districts) => {
            let districts: Vec<String> = districts.iter().map(|d| d.to_string()).collect();
            println!("Inputs are valid");
            println!("Simulated districts: {}", districts.join(", "));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid simulation inputs: {e}");
            ExitCode::FAILURE
        }
    }
}
