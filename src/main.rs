use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use fleetsim::commands::base_commands::{CliArgs, Commands};
use fleetsim::commands::simulate_cmd::simulate_command;
use fleetsim::commands::validate_cmd::validate_command;
use fleetsim::services::logging::init_tracing;

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Simulate { .. } => simulate_command(cmd),
        cmd @ Commands::Validate { .. } => validate_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            ExitCode::SUCCESS
        }
    }
}
