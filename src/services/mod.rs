pub mod cancellation;
pub mod fleet_yaml;
pub mod logging;
pub mod monte_carlo;
pub mod repair_time_sampler;
pub mod requirements_yaml;
pub mod simulation;
pub mod simulation_types;
pub mod statistics;
pub mod trial_runner;
