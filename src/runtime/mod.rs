/// Runtime orchestrator module - Gateway

mod non_interactive;
mod orchestrator;

pub use non_interactive::{input_from_cli, normalize_place, run_one_shot};
pub use orchestrator::Orchestrator;
