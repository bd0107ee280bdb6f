pub mod orchestrator;
pub mod progress;
pub mod scheduler;
