pub mod collision;
pub mod config;
pub mod controls;
pub mod entity;
pub mod error;
pub mod handle_set;
pub mod model;
pub mod rng;
pub mod scenario;
pub mod simulation;
pub mod snapshot;

pub use config::GameConfig;
pub use error::Error;
pub use simulation::Simulation;
