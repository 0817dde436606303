pub mod config;
pub mod environment;
pub mod memory;
pub mod organism;
pub mod params;
pub mod planning;
pub mod trials;
pub mod vectors;

pub use config::PlannerConfig;
pub use organism::{Organism, OrganismState};
pub use vectors::{ActuatorVector, SensoryVector};
