//! # car_sim
//!
//! The engine for an auto-driving car simulation: a rectangular grid, named
//! cars with a heading, and per-tick `L`/`R`/`F` command strings with
//! collision detection after every step.

pub mod car;
pub mod collision;
pub mod error;
pub mod grid;
pub mod simulation;

mod replay;

pub use car::Car;
pub use car::Command;
pub use car::Direction;
pub use collision::CollisionRecord;
pub use error::SimulationError;
pub use grid::Grid;
pub use simulation::CarReport;
pub use simulation::MoveOutcome;
pub use simulation::RunState;
pub use simulation::Simulation;
