//! Demo marketplace loaded at start-up.
//!
//! The bundled fixture mirrors the showcase data: four public members, one
//! private administrator, a pending request and a single review. Every
//! account shares the fixture's demo password.

mod dataset;
mod startup;

pub use dataset::{DatasetError, MarketplaceDataset};
pub use startup::{SeedOutcome, StartupSeedingError, seed_example_data_on_startup};
