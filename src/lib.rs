//! This crate groups pending blockchain transactions ("extrinsics") into
//! composite batches sized to fit a network's per-block weight limit, and
//! exposes the batched list reactively to consumers.
//! It includes modules for data types, chain-client capabilities, batch
//! planning, plan watching, and configuration.

pub mod types; // Defines common data structures and types used throughout the planner.
pub mod client; // Chain-client capability traits and the simulated client.
pub mod planner; // Batch sizing and plan construction.
pub mod watcher; // Reactive shell tracking inputs and re-deriving the plan.
pub mod config; // Defines and loads planner configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::Config;
pub use planner::BatchPlanner;
pub use watcher::BatchWatcher;
