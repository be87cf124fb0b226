//! Configuration Module
//!
//! This module defines all configuration structures for the batch planner.
//! Configuration is loaded from TOML files and parsed using serde.

use serde::Deserialize;
use std::fs;

use crate::types::BatchMode;

/// Main configuration structure
///
/// Contains all configuration sections for the planner and the simulated
/// chain client. Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [planner]
/// batch_size = 64
/// batch_all = false
///
/// [chain]
/// max_block_weight = 2000000000000
/// call_weight = 20000000000
/// supports_batch = true
/// supports_batch_all = true
///
/// [sim]
/// tx_count = 130
/// interval_ms = 5000
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub planner: PlannerConfig,
    pub chain: ChainConfig,
    pub sim: SimConfig,
}

/// Batch planning configuration
///
/// # Fields
/// - `batch_size`: Starting number of extrinsics per composite, refined at
///   runtime from the weight estimate. Defaults to 64 when omitted. A value
///   of 0 or 1 disables wrapping entirely.
/// - `batch_all`: Request atomic composites (all-or-nothing) instead of
///   best-effort ones.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub batch_all: bool,
}

fn default_batch_size() -> usize {
    64
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_all: false,
        }
    }
}

impl PlannerConfig {
    /// Composite semantics selected by this configuration
    pub fn mode(&self) -> BatchMode {
        if self.batch_all {
            BatchMode::Atomic
        } else {
            BatchMode::BestEffort
        }
    }
}

/// Simulated chain configuration
///
/// Drives the in-process stand-in client used by the binary and the tests.
///
/// # Fields
/// - `max_block_weight`: Maximum total weight a block may contain
/// - `call_weight`: Weight reported for every dry-run estimate (0 simulates
///   a runtime that cannot estimate)
/// - `supports_batch` / `supports_batch_all`: Whether the simulated runtime
///   exposes the composite constructors
/// - `fail_estimates`: Reject every estimate request, for exercising the
///   degraded path
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    pub max_block_weight: u64,
    pub call_weight: u64,
    #[serde(default = "default_true")]
    pub supports_batch: bool,
    #[serde(default = "default_true")]
    pub supports_batch_all: bool,
    #[serde(default)]
    pub fail_estimates: bool,
}

fn default_true() -> bool {
    true
}

/// Submission loop configuration for the binary
///
/// # Fields
/// - `tx_count`: Number of simulated transfers submitted per wave
/// - `interval_ms`: Milliseconds between waves
/// - `input_file`: Optional JSON file holding a recorded pending list to
///   replay instead of generated transfers; re-read on every wave
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    pub tx_count: usize,
    pub interval_ms: u64,
    #[serde(default)]
    pub input_file: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
