//! Batch Planning Module
//!
//! This module turns a list of pending extrinsics into a weight-bounded
//! batch plan:
//! - Partitioning: groups extrinsics and wraps multi-member groups into
//!   composite calls
//! - Sizing: derives a safe batch size from a dry-run weight estimate
//!
//! Both operations are pure; the only mutable state (the batch size in
//! effect) lives with the caller.

mod partition;
mod sizing;


pub use partition::build_plan;
pub use sizing::safe_batch_size;

use crate::client::BatchCapability;
use crate::types::{BatchMode, BatchPlan};

/// Batch planner
///
/// Carries the configured composite semantics and builds plans from
/// pending extrinsics at a given batch size.
#[derive(Debug, Clone)]
pub struct BatchPlanner {
    /// Composite semantics requested by configuration
    mode: BatchMode,
}

impl BatchPlanner {
    /// Creates a new planner
    ///
    /// # Arguments
    /// * `mode` - Best-effort or atomic composite semantics
    pub fn new(mode: BatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    /// Build a plan from an ordered list of pending extrinsics
    ///
    /// # Arguments
    /// * `txs` - Pending extrinsics in submission order
    /// * `batch_size` - Maximum extrinsics per composite
    /// * `capability` - The runtime's composite constructors
    ///
    /// # Returns
    /// * `Some(BatchPlan)` covering every input exactly once, in order
    /// * `None` when the input list is empty
    pub fn plan<Tx, B>(
        &self,
        txs: &[Tx],
        batch_size: usize,
        capability: &B,
    ) -> Option<BatchPlan<Tx>>
    where
        Tx: Clone,
        B: BatchCapability<Tx> + ?Sized,
    {
        build_plan(txs, batch_size, self.mode, capability)
    }
}
