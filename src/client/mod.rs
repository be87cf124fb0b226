//! Chain Client Module
//!
//! This module defines the narrow capability traits the planner consumes:
//! - Composite-call constructors (best-effort and atomic batching)
//! - The dry-run payment estimate and the block weight limit
//!
//! Implementations stand in for a connected chain. The planner treats
//! extrinsics as opaque handles and never inspects their contents.

mod sim;

pub use sim::{SimCall, SimClient};

use async_trait::async_trait;
use ethers::types::U256;

use crate::types::{EstimateError, PaymentInfo};

/// Composite-call constructors exposed by a connected runtime
///
/// Both constructors are optional runtime features. Callers check the
/// matching `has_*` predicate first; a capability reporting `false` never
/// receives the corresponding constructor call.
pub trait BatchCapability<Tx> {
    /// Whether the runtime exposes a best-effort batch constructor
    fn has_batch(&self) -> bool;

    /// Whether the runtime exposes an atomic batch constructor
    fn has_batch_all(&self) -> bool;

    /// Wrap `calls` into one best-effort composite, preserving order
    fn batch(&self, calls: Vec<Tx>) -> Tx;

    /// Wrap `calls` into one atomic composite, preserving order
    fn batch_all(&self, calls: Vec<Tx>) -> Tx;
}

/// Connected chain client
///
/// The planner's single external dependency. Exposes the per-extrinsic
/// dry-run estimate, the per-block weight budget, and (via the
/// `BatchCapability` supertrait) the composite constructors.
#[async_trait]
pub trait ChainClient: BatchCapability<Self::Extrinsic> + Send + Sync + 'static {
    /// Submittable operation, opaque to the planner
    type Extrinsic: Clone + Send + Sync + 'static;
    /// Account handle used as the fee payer for estimates
    type AccountId: Clone + Send + Sync + 'static;

    /// Dry-run fee and weight estimate for submitting `tx` paid by `payer`
    ///
    /// One network round-trip against the connected node. A zero weight in
    /// the result means the runtime could not price the call.
    async fn payment_info(
        &self,
        tx: &Self::Extrinsic,
        payer: &Self::AccountId,
    ) -> Result<PaymentInfo, EstimateError>;

    /// Maximum total weight a single block may contain
    fn max_block_weight(&self) -> U256;
}
