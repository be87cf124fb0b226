use ethers::types::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dry-run fee information for one extrinsic
///
/// Returned by the chain client's payment estimate. A zero weight is the
/// runtime's sentinel for "cannot estimate" (or a genuinely free call) and
/// must not be used to derive a batch size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Execution weight consumed by the extrinsic
    pub weight: U256,
    /// Fee charged for inclusion, excluding any tip
    pub partial_fee: U256,
}

impl PaymentInfo {
    /// Whether the estimate carries no usable weight
    pub fn is_zero_weight(&self) -> bool {
        self.weight.is_zero()
    }
}

/// Composite execution semantics
///
/// - `BestEffort`: members execute in order, execution continues past an
///   individual failure
/// - `Atomic`: any member failure aborts the whole composite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchMode {
    BestEffort,
    Atomic,
}

impl Default for BatchMode {
    fn default() -> Self {
        BatchMode::BestEffort
    }
}

/// One entry of a batch plan
///
/// Either a lone extrinsic passed through untouched, or a composite call
/// wrapping two or more extrinsics. The composite call is opaque once
/// constructed; `wrapped` and `atomic` describe it for logging and
/// inspection without decoding it.
#[derive(Debug, Clone)]
pub enum PlanItem<Tx> {
    /// A group of exactly one, submitted as-is
    Single(Tx),
    /// A composite wrapping `wrapped` extrinsics in their original order
    Batch {
        call: Tx,
        wrapped: usize,
        atomic: bool,
    },
}

impl<Tx> PlanItem<Tx> {
    /// Number of original extrinsics behind this entry
    pub fn wrapped_len(&self) -> usize {
        match self {
            PlanItem::Single(_) => 1,
            PlanItem::Batch { wrapped, .. } => *wrapped,
        }
    }
}

/// Ordered batch plan ready for submission
///
/// Produced by the planner from a list of pending extrinsics. Item order and
/// intra-group order equal the input order; batching never reorders
/// transactions since execution order matters on a ledger.
#[derive(Debug, Clone)]
pub struct BatchPlan<Tx> {
    /// Plan entries in submission order
    pub items: Vec<PlanItem<Tx>>,
    /// Batch size the plan was built with
    pub batch_size: usize,
    /// Creation timestamp (seconds since epoch)
    pub timestamp: u64,
}

impl<Tx> BatchPlan<Tx> {
    /// Number of submittable calls in the plan
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of original extrinsics across all entries
    pub fn wrapped_len(&self) -> usize {
        self.items.iter().map(PlanItem::wrapped_len).sum()
    }
}

impl<Tx: Clone> BatchPlan<Tx> {
    /// The ordered list of calls to submit, composites included
    pub fn calls(&self) -> Vec<Tx> {
        self.items
            .iter()
            .map(|item| match item {
                PlanItem::Single(tx) => tx.clone(),
                PlanItem::Batch { call, .. } => call.clone(),
            })
            .collect()
    }
}

/// Errors from the dry-run payment estimate
#[derive(Debug, Clone, Error)]
pub enum EstimateError {
    /// The estimate request was rejected or the connection dropped
    #[error("estimate request failed: {0}")]
    Request(String),
    /// The connected runtime does not expose payment queries
    #[error("payment queries unsupported by runtime")]
    Unsupported,
}
