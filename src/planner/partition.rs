//! Plan Construction Module
//!
//! This module partitions an ordered extrinsic list into groups no larger
//! than the batch size and wraps each multi-member group into one composite
//! call. Group order and intra-group order always equal the input order.

use crate::client::BatchCapability;
use crate::types::{BatchMode, BatchPlan, PlanItem};

/// Build a batch plan from an ordered list of pending extrinsics
///
/// # Arguments
/// * `txs` - Pending extrinsics in submission order
/// * `batch_size` - Maximum extrinsics per composite group
/// * `mode` - Requested composite semantics
/// * `capability` - The runtime's composite constructors
///
/// # Returns
/// * `Some(BatchPlan)` where every input appears exactly once, in its
///   original relative position
/// * `None` when `txs` is empty
///
/// # Pass-through
/// A batch size of 0 or 1, or a runtime without a batch constructor, yields
/// a plan of lone extrinsics with nothing wrapped. This is the supported
/// degraded mode for chains without batch support, not an error.
pub fn build_plan<Tx, B>(
    txs: &[Tx],
    batch_size: usize,
    mode: BatchMode,
    capability: &B,
) -> Option<BatchPlan<Tx>>
where
    Tx: Clone,
    B: BatchCapability<Tx> + ?Sized,
{
    if txs.is_empty() {
        return None;
    }

    if batch_size <= 1 || !capability.has_batch() {
        let items = txs.iter().cloned().map(PlanItem::Single).collect();
        return Some(seal(items, batch_size));
    }

    // Atomic semantics need the stronger constructor; fall back to the
    // best-effort one when the runtime lacks it.
    let atomic = mode == BatchMode::Atomic && capability.has_batch_all();

    // Step 1: Walk left to right, closing a group whenever it reaches the
    // batch size. chunks() preserves both group order and member order.
    let mut items = Vec::with_capacity(txs.len() / batch_size + 1);
    for group in txs.chunks(batch_size) {
        // Step 2: A lone extrinsic is submitted as-is; larger groups are
        // wrapped into one composite call.
        if let [tx] = group {
            items.push(PlanItem::Single(tx.clone()));
        } else {
            let wrapped = group.len();
            let call = if atomic {
                capability.batch_all(group.to_vec())
            } else {
                capability.batch(group.to_vec())
            };
            items.push(PlanItem::Batch {
                call,
                wrapped,
                atomic,
            });
        }
    }

    Some(seal(items, batch_size))
}

/// Stamp the finished item list into a plan
fn seal<Tx>(items: Vec<PlanItem<Tx>>, batch_size: usize) -> BatchPlan<Tx> {
    BatchPlan {
        items,
        batch_size,
        timestamp: chrono::Utc::now().timestamp() as u64,
    }
}
