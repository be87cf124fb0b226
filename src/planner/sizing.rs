//! Batch Sizing Module
//!
//! Derives how many copies of a reference extrinsic fit in one block
//! without letting a single composite dominate the block's weight budget.

use ethers::types::U256;

// Weight budget for one composite: 64/100 of the block, just under the
// nominal 65% ceiling
const WEIGHT_BUDGET_NUMERATOR: u64 = 64;

/// Derive a safe batch size from a dry-run weight estimate
///
/// # Arguments
/// * `max_block_weight` - Maximum total weight a block may contain
/// * `estimated_weight` - Weight of the reference extrinsic
/// * `current` - Batch size currently in effect (fallback)
///
/// # Returns
/// `floor((max_block_weight * 64 / estimated_weight) / 100)`, the number of
/// reference-weight extrinsics that fit in the per-composite budget.
/// Returns `current` unchanged when `estimated_weight` is zero, the
/// runtime's sentinel for an estimate it could not produce.
pub fn safe_batch_size(max_block_weight: U256, estimated_weight: U256, current: usize) -> usize {
    if estimated_weight.is_zero() {
        return current;
    }

    let repetitions = max_block_weight.saturating_mul(U256::from(WEIGHT_BUDGET_NUMERATOR))
        / estimated_weight;

    // Clamp into machine range before the final scale-down
    let repetitions = if repetitions > U256::from(u64::MAX) {
        u64::MAX
    } else {
        repetitions.as_u64()
    };

    usize::try_from(repetitions / 100).unwrap_or(usize::MAX)
}
