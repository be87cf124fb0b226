//! Plan Watcher Module
//!
//! This module implements the reactive shell around the planner. It owns the
//! current inputs (account list, pending extrinsics), the batch size in
//! effect, and the derived plan:
//! - Every input change rebuilds the plan synchronously with the current
//!   batch size and notifies subscribers
//! - Every input change also kicks off one asynchronous dry-run estimate for
//!   the first pending extrinsic; its result refines the batch size
//! - An estimate that resolves after newer inputs arrived is discarded, so a
//!   slow response can never overwrite a fresher size
//! - A rejected estimate is logged and otherwise ignored; the previous batch
//!   size stays in effect

#[cfg(test)]
mod tests;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

use crate::client::ChainClient;
use crate::config::PlannerConfig;
use crate::planner::{safe_batch_size, BatchPlanner};
use crate::types::BatchPlan;

/// Capacity of the plan revision channel; lagging receivers drop old
/// revisions, which is the right semantics for latest-plan-wins consumers
const UPDATE_CHANNEL_SIZE: usize = 16;

/// Broadcast payload describing one plan revision
#[derive(Debug, Clone)]
pub struct PlanEvent<Tx> {
    /// The plan derived from the current inputs, if any
    pub plan: Option<BatchPlan<Tx>>,
    /// Batch size the plan was built with
    pub batch_size: usize,
}

/// Reactive batch plan watcher
///
/// Tracks the inputs a plan depends on and re-derives it on every change.
/// Consumers read the current plan with [`plan`](Self::plan) or follow
/// revisions with [`subscribe`](Self::subscribe). The watcher is a cheap
/// handle; clones share the same state.
pub struct BatchWatcher<C: ChainClient> {
    /// Connected chain client (estimates, weight limit, constructors)
    client: Arc<C>,
    /// Plan builder carrying the configured composite semantics
    planner: BatchPlanner,
    /// Current inputs and the plan derived from them
    state: Arc<RwLock<WatchState<C>>>,
    /// Bumped on every input change; estimates carry the value they were
    /// spawned under and are dropped on mismatch
    generation: Arc<AtomicU64>,
    /// Plan revision fan-out
    updates: broadcast::Sender<PlanEvent<C::Extrinsic>>,
}

impl<C: ChainClient> Clone for BatchWatcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            planner: self.planner.clone(),
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
            updates: self.updates.clone(),
        }
    }
}

struct WatchState<C: ChainClient> {
    /// Known accounts; the first one pays for dry-run estimates
    accounts: Vec<C::AccountId>,
    /// Pending extrinsics, `None` when there is nothing to plan
    txs: Option<Vec<C::Extrinsic>>,
    /// Batch size currently in effect
    batch_size: usize,
    /// Plan derived from the fields above
    plan: Option<BatchPlan<C::Extrinsic>>,
}

impl<C: ChainClient> BatchWatcher<C> {
    /// Creates a new watcher
    ///
    /// # Arguments
    /// * `client` - Shared chain client
    /// * `config` - Starting batch size and composite semantics
    pub fn new(client: Arc<C>, config: PlannerConfig) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_SIZE);

        Self {
            client,
            planner: BatchPlanner::new(config.mode()),
            state: Arc::new(RwLock::new(WatchState {
                accounts: Vec::new(),
                txs: None,
                batch_size: config.batch_size,
                plan: None,
            })),
            generation: Arc::new(AtomicU64::new(0)),
            updates,
        }
    }

    /// Replace the known account list
    ///
    /// The first account becomes the fee payer for estimates.
    pub async fn set_accounts(&self, accounts: Vec<C::AccountId>) {
        {
            let mut state = self.state.write().await;
            state.accounts = accounts;
        }
        self.refresh().await;
    }

    /// Replace the pending extrinsic list
    ///
    /// `None` (or an empty list) clears the plan.
    pub async fn set_transactions(&self, txs: Option<Vec<C::Extrinsic>>) {
        {
            let mut state = self.state.write().await;
            state.txs = txs;
        }
        self.refresh().await;
    }

    /// Current plan, or `None` when there is nothing pending
    pub async fn plan(&self) -> Option<BatchPlan<C::Extrinsic>> {
        self.state.read().await.plan.clone()
    }

    /// Batch size currently in effect
    pub async fn batch_size(&self) -> usize {
        self.state.read().await.batch_size
    }

    /// Subscribe to plan revisions
    pub fn subscribe(&self) -> broadcast::Receiver<PlanEvent<C::Extrinsic>> {
        self.updates.subscribe()
    }

    /// Rebuild the plan from the current inputs and kick off an estimate
    async fn refresh(&self) {
        // Any estimate still in flight is stale from this point on
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut state = self.state.write().await;

        let plan = match state.txs.as_deref() {
            Some(txs) if !txs.is_empty() => {
                self.planner.plan(txs, state.batch_size, self.client.as_ref())
            }
            _ => None,
        };
        state.plan = plan;

        // Estimates need a reference extrinsic and a payer
        let probe = match (
            state.txs.as_ref().and_then(|txs| txs.first()),
            state.accounts.first(),
        ) {
            (Some(tx), Some(payer)) => Some((tx.clone(), payer.clone())),
            _ => None,
        };

        let event = PlanEvent {
            plan: state.plan.clone(),
            batch_size: state.batch_size,
        };
        drop(state);

        let _ = self.updates.send(event);

        if let Some((tx, payer)) = probe {
            let watcher = self.clone();
            tokio::spawn(async move {
                watcher.refresh_batch_size(tx, payer, generation).await;
            });
        }
    }

    /// Request one dry-run estimate and apply the derived batch size
    ///
    /// Fire-and-forget: the published plan lags the estimate by one
    /// round-trip and never blocks on it.
    async fn refresh_batch_size(&self, tx: C::Extrinsic, payer: C::AccountId, generation: u64) {
        let info = match self.client.payment_info(&tx, &payer).await {
            Ok(info) => info,
            Err(err) => {
                warn!("weight estimate failed: {}", err);
                return;
            }
        };

        let mut state = self.state.write().await;

        // Inputs changed while the request was in flight
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("discarding stale weight estimate");
            return;
        }

        let next = safe_batch_size(self.client.max_block_weight(), info.weight, state.batch_size);
        if next == state.batch_size {
            return;
        }

        debug!(
            "batch size {} -> {} (estimated weight {})",
            state.batch_size, next, info.weight
        );
        state.batch_size = next;

        let plan = match state.txs.as_deref() {
            Some(txs) if !txs.is_empty() => self.planner.plan(txs, next, self.client.as_ref()),
            _ => None,
        };
        state.plan = plan;

        let event = PlanEvent {
            plan: state.plan.clone(),
            batch_size: next,
        };
        drop(state);

        let _ = self.updates.send(event);
    }
}
