//! Tests for the plan watcher
//!
//! Exercises the estimate round-trip: resizing, rejection, staleness

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use ethers::types::{Address, U256};
    use tokio::sync::{mpsc, Mutex};
    use tokio::time::sleep;

    use crate::client::{BatchCapability, ChainClient, SimCall, SimClient};
    use crate::config::{ChainConfig, PlannerConfig};
    use crate::types::{EstimateError, PaymentInfo, PlanItem};
    use crate::watcher::BatchWatcher;

    fn transfers(n: usize) -> Vec<SimCall> {
        (0..n)
            .map(|i| SimCall::Transfer {
                to: Address::from_low_u64_be(i as u64 + 1),
                value: U256::from(1_000),
            })
            .collect()
    }

    fn planner_config(batch_size: usize) -> PlannerConfig {
        PlannerConfig {
            batch_size,
            batch_all: false,
        }
    }

    /// Chain stand-in whose estimate yields a batch size of 64
    fn resizing_client(fail_estimates: bool, call_weight: u64) -> Arc<SimClient> {
        Arc::new(SimClient::new(ChainConfig {
            max_block_weight: 1_000_000,
            call_weight,
            supports_batch: true,
            supports_batch_all: true,
            fail_estimates,
        }))
    }

    /// Poll until the watcher reaches the expected size or time runs out
    async fn wait_for_batch_size(watcher: &BatchWatcher<SimClient>, expected: usize) {
        for _ in 0..200 {
            if watcher.batch_size().await == expected {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("batch size never reached {}", expected);
    }

    #[tokio::test]
    async fn test_estimate_resizes_and_replans() {
        // 1_000_000 * 64 / 10_000 / 100 = 64
        let watcher = BatchWatcher::new(resizing_client(false, 10_000), planner_config(10));
        watcher.set_accounts(vec![Address::zero()]).await;
        watcher.set_transactions(Some(transfers(130))).await;

        wait_for_batch_size(&watcher, 64).await;

        let plan = watcher.plan().await.expect("plan should exist");
        assert_eq!(plan.batch_size, 64);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.wrapped_len(), 130);
    }

    #[tokio::test]
    async fn test_rejected_estimate_keeps_previous_size() {
        let watcher = BatchWatcher::new(resizing_client(true, 10_000), planner_config(10));
        watcher.set_accounts(vec![Address::zero()]).await;
        watcher.set_transactions(Some(transfers(25))).await;

        // Give the failing estimate time to resolve
        sleep(Duration::from_millis(100)).await;

        assert_eq!(watcher.batch_size().await, 10);
        let plan = watcher.plan().await.expect("plan should exist");
        assert_eq!(plan.len(), 3); // 10 + 10 + 5
    }

    #[tokio::test]
    async fn test_zero_weight_estimate_keeps_previous_size() {
        let watcher = BatchWatcher::new(resizing_client(false, 0), planner_config(10));
        watcher.set_accounts(vec![Address::zero()]).await;
        watcher.set_transactions(Some(transfers(12))).await;

        sleep(Duration::from_millis(100)).await;

        assert_eq!(watcher.batch_size().await, 10);
    }

    #[tokio::test]
    async fn test_no_accounts_means_no_estimate() {
        let watcher = BatchWatcher::new(resizing_client(false, 10_000), planner_config(10));
        watcher.set_transactions(Some(transfers(30))).await;

        sleep(Duration::from_millis(100)).await;

        // Without a payer no estimate runs and the size stays configured
        assert_eq!(watcher.batch_size().await, 10);
        assert_eq!(watcher.plan().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_clearing_transactions_clears_plan() {
        let watcher = BatchWatcher::new(resizing_client(false, 10_000), planner_config(10));
        watcher.set_accounts(vec![Address::zero()]).await;
        watcher.set_transactions(Some(transfers(5))).await;
        assert!(watcher.plan().await.is_some());

        watcher.set_transactions(None).await;
        assert!(watcher.plan().await.is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_plan_revisions() {
        let watcher = BatchWatcher::new(resizing_client(false, 10_000), planner_config(10));
        let mut updates = watcher.subscribe();

        watcher.set_accounts(vec![Address::zero()]).await;
        watcher.set_transactions(Some(transfers(30))).await;

        // Account change first: still no pending extrinsics
        let first = updates.recv().await.unwrap();
        assert!(first.plan.is_none());

        // Transaction change: planned at the configured size
        let second = updates.recv().await.unwrap();
        assert_eq!(second.batch_size, 10);
        assert_eq!(second.plan.as_ref().unwrap().len(), 3);

        // Estimate lands: resized to 64, all 30 fit in one composite
        let third = updates.recv().await.unwrap();
        assert_eq!(third.batch_size, 64);
        let plan = third.plan.as_ref().unwrap();
        assert_eq!(plan.len(), 1);
        assert!(matches!(plan.items[0], PlanItem::Batch { wrapped: 30, .. }));
    }

    /// Chain stand-in that blocks each estimate until the test permits it
    struct GatedClient {
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl BatchCapability<SimCall> for GatedClient {
        fn has_batch(&self) -> bool {
            true
        }

        fn has_batch_all(&self) -> bool {
            true
        }

        fn batch(&self, calls: Vec<SimCall>) -> SimCall {
            SimCall::Batch(calls)
        }

        fn batch_all(&self, calls: Vec<SimCall>) -> SimCall {
            SimCall::BatchAll(calls)
        }
    }

    #[async_trait]
    impl ChainClient for GatedClient {
        type Extrinsic = SimCall;
        type AccountId = Address;

        async fn payment_info(
            &self,
            _tx: &SimCall,
            _payer: &Address,
        ) -> Result<PaymentInfo, EstimateError> {
            let _ = self.gate.lock().await.recv().await;
            Ok(PaymentInfo {
                weight: U256::from(10_000),
                partial_fee: U256::zero(),
            })
        }

        fn max_block_weight(&self) -> U256 {
            U256::from(1_000_000)
        }
    }

    #[tokio::test]
    async fn test_stale_estimate_is_discarded() {
        let (permit, gate) = mpsc::channel(4);
        let client = Arc::new(GatedClient {
            gate: Mutex::new(gate),
        });
        let watcher = BatchWatcher::new(client, planner_config(10));

        watcher.set_accounts(vec![Address::zero()]).await;
        // Spawns an estimate that blocks on the gate
        watcher.set_transactions(Some(transfers(20))).await;
        // Supersedes it before it resolves; no new estimate is spawned
        watcher.set_transactions(None).await;

        // Let the in-flight estimate finish; its result must be dropped
        permit.send(()).await.unwrap();
        sleep(Duration::from_millis(100)).await;

        assert_eq!(watcher.batch_size().await, 10);
        assert!(watcher.plan().await.is_none());
    }
}
