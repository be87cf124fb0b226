use async_trait::async_trait;
use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

use super::{BatchCapability, ChainClient};
use crate::config::ChainConfig;
use crate::types::{EstimateError, PaymentInfo};

/// Simulated extrinsic
///
/// Composite variants record their members, so callers can check what a
/// constructed batch actually wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimCall {
    /// Plain balance transfer
    Transfer { to: Address, value: U256 },
    /// Best-effort composite
    Batch(Vec<SimCall>),
    /// Atomic composite
    BatchAll(Vec<SimCall>),
}

impl SimCall {
    /// Members of a composite, or the call itself when not a composite
    pub fn flatten(&self) -> Vec<SimCall> {
        match self {
            SimCall::Batch(calls) | SimCall::BatchAll(calls) => calls.clone(),
            other => vec![other.clone()],
        }
    }
}

/// In-process stand-in for a connected chain client
///
/// Answers estimate requests from fixed configuration instead of a node,
/// and can simulate a runtime without batch support or with failing
/// estimates.
pub struct SimClient {
    config: ChainConfig,
}

impl SimClient {
    pub fn new(config: ChainConfig) -> Self {
        Self { config }
    }
}

impl BatchCapability<SimCall> for SimClient {
    fn has_batch(&self) -> bool {
        self.config.supports_batch
    }

    fn has_batch_all(&self) -> bool {
        self.config.supports_batch_all
    }

    fn batch(&self, calls: Vec<SimCall>) -> SimCall {
        SimCall::Batch(calls)
    }

    fn batch_all(&self, calls: Vec<SimCall>) -> SimCall {
        SimCall::BatchAll(calls)
    }
}

#[async_trait]
impl ChainClient for SimClient {
    type Extrinsic = SimCall;
    type AccountId = Address;

    async fn payment_info(
        &self,
        _tx: &SimCall,
        _payer: &Address,
    ) -> Result<PaymentInfo, EstimateError> {
        if self.config.fail_estimates {
            return Err(EstimateError::Request(
                "simulated estimate rejection".to_string(),
            ));
        }

        // Flat fee proportional to the configured weight
        Ok(PaymentInfo {
            weight: U256::from(self.config.call_weight),
            partial_fee: U256::from(self.config.call_weight / 10),
        })
    }

    fn max_block_weight(&self) -> U256 {
        U256::from(self.config.max_block_weight)
    }
}
