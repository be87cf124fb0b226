use ethers::types::{Address, U256};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::info;
use tx_batcher::{
    client::{SimCall, SimClient},
    config::Config,
    types::PlanItem,
    watcher::BatchWatcher,
};

/// The main entry point for the batch planner.
///
/// This function initializes logging, loads the application configuration,
/// wires a simulated chain client into a plan watcher, logs every plan
/// revision in the background, and feeds waves of pending transfers so the
/// estimate round-trip and re-planning are observable.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging using tracing_subscriber.
    tracing_subscriber::fmt::init();

    // Load the application configuration from the specified TOML file.
    let config = Config::load("config/default.toml")?;
    info!("Batch planner starting with config: {:?}", config);

    // The simulated client answers estimates and constructs composites.
    let client = Arc::new(SimClient::new(config.chain.clone()));
    let watcher = BatchWatcher::new(client, config.planner.clone());

    // The first account pays for dry-run estimates.
    watcher.set_accounts(vec![Address::from_low_u64_be(1)]).await;

    // Log every plan revision as it is derived.
    let mut updates = watcher.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = updates.recv().await {
            match event.plan {
                Some(plan) => {
                    let singles = plan
                        .items
                        .iter()
                        .filter(|item| matches!(item, PlanItem::Single(_)))
                        .count();
                    info!(
                        "Plan revision: {} calls ({} composites, {} singles) covering {} extrinsics at batch size {}",
                        plan.len(),
                        plan.len() - singles,
                        singles,
                        plan.wrapped_len(),
                        event.batch_size
                    );
                }
                None => info!("Plan cleared (no pending extrinsics)"),
            }
        }
    });
    info!("Plan subscriber started");

    // Feed waves of pending transfers on the configured interval.
    let interval = Duration::from_millis(config.sim.interval_ms);
    let mut wave: u64 = 0;

    loop {
        sleep(interval).await;
        wave += 1;

        // Replay a recorded pending list when configured, otherwise
        // generate distinct transfers for this wave.
        let txs: Vec<SimCall> = match &config.sim.input_file {
            Some(path) => load_pending(path)?,
            None => (0..config.sim.tx_count)
                .map(|i| SimCall::Transfer {
                    to: Address::from_low_u64_be(wave * 1_000 + i as u64),
                    value: U256::from(1_000),
                })
                .collect(),
        };

        info!("Submitting wave #{} with {} pending transfers", wave, txs.len());
        watcher.set_transactions(Some(txs)).await;
    }
}

/// Load a recorded pending list from a JSON file
fn load_pending(path: &str) -> anyhow::Result<Vec<SimCall>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
