//! The two independent timers: full-pass re-trigger and keep-alive ping.
//!
//! They share nothing. The keep-alive task never touches sync state, and a
//! pass trigger landing mid-pass is absorbed by the orchestrator's guard.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::sync::orchestrator::Orchestrator;

/// Triggers a full pass immediately and then once per period.
pub fn spawn_sync_loop(orchestrator: Arc<Orchestrator>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            orchestrator.run_pass().await;
        }
    })
}

/// Periodically requests the service's own public URL so an
/// always-sleeping free-tier host keeps the process warm. Failures are
/// logged and ignored.
pub fn spawn_keepalive(url: String, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick fires immediately; skip it so the server
        // is listening before the first self-ping.
        ticks.tick().await;
        loop {
            ticks.tick().await;
            match client.get(&url).send().await {
                Ok(resp) => info!(status = %resp.status(), "self-ping ok"),
                Err(e) => warn!(error = %e, "self-ping failed"),
            }
        }
    })
}
