use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use carfure::api::server::ApiServer;
use carfure::catalog::client::CatalogClient;
use carfure::config::Config;
use carfure::logging;
use carfure::store::db::Db;
use carfure::sync::orchestrator::Orchestrator;
use carfure::sync::progress::Progress;
use carfure::sync::scheduler;

#[actix_web::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env()?;
    logging::init_tracing("info,sqlx=warn")?;

    let db = Db::connect_lazy(&cfg.database_url, 5).context("invalid DATABASE_URL")?;
    let client = CatalogClient::new(&cfg.client)?;
    let progress = Arc::new(Progress::new());

    let orchestrator = Arc::new(Orchestrator::new(
        db,
        client,
        cfg.sync.clone(),
        progress.clone(),
    ));
    let _sync_task = scheduler::spawn_sync_loop(orchestrator, cfg.sync.pass_interval);

    let _keepalive_task = match cfg.keepalive.clone() {
        Some(keepalive) => Some(scheduler::spawn_keepalive(keepalive.url, keepalive.period)),
        None => {
            warn!("KEEPALIVE_URL not set; the host may idle the service");
            None
        }
    };

    info!(mode = ?cfg.sync.mode, "carfure starting");
    ApiServer {
        host: cfg.api_host.clone(),
        port: cfg.api_port,
    }
    .run(progress)
    .await
}
