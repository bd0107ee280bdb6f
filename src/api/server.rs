// Status endpoint server using actix-web

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

use crate::api::handlers;
use crate::sync::progress::Progress;

pub struct ApiServer {
    pub host: String,
    pub port: u16,
}

impl ApiServer {
    /// Start the HTTP status server on the calling task.
    pub async fn run(self, progress: Arc<Progress>) -> Result<()> {
        let bind_addr = format!("{}:{}", self.host, self.port);
        tracing::info!(addr = %bind_addr, "starting status server");

        let progress = web::Data::new(progress);
        HttpServer::new(move || {
            App::new()
                .app_data(progress.clone())
                .route("/", web::get().to(handlers::status))
                .route("/update-products", web::get().to(handlers::status))
        })
        .bind(&bind_addr)
        .with_context(|| format!("failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("status server error")?;

        Ok(())
    }
}
