//! Read-only client for the upstream storefront API.
//!
//! Two endpoints are consumed: the per-product relevance detail endpoint
//! (one call per candidate ID and locale) and the batch product listing
//! used by discovery mode. The wire format is fixed by the provider; the
//! store context (store id, coordinates, display currency) is baked into
//! every request because pricing and availability are resolved against a
//! concrete store location.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::catalog::{value_as_i64, Locale};
use crate::config::ClientConfig;
use crate::error::SyncError;

const HOST: &str = "www.carrefouregypt.com";
const STORE_ID: &str = "mafegy";
const LATITUDE: &str = "29.967909028696003";
const LONGITUDE: &str = "31.266225954206813";
const CURRENCY: &str = "EGP";
const PLACEMENTS: &str = "personal_page.echo_seed|item_page.frequently_bought_together_web";

const RETRY_DELAY: Duration = Duration::from_secs(1);

fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: Client,
    retries: u32,
}

impl CatalogClient {
    pub fn new(cfg: &ClientConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent("carfure/0.1")
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            http,
            retries: cfg.retries,
        })
    }

    fn detail_url(&self, id: i64) -> String {
        format!("{}/api/v4/relevance/products/{}", self.base_url, id)
    }

    fn list_url(&self) -> String {
        format!("{}/api/v4/products", self.base_url)
    }

    /// One locale-parameterized detail request for a single candidate ID.
    ///
    /// Transient failures are retried a small fixed number of times with a
    /// fixed delay; whatever survives the retries surfaces as
    /// `SyncError::Fetch` and the caller decides skip policy. 4xx responses
    /// are not retried.
    pub async fn fetch_detail(&self, id: i64, locale: Locale) -> Result<Value, SyncError> {
        let url = self.detail_url(id);
        let mut last_err = String::new();

        for attempt in 0..=self.retries {
            if attempt > 0 {
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let resp = self
                .http
                .get(&url)
                .header("Host", HOST)
                .header("Storeid", STORE_ID)
                .query(&[
                    ("lang", locale.code()),
                    ("placements", PLACEMENTS),
                    ("displayCurr", CURRENCY),
                    ("latitude", LATITUDE),
                    ("longitude", LONGITUDE),
                ])
                .send()
                .await;

            match resp {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.json::<Value>().await.map_err(|e| SyncError::Fetch {
                            id,
                            locale,
                            reason: format!("invalid json body: {e}"),
                        });
                    }
                    let body = truncate_for_log(&resp.text().await.unwrap_or_default(), 300);
                    last_err = format!("status {status} body={body}");
                    if status.is_client_error() {
                        break;
                    }
                }
                Err(e) => last_err = e.to_string(),
            }
        }

        Err(SyncError::Fetch {
            id,
            locale,
            reason: last_err,
        })
    }

    /// Batch listing request used by discovery mode. Returns only the IDs
    /// the upstream resolved to real catalog entries. A failed batch is
    /// logged and yields an empty set so discovery keeps moving.
    pub async fn fetch_id_batch(&self, ids: &[i64]) -> Vec<i64> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let resp = self
            .http
            .get(self.list_url())
            .header("Host", HOST)
            .header("Storeid", STORE_ID)
            .query(&[
                ("ids", joined.as_str()),
                ("lang", Locale::En.code()),
                ("displayCurr", CURRENCY),
                ("latitude", LATITUDE),
                ("longitude", LONGITUDE),
            ])
            .send()
            .await;

        let body = match resp {
            Ok(resp) if resp.status().is_success() => match resp.json::<Value>().await {
                Ok(v) => v,
                Err(e) => {
                    warn!(error = %e, "discovery batch returned invalid json");
                    return Vec::new();
                }
            },
            Ok(resp) => {
                warn!(status = %resp.status(), "discovery batch request rejected");
                return Vec::new();
            }
            Err(e) => {
                warn!(error = %e, "discovery batch request failed");
                return Vec::new();
            }
        };

        resolved_ids(&body)
    }
}

/// Pulls the resolved product IDs out of a batch listing response.
fn resolved_ids(body: &Value) -> Vec<i64> {
    let Some(products) = body.pointer("/data/products").and_then(Value::as_array) else {
        return Vec::new();
    };
    products
        .iter()
        .filter_map(|p| p.get("id"))
        .filter_map(value_as_i64)
        .collect()
}
