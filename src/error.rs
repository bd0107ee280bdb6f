use crate::catalog::Locale;

/// Error taxonomy for the sync engine.
///
/// Variants map one-to-one onto control flow: `Connection` aborts the
/// current pass, `Fetch` and `Extraction` skip the current candidate, and
/// `Write` is logged while the walk continues. Nothing here is fatal to the
/// process; a failed pass waits for its next scheduled trigger.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("store connection failed: {source}")]
    Connection {
        #[source]
        source: sqlx::Error,
    },

    #[error("fetch failed for product {id} ({locale}): {reason}")]
    Fetch {
        id: i64,
        locale: Locale,
        reason: String,
    },

    #[error("unexpected response shape ({locale}): {reason}")]
    Extraction { locale: Locale, reason: String },

    #[error("store write failed: {reason}")]
    Write { reason: String },
}
