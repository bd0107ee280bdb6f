//! Bilingual merge of the two locale views of one product.

use crate::catalog::{LocaleRecord, MergedRecord};

/// Combines the "en" and "ar" records for one product.
///
/// Both locales must have resolved for the candidate to count as processed;
/// if either side is absent the merge yields `None` and nothing is written.
///
/// The merge starts from the "en" record and overlays every "ar" key.
/// Locale-specific keys were suffixed during normalization so they never
/// collide. Neutral keys (price, availability, stock, URLs, photos) end up
/// with the "ar" response's value: both locales are expected to compute the
/// same value, and divergence is not reconciled — the overlay silently
/// wins. Known limitation carried over from the source system.
pub fn merge(en: Option<LocaleRecord>, ar: Option<LocaleRecord>) -> Option<MergedRecord> {
    let (mut merged, overlay) = match (en, ar) {
        (Some(en), Some(ar)) => (en, ar),
        _ => return None,
    };
    for (key, value) in overlay {
        merged.insert(key, value);
    }
    Some(merged)
}
