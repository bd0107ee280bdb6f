pub mod client;
pub mod merge;
pub mod normalize;
pub mod walker;

use std::fmt;

use serde_json::Value;

/// Locale codes the upstream storefront API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Ar,
}

impl Locale {
    /// Wire value for the `lang` query parameter, also used as the key
    /// suffix for locale-specific record fields (`name_en`, `category_ar`).
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Flat single-locale view of one product, nulls already dropped.
pub type LocaleRecord = serde_json::Map<String, Value>;

/// Bilingual union of two locale records for one product.
pub type MergedRecord = serde_json::Map<String, Value>;

/// The upstream sends product IDs sometimes as numbers, sometimes as
/// strings. Accept both.
pub(crate) fn value_as_i64(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    v.as_str().and_then(|s| s.parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_parse_from_numbers_and_strings() {
        assert_eq!(value_as_i64(&json!(500168)), Some(500168));
        assert_eq!(value_as_i64(&json!("512348")), Some(512348));
        assert_eq!(value_as_i64(&json!("abc")), None);
        assert_eq!(value_as_i64(&json!(null)), None);
    }
}
