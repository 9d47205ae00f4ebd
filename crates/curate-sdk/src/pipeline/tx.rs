//! Transaction hash normalization

use serde_json::Value;

/// Extract a transaction hash from a provider result
///
/// Providers resolve either to a bare hash string or to a receipt-like object
/// with a `hash` field. Any other shape, and an empty hash, means no hash was
/// obtained.
pub fn normalize_tx_hash(result: &Value) -> Option<String> {
    let hash = match result {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("hash")?.as_str()?,
        _ => return None,
    };

    let hash = hash.trim();
    if hash.is_empty() {
        None
    } else {
        Some(hash.to_string())
    }
}
