//! Field selection: which submission values may leave the system

use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;

/// Metadata keys that always accompany a delivery.
///
/// `hostIp`, `clientIp` and `postDate` are not produced by every form
/// system; they are forwarded whenever present.
pub const DEFAULT_METADATA_KEYS: [&str; 6] = [
    "webform_id",
    "remote_addr",
    "hostIp",
    "uri",
    "clientIp",
    "postDate",
];

/// Keep only the entries of `full_data` whose key is in `allow_list`.
///
/// Allow-listed keys absent from `full_data` are ignored. An empty allow-list
/// yields an empty map.
pub fn select<'a, I>(full_data: &Map<String, JsonValue>, allow_list: I) -> Map<String, JsonValue>
where
    I: IntoIterator<Item = &'a str>,
{
    let allowed: HashSet<&str> = allow_list.into_iter().collect();
    if allowed.is_empty() {
        return Map::new();
    }

    full_data
        .iter()
        .filter(|(key, _)| allowed.contains(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// The fixed metadata subset of a submission
pub fn select_metadata(metadata: &Map<String, JsonValue>) -> Map<String, JsonValue> {
    select(metadata, DEFAULT_METADATA_KEYS)
}
