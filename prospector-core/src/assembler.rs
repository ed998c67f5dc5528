//! Payload assembly: selected data + metadata + routing keys

use prospector_interfaces::{OutboundDocument, Submission, TokenResolver};
use serde_json::{Map, Value as JsonValue};

/// Key carrying the interaction UUID
pub const INTERACTION_UUID_KEY: &str = "siteInteractionUuid";

/// Key carrying the client tag
pub const CLIENT_KEY_FIELD: &str = "clientKey";

/// Client tag identifying this relay to the middleware
pub const CLIENT_KEY: &str = "prospector";

/// Merge element data over metadata.
///
/// On a key collision the element value wins and the metadata value is
/// dropped.
pub fn merge(
    element_data: Map<String, JsonValue>,
    metadata: Map<String, JsonValue>,
) -> Map<String, JsonValue> {
    let mut merged = element_data;
    for (key, value) in metadata {
        merged.entry(key).or_insert(value);
    }
    merged
}

/// Resolve tokens in every string of a value, descending into arrays and
/// objects. Non-string scalars pass through untouched.
pub fn resolve_value(
    value: JsonValue,
    resolver: &dyn TokenResolver,
    submission: &Submission,
) -> JsonValue {
    match value {
        JsonValue::String(s) => JsonValue::String(resolver.resolve(&s, submission)),
        JsonValue::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .map(|item| resolve_value(item, resolver, submission))
                .collect(),
        ),
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(key, item)| (key, resolve_value(item, resolver, submission)))
                .collect(),
        ),
        other => other,
    }
}

/// Build the document posted to the middleware.
///
/// Element data is merged over the metadata subset, tokens are resolved once
/// over the merged map, and finally the routing id and client tag are set,
/// overwriting any same-named field.
pub fn assemble(
    submission: &Submission,
    element_data: Map<String, JsonValue>,
    metadata: Map<String, JsonValue>,
    routing_id: &str,
    client_tag: &str,
    resolver: &dyn TokenResolver,
) -> OutboundDocument {
    let mut document: OutboundDocument = merge(element_data, metadata)
        .into_iter()
        .map(|(key, value)| (key, resolve_value(value, resolver, submission)))
        .collect();

    document.insert(INTERACTION_UUID_KEY.to_string(), JsonValue::String(routing_id.to_string()));
    document.insert(CLIENT_KEY_FIELD.to_string(), JsonValue::String(client_tag.to_string()));

    document
}
