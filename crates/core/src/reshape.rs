// Response reshaping for LLM consumption
//
// Every optimize_* function drops bulky fields from a Sefaria payload and is
// idempotent: applying it to its own output changes nothing.

use serde_json::{json, Map, Value};

const TEXT_FIELDS: &[&str] = &[
    "ref",
    "versions",
    "available_versions",
    "requestedRef",
    "spanningRefs",
    "textType",
    "sectionRef",
    "he",
    "text",
    "primary_title",
];

const TOPIC_FIELDS: &[&str] = &[
    "slug",
    "titles",
    "description",
    "categoryDescription",
    "numSources",
    "primaryTitle",
    "image",
    "good_to_promote",
];

const INDEX_FIELDS: &[&str] = &[
    "title",
    "heTitle",
    "titleVariants",
    "schema",
    "categories",
    "sectionNames",
    "addressTypes",
    "length",
    "lengths",
    "textDepth",
    "primaryTitle",
    "compDate",
    "era",
    "authors",
];

/// Longest link text kept verbatim
pub const LINK_TEXT_LIMIT: usize = 500;

/// How many topic links and refs survive reshaping
pub const TOPIC_LIST_LIMIT: usize = 10;

fn retain_fields(object: &Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    object
        .iter()
        .filter(|(key, _)| fields.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn field_or_empty(object: &Map<String, Value>, key: &str) -> Value {
    object.get(key).cloned().unwrap_or_else(|| json!(""))
}

fn project(object: &Map<String, Value>, keys: &[&str]) -> Value {
    let projected: Map<String, Value> = keys
        .iter()
        .map(|key| (key.to_string(), field_or_empty(object, key)))
        .collect();
    Value::Object(projected)
}

fn project_each(entries: &Value, keys: &[&str]) -> Value {
    let projected = entries
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|item| project(item, keys))
                .collect()
        })
        .unwrap_or_default();
    Value::Array(projected)
}

/// Truncate to `limit` characters, appending `...` when anything was cut
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Reshape a `api/v3/texts` payload
pub fn optimize_text(data: &Value) -> Value {
    let Some(object) = data.as_object() else {
        return data.clone();
    };

    let mut optimized = retain_fields(object, TEXT_FIELDS);

    if let Some(versions) = optimized.get_mut("versions") {
        *versions = project_each(
            versions,
            &["text", "versionTitle", "languageFamilyName", "versionSource"],
        );
    }

    if let Some(available) = optimized.get_mut("available_versions") {
        *available = project_each(available, &["versionTitle", "languageFamilyName"]);
    }

    Value::Object(optimized)
}

/// Reshape a `api/links` payload
pub fn optimize_links(data: &Value) -> Value {
    let Some(links) = data.as_array() else {
        return data.clone();
    };

    let optimized = links
        .iter()
        .filter_map(Value::as_object)
        .map(|link| {
            let mut slim = Map::new();
            for key in ["ref", "sourceRef", "anchorText", "type", "category"] {
                slim.insert(key.to_string(), field_or_empty(link, key));
            }
            if let Some(text) = link.get("text").and_then(Value::as_str) {
                let kept = if text.chars().count() < LINK_TEXT_LIMIT {
                    text.to_string()
                } else {
                    let head: String = text.chars().take(LINK_TEXT_LIMIT).collect();
                    format!("{}...", head)
                };
                slim.insert("text".to_string(), Value::String(kept));
            }
            Value::Object(slim)
        })
        .collect();

    Value::Array(optimized)
}

/// Reshape a `api/v2/topics` payload
pub fn optimize_topics(data: &Value) -> Value {
    let Some(object) = data.as_object() else {
        return data.clone();
    };

    let mut optimized = retain_fields(object, TOPIC_FIELDS);

    if let Some(links) = object.get("links").and_then(Value::as_array) {
        let head: Vec<Value> = links.iter().take(TOPIC_LIST_LIMIT).cloned().collect();
        optimized.insert("links".to_string(), Value::Array(head));
    }

    if let Some(refs) = object.get("refs").and_then(Value::as_array) {
        let head: Vec<Value> = refs.iter().take(TOPIC_LIST_LIMIT).cloned().collect();
        optimized.insert("refs".to_string(), Value::Array(head));

        // Already-reshaped payloads keep the note computed from the full list
        let note = match object.get("refs_note") {
            Some(existing) => existing.clone(),
            None => json!(format!(
                "Showing first {} of {} total refs",
                TOPIC_LIST_LIMIT,
                refs.len()
            )),
        };
        optimized.insert("refs_note".to_string(), note);
    }

    Value::Object(optimized)
}

/// Reshape a `api/v2/raw/index` payload
pub fn optimize_index(data: &Value) -> Value {
    match data.as_object() {
        Some(object) => Value::Object(retain_fields(object, INDEX_FIELDS)),
        None => data.clone(),
    }
}

/// Collapse a texts payload into the English versions it carries
pub fn english_translations(reference: &str, data: &Value) -> Value {
    let translations = data
        .get("versions")
        .map(|versions| project_each(versions, &["versionTitle", "text"]))
        .unwrap_or_else(|| json!([]));

    json!({
        "reference": reference,
        "englishTranslations": translations,
    })
}
