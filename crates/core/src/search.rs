// Search payload formatting

use crate::reshape::truncate_chars;
use crate::types::{DictionaryEntry, SearchResult};
use serde_json::Value;

/// Dictionary search paths and the names they are presented under
pub const LEXICONS: &[(&str, &str)] = &[
    ("Reference/Dictionary/Jastrow", "Jastrow Dictionary"),
    ("Reference/Dictionary/Klein Dictionary", "Klein Dictionary"),
    ("Reference/Dictionary/BDB", "BDB Dictionary"),
    ("Reference/Dictionary/BDB Aramaic", "BDB Aramaic Dictionary"),
    (
        "Reference/Encyclopedic Works/Kovetz Yesodot VaChakirot",
        "Kovetz Yesodot VaChakirot",
    ),
];

/// Default result count for dictionary lookups
pub const DICTIONARY_RESULT_SIZE: u32 = 8;

/// Snippet length used when a hit carries no highlight
pub const SNIPPET_LIMIT: usize = 300;

pub const FILTER_CORRECTION: &str = "Removed filters due to no results";

static MISSING: Value = Value::Null;

/// Search filters covering every known lexicon
pub fn lexicon_filters() -> Vec<String> {
    LEXICONS.iter().map(|(path, _)| path.to_string()).collect()
}

/// Display name of the lexicon stored under `path`
pub fn lexicon_name(path: &str) -> Option<&'static str> {
    LEXICONS
        .iter()
        .find(|(known, _)| *known == path)
        .map(|(_, name)| *name)
}

fn hits(response: &Value) -> &[Value] {
    response
        .get("hits")
        .and_then(|hits| hits.get("hits"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Whether a search response contains at least one hit
pub fn has_hits(response: &Value) -> bool {
    !hits(response).is_empty()
}

/// Total hit count, accepting both `{"value": n}` and bare-number forms
pub fn total_hits(response: &Value) -> u64 {
    match response.get("hits").and_then(|hits| hits.get("total")) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::Object(total)) => total.get("value").and_then(Value::as_u64).unwrap_or(0),
        _ => 0,
    }
}

fn snippet(hit: &Value, source: &Value) -> String {
    if let Some(highlight) = hit.get("highlight").and_then(Value::as_object) {
        for fragments in highlight.values() {
            let parts: Vec<&str> = fragments
                .as_array()
                .map(|items| items.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            if !parts.is_empty() {
                return parts.join(" [...] ");
            }
        }
    }

    ["naive_lemmatizer", "exact"]
        .iter()
        .filter_map(|field| source.get(*field).and_then(Value::as_str))
        .find(|content| !content.is_empty())
        .map(|content| truncate_chars(content, SNIPPET_LIMIT))
        .unwrap_or_default()
}

/// Format raw search hits.
///
/// `filters_dropped` marks a fallback search that ran without the
/// `requested_filters`; each result then records the correction.
pub fn format_hits(
    response: &Value,
    requested_filters: &[String],
    filters_dropped: bool,
) -> Vec<SearchResult> {
    let corrected = filters_dropped && !requested_filters.is_empty();

    hits(response)
        .iter()
        .map(|hit| {
            let source = hit.get("_source").unwrap_or(&MISSING);
            let categories = source
                .get("categories")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            SearchResult {
                reference: source
                    .get("ref")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                categories,
                original_filter: corrected.then(|| requested_filters.to_vec()),
                filter_correction: corrected.then(|| FILTER_CORRECTION.to_string()),
                text_snippet: snippet(hit, source),
            }
        })
        .collect()
}

/// Map lexicon search hits to dictionary entries
pub fn dictionary_entries(response: &Value) -> Vec<DictionaryEntry> {
    hits(response)
        .iter()
        .filter_map(|hit| {
            let source = hit.get("_source")?;
            let path = source.get("path").and_then(Value::as_str)?;
            let Some(lexicon) = lexicon_name(path) else {
                tracing::debug!(path, "Skipping hit outside known lexicons");
                return None;
            };
            let headword = source
                .get("titleVariants")
                .and_then(Value::as_array)
                .and_then(|variants| variants.first())
                .and_then(Value::as_str)?;

            Some(DictionaryEntry {
                reference: source
                    .get("ref")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                headword: headword.to_string(),
                lexicon_name: lexicon.to_string(),
                text: source
                    .get("exact")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(hits: Value) -> Value {
        json!({"hits": {"total": {"value": 2, "relation": "eq"}, "hits": hits}})
    }

    #[test]
    fn test_has_hits() {
        assert!(!has_hits(&json!({})));
        assert!(!has_hits(&response(json!([]))));
        assert!(has_hits(&response(json!([{"_source": {}}]))));
    }

    #[test]
    fn test_total_hits_formats() {
        assert_eq!(total_hits(&response(json!([]))), 2);
        assert_eq!(total_hits(&json!({"hits": {"total": 7, "hits": []}})), 7);
        assert_eq!(total_hits(&json!({})), 0);
    }

    #[test]
    fn test_format_hits_prefers_highlight() {
        let data = response(json!([{
            "_source": {"ref": "Exodus 20:8", "categories": ["Tanakh", "Torah"], "exact": "Remember the sabbath day"},
            "highlight": {"naive_lemmatizer": ["Remember the <b>sabbath</b>", "keep it <b>holy</b>"]}
        }]));

        let results = format_hits(&data, &[], false);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].reference, "Exodus 20:8");
        assert_eq!(results[0].categories, vec!["Tanakh", "Torah"]);
        assert_eq!(
            results[0].text_snippet,
            "Remember the <b>sabbath</b> [...] keep it <b>holy</b>"
        );
        assert!(results[0].filter_correction.is_none());
    }

    #[test]
    fn test_format_hits_falls_back_to_source_text() {
        let long = "ל".repeat(400);
        let data = response(json!([
            {"_source": {"ref": "A 1", "naive_lemmatizer": "", "exact": "plain text"}, "highlight": {"exact": []}},
            {"_source": {"ref": "B 2", "naive_lemmatizer": long}}
        ]));

        let results = format_hits(&data, &[], false);

        assert_eq!(results[0].text_snippet, "plain text");
        assert_eq!(results[1].text_snippet.chars().count(), SNIPPET_LIMIT + 3);
        assert!(results[1].text_snippet.ends_with("..."));
    }

    #[test]
    fn test_format_hits_records_filter_correction() {
        let data = response(json!([{"_source": {"ref": "Berakhot 2a", "categories": ["Talmud"]}}]));
        let filters = vec!["Tanakh/Torah/Genesis".to_string()];

        let results = format_hits(&data, &filters, true);

        assert_eq!(results[0].original_filter, Some(filters.clone()));
        assert_eq!(results[0].filter_correction.as_deref(), Some(FILTER_CORRECTION));
        assert_eq!(results[0].text_snippet, "");
    }

    #[test]
    fn test_format_hits_without_hits() {
        assert!(format_hits(&json!({"error": "boom"}), &[], false).is_empty());
    }

    #[test]
    fn test_dictionary_entries() {
        let data = response(json!([
            {"_source": {"ref": "Jastrow, שבת", "titleVariants": ["שַׁבָּת"], "path": "Reference/Dictionary/Jastrow", "exact": "Sabbath"}},
            {"_source": {"ref": "Other", "titleVariants": ["x"], "path": "Tanakh/Torah", "exact": "no"}},
            {"_source": {"ref": "Klein", "titleVariants": [], "path": "Reference/Dictionary/Klein Dictionary"}}
        ]));

        let entries = dictionary_entries(&data);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].headword, "שַׁבָּת");
        assert_eq!(entries[0].lexicon_name, "Jastrow Dictionary");
        assert_eq!(entries[0].text, "Sabbath");
    }

    #[test]
    fn test_lexicon_lookup() {
        assert_eq!(lexicon_filters().len(), 5);
        assert_eq!(lexicon_name("Reference/Dictionary/BDB"), Some("BDB Dictionary"));
        assert_eq!(lexicon_name("Reference/Dictionary"), None);
    }
}
