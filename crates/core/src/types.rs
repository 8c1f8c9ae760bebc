use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which text versions to request from the v3 texts endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionLanguage {
    /// The original language version (usually Hebrew or Aramaic)
    Source,
    /// The default English translation
    English,
    /// Source and English together
    Both,
}

impl VersionLanguage {
    /// Values for the repeated `version` query parameter
    pub fn query_values(&self) -> &'static [&'static str] {
        match self {
            Self::Source => &["source"],
            Self::English => &["english"],
            Self::Both => &["english", "source"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::English => "english",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for VersionLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(Self::Source),
            "english" => Ok(Self::English),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "Unknown version language '{}', expected 'source', 'english' or 'both'",
                other
            )),
        }
    }
}

/// Request body for the `api/search-wrapper/es8` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub aggs: Vec<String>,
    pub field: String,
    pub filter_fields: Vec<Option<String>>,
    pub filters: Vec<String>,
    pub query: String,
    pub size: u32,
    pub slop: u32,
    pub sort_fields: Vec<String>,
    pub sort_method: String,
    pub sort_reverse: bool,
    pub sort_score_missing: f64,
    pub source_proj: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, filters: Vec<String>, size: u32) -> Self {
        Self {
            aggs: Vec::new(),
            field: "naive_lemmatizer".to_string(),
            filter_fields: vec![None; filters.len()],
            filters,
            query: query.into(),
            size,
            slop: 10,
            sort_fields: vec!["pagesheetrank".to_string()],
            sort_method: "score".to_string(),
            sort_reverse: false,
            sort_score_missing: 0.04,
            source_proj: true,
            kind: "text".to_string(),
        }
    }

    /// Same query with every filter removed
    pub fn without_filters(&self) -> Self {
        Self {
            filter_fields: Vec::new(),
            filters: Vec::new(),
            ..self.clone()
        }
    }
}

/// A single formatted search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "ref")]
    pub reference: String,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_correction: Option<String>,
    pub text_snippet: String,
}

/// A dictionary entry found through lexicon search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(rename = "ref")]
    pub reference: String,
    pub headword: String,
    pub lexicon_name: String,
    pub text: String,
}

/// A manuscript image prepared for an MCP image content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManuscriptImage {
    pub image_data: String,
    pub mime_type: String,
    pub size: usize,
    pub original_size: usize,
    pub was_resized: bool,
    pub filename: String,
    pub title: String,
    pub source_url: String,
}
