//! Search query protocol and result flattening.
//!
//! A query may start with a five-character scope tag:
//! `[all]` lists everything, `[exp]` searches experiments, `[als]` searches
//! analyses. Without a tag both experiments and analyses are searched by name.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ExperimentError, Result};

const TAG_LEN: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Default,
    All,
    Experiments,
    Analyses,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Default => "default",
            SearchType::All => "all",
            SearchType::Experiments => "experiments",
            SearchType::Analyses => "analyses",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "[all]" => Some(SearchType::All),
            "[exp]" => Some(SearchType::Experiments),
            "[als]" => Some(SearchType::Analyses),
            _ => None,
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for `api/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search_type: SearchType,
    pub search_string: String,
}

impl SearchQuery {
    pub const ENDPOINT: &'static str = "api/search";

    /// Parse free text typed into the search bar.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ExperimentError::Value(
                "Search query cannot be empty.".to_string(),
            ));
        }
        let tag = trimmed
            .get(..TAG_LEN)
            .map(str::to_lowercase)
            .and_then(|prefix| SearchType::from_tag(&prefix));
        Ok(match tag {
            Some(search_type) => Self {
                search_type,
                search_string: trimmed[TAG_LEN..].trim().to_string(),
            },
            None => Self {
                search_type: SearchType::Default,
                search_string: trimmed.to_string(),
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    Analysis,
    Experiment,
}

impl HitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitKind::Analysis => "analysis",
            HitKind::Experiment => "experiment",
        }
    }
}

/// One row of a search result listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub kind: HitKind,
    pub data: Value,
}

/// Raw search response: `{ experiments?: [...], analyses?: [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub experiments: Option<Vec<Value>>,
    #[serde(default)]
    pub analyses: Option<Vec<Value>>,
}

impl SearchResponse {
    /// Flatten into hits, analyses first.
    ///
    /// Analysis notes and experiment descriptions are folded into the data
    /// object so a hit can be reopened without another request.
    pub fn into_hits(self) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for analysis in self.analyses.unwrap_or_default() {
            let mut data = object_field(&analysis, "result_data");
            data.insert(
                "analysisNotes".to_string(),
                analysis.get("analysis_notes").cloned().unwrap_or(Value::Null),
            );
            data.insert(
                "experimentDescription".to_string(),
                analysis
                    .get("experiment_description")
                    .cloned()
                    .unwrap_or(Value::Null),
            );
            hits.push(SearchHit {
                id: analysis.get("analysis_id").and_then(Value::as_i64).unwrap_or_default(),
                name: string_field(&analysis, "analysis_name"),
                kind: HitKind::Analysis,
                data: Value::Object(data),
            });
        }
        for experiment in self.experiments.unwrap_or_default() {
            let mut experiment_data = object_field(&experiment, "experiment_data");
            experiment_data.insert(
                "experimentDescription".to_string(),
                experiment
                    .get("experiment_description")
                    .cloned()
                    .unwrap_or(Value::Null),
            );
            let mut data = Map::new();
            data.insert("experimentData".to_string(), Value::Object(experiment_data));
            hits.push(SearchHit {
                id: experiment
                    .get("experiment_id")
                    .and_then(Value::as_i64)
                    .unwrap_or_default(),
                name: string_field(&experiment, "experiment_name"),
                kind: HitKind::Experiment,
                data: Value::Object(data),
            });
        }
        hits
    }
}

fn object_field(value: &Value, key: &str) -> Map<String, Value> {
    value
        .get(key)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
