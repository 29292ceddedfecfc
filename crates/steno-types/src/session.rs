use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::statement::{Statement, nullable_text, nullable_vec};
use crate::{Error, Result};

pub const NO_TITLE: &str = "No Title";
pub const NO_DATE: &str = "No Date";

// --- Remote API schemas ---

/// Per-date summary served at `{base}/{date}/index.json`.
///
/// Only `statementCount` is consumed; it drives pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIndex {
    #[serde(default, deserialize_with = "nullable_count")]
    pub statement_count: u64,
}

/// One page of statements served at `{base}/{date}/steno/{batch}.json`.
///
/// Statements stay as raw JSON so the aggregate keeps every field the API sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementBatch {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub session_statements: Vec<Value>,
}

/// Aggregate of all batches fetched for one date, as written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDump {
    pub session_statements: Vec<Value>,
}

impl SessionDump {
    pub fn extend(&mut self, batch: StatementBatch) {
        self.session_statements.extend(batch.session_statements);
    }

    pub fn len(&self) -> usize {
        self.session_statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.session_statements.is_empty()
    }
}

// --- On-disk session record ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParlSession {
    #[serde(default, deserialize_with = "nullable_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable_text")]
    pub date: Option<String>,
}

/// A session as read by the normalizer.
///
/// Aggregates written by the fetcher only carry `sessionStatements`; augmented
/// inputs also carry `parlSession` and the two counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub parl_session: Option<ParlSession>,

    #[serde(default, deserialize_with = "nullable_count")]
    pub statement_count: u64,

    #[serde(default, deserialize_with = "nullable_count")]
    pub person_count: u64,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub session_statements: Vec<Statement>,
}

impl SessionRecord {
    /// Parse a session file body: a bare record, or a list whose first
    /// element is the record. Later list elements are never inspected; an
    /// empty list yields a record with every field defaulted.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_document(document)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_document(document: Value) -> Result<Self> {
        let record = match document {
            Value::Array(items) => match items.into_iter().next() {
                Some(first) => first,
                None => return Ok(Self::default()),
            },
            other => other,
        };

        // Serde would otherwise read a JSON array as positional fields.
        if !record.is_object() {
            return Err(Error::Shape(format!(
                "expected a session object, found {}",
                kind(&record)
            )));
        }

        Ok(Self::deserialize(record)?)
    }

    /// Session title, or `"No Title"`
    pub fn title(&self) -> &str {
        self.parl_session
            .as_ref()
            .and_then(|s| s.title.as_deref())
            .unwrap_or(NO_TITLE)
    }

    /// Session date as given by the source, or `"No Date"`
    pub fn date(&self) -> &str {
        self.parl_session
            .as_ref()
            .and_then(|s| s.date.as_deref())
            .unwrap_or(NO_DATE)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn nullable_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}
