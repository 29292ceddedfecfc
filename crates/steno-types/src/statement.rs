use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_POSITION: &str = "Unknown Position";
pub const UNKNOWN_PERSON: &str = "Unknown Person";

/// One speaker's recorded remarks within a session.
///
/// Every field is optional on the wire. Absent and `null` values fall back to
/// the documented defaults through the accessors below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Role of the speaker (e.g. "Chair", "Member of Parliament")
    #[serde(default, deserialize_with = "nullable_text")]
    pub position: Option<String>,

    /// Speaker name. The API calls this field `title`.
    #[serde(default, deserialize_with = "nullable_text")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub paragraphs: Vec<String>,
}

impl Statement {
    /// Position, or `"Unknown Position"`
    pub fn position(&self) -> &str {
        self.position.as_deref().unwrap_or(UNKNOWN_POSITION)
    }

    /// Speaker name, or `"Unknown Person"`
    pub fn speaker(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN_PERSON)
    }

    /// Paragraphs joined with single spaces
    pub fn joined_paragraphs(&self) -> String {
        self.paragraphs.join(" ")
    }
}

/// Treat `null` the same as a missing list.
pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept any JSON value as text: strings as-is, other values in their JSON
/// form, `null` as absent.
pub(crate) fn nullable_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}
