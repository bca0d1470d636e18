use serde::{Deserialize, Deserializer, Serialize};

/// Body the job search service sends with a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(
        default,
        deserialize_with = "string_detail",
        skip_serializing_if = "Option::is_none"
    )]
    pub detail: Option<String>,
}

impl ServiceErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    /// Parses an error body leniently: anything unreadable means "no detail".
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

// Validation failures from some services put a list of objects under `detail`;
// only a non-blank string is a message we can show.
fn string_detail<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    })
}
