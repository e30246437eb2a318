//! Vendor wire types.
//!
//! Only the envelope fields the clients act on are modeled; result payloads
//! stay opaque `serde_json::Value`s all the way to the normalizer.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Behavioral Signals submission response.
#[derive(Debug, Deserialize)]
pub struct ProcessCreated {
    /// Process ID; the API serializes it as a number or a string
    #[serde(default, deserialize_with = "opaque_id")]
    pub pid: Option<String>,
    #[serde(default)]
    pub statusmsg: Option<String>,
}

/// Behavioral Signals status response.
#[derive(Debug, Deserialize)]
pub struct ProcessState {
    /// 0 = pending, 1 = processing, 2 = complete, negative = error
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub statusmsg: Option<String>,
}

/// Hume batch-job submission response.
#[derive(Debug, Deserialize)]
pub struct BatchJobCreated {
    #[serde(default)]
    pub job_id: Option<String>,
}

/// Hume batch-job status response.
#[derive(Debug, Deserialize)]
pub struct BatchJobState {
    #[serde(default)]
    pub state: Option<BatchState>,
}

#[derive(Debug, Deserialize)]
pub struct BatchState {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Accept an ID serialized as either a JSON string or number.
fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}
