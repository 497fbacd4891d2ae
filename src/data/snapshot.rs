//! Snapshot types decoded from the `/metrics` endpoint.
//!
//! Every field is optional on the wire. Decoding is lenient about value
//! types: a counter that is not a non-negative integer is treated as
//! missing, and a timestamp that is neither a number nor a string is
//! treated as absent. A body that is not JSON, or whose top level is not
//! an object, fails to decode (see [`MetricsSnapshot::from_slice`]).

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::timestamp::Timestamp;

/// One decoded response of the metrics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsSnapshot {
    #[serde(deserialize_with = "lenient_count")]
    pub clicks_received: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub page_views_received: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub page_views_emitted: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub page_views_updated: Option<u64>,

    #[serde(deserialize_with = "lenient_count")]
    pub click_state_size: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub page_view_state_size: Option<u64>,

    #[serde(deserialize_with = "lenient_timestamp")]
    pub last_updated_at: Option<Timestamp>,

    /// Per-partition watermarks, in the order the backend delivered them.
    #[serde(deserialize_with = "lenient_rows")]
    pub join_watermarks: Vec<WatermarkRow>,
}

impl MetricsSnapshot {
    /// Decode a raw `/metrics` response body.
    ///
    /// The top level must be a JSON object. Arrays, scalars and `null` are
    /// rejected rather than mapped onto fields by position.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        match serde_json::from_slice::<Value>(body)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            other => Err(serde_json::Error::custom(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Watermark progress for one stream partition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WatermarkRow {
    #[serde(deserialize_with = "lenient_partition")]
    pub partition: Option<Partition>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub page_views_max_event_time: Option<Timestamp>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub ad_clicks_max_event_time: Option<Timestamp>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub join_watermark: Option<Timestamp>,
}

/// Opaque partition identifier, displayed exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Partition {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Number(n) => write!(f, "{}", n),
            Partition::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Partition {
    fn from(n: i64) -> Self {
        Partition::Number(n.into())
    }
}

impl From<&str> for Partition {
    fn from(s: &str) -> Self {
        Partition::Text(s.to_string())
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().map(Timestamp::Millis),
        Some(Value::String(s)) => Some(Timestamp::Text(s)),
        _ => None,
    })
}

fn lenient_partition<'de, D>(deserializer: D) -> Result<Option<Partition>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(Partition::Number(n)),
        Some(Value::String(s)) => Some(Partition::Text(s)),
        Some(other) => Some(Partition::Text(other.to_string())),
    })
}

fn lenient_rows<'de, D>(deserializer: D) -> Result<Vec<WatermarkRow>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
            _ => WatermarkRow::default(),
        })
        .collect())
}
