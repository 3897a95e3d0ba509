//! Write acknowledgement returned by multi-object create requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response body of `POST /items` and `POST /collections`.
///
/// Each map is keyed by the index of the object in the request array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteResponse {
    /// Full objects that were written.
    #[serde(default)]
    pub successful: Map<String, Value>,

    /// Keys of the objects that were written.
    #[serde(default)]
    pub success: Map<String, Value>,

    /// Keys of objects that were already identical.
    #[serde(default)]
    pub unchanged: Map<String, Value>,

    /// Per-object failure descriptions.
    #[serde(default)]
    pub failed: Map<String, Value>,
}

impl WriteResponse {
    /// Whether the server acknowledged at least one written object.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.success.is_empty()
    }

    /// Keys of the written objects, in request order.
    #[must_use]
    pub fn written_keys(&self) -> Vec<String> {
        let mut indexed: Vec<(usize, String)> = self
            .success
            .iter()
            .filter_map(|(idx, key)| Some((idx.parse().ok()?, key.as_str()?.to_string())))
            .collect();
        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, key)| key).collect()
    }

    /// Failure messages, for logging.
    #[must_use]
    pub fn failure_messages(&self) -> Vec<String> {
        self.failed
            .values()
            .map(|f| {
                f.get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| f.to_string(), String::from)
            })
            .collect()
    }
}
