use crate::model::emotion::EmotionLevel;
use serde::{Deserialize, Serialize};

/// One emotion change, as posted to the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionSample {
    pub room_id: String,
    pub name: String,
    /// Milliseconds since the Unix epoch.
    pub time: i64,
    pub emotion: EmotionLevel,
}
