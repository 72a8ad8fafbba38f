use crate::error::CoreError;
use crate::model::emotion::EmotionLevel;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Control message exchanged over the room data channel.
///
/// Wire shape is a JSON object with exactly `event` and `data`:
/// `{"event":"name","data":"Alice"}` or `{"event":"emotion","data":3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum ControlMessage {
    Name(String),
    Emotion(EmotionLevel),
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl ControlMessage {
    pub fn encode(&self) -> Result<Bytes, CoreError> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Decodes a data channel payload.
    ///
    /// Unknown `event` tags yield `Ok(None)` so newer peers can add events
    /// without breaking older ones.
    pub fn decode(payload: &[u8]) -> Result<Option<Self>, CoreError> {
        let envelope: Envelope = serde_json::from_slice(payload)?;
        let message = match envelope.event.as_str() {
            "name" => ControlMessage::Name(serde_json::from_value(envelope.data)?),
            "emotion" => ControlMessage::Emotion(serde_json::from_value(envelope.data)?),
            _ => return Ok(None),
        };
        Ok(Some(message))
    }

    pub fn event(&self) -> &'static str {
        match self {
            ControlMessage::Name(_) => "name",
            ControlMessage::Emotion(_) => "emotion",
        }
    }
}
