use meshroom_core::{EmotionLevel, EmotionSample, RoomId};

/// Receives emotion samples. Delivery is fire-and-forget: implementations
/// must not block and the session never looks at the outcome.
pub trait AnalyticsSink: Send + Sync {
    fn record(&self, sample: EmotionSample);
}

/// Discards every sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn record(&self, _sample: EmotionSample) {}
}

/// Builds a sample stamped with the current wall clock.
pub fn sample_now(room_id: &RoomId, name: &str, emotion: EmotionLevel) -> EmotionSample {
    EmotionSample {
        room_id: room_id.to_string(),
        name: name.to_owned(),
        time: chrono::Utc::now().timestamp_millis(),
        emotion,
    }
}
