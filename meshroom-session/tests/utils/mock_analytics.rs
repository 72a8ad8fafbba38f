use meshroom_core::EmotionSample;
use meshroom_session::AnalyticsSink;
use std::sync::{Arc, Mutex};

/// Analytics sink that keeps every sample in memory.
#[derive(Clone, Default)]
pub struct RecordingAnalytics {
    samples: Arc<Mutex<Vec<EmotionSample>>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> Vec<EmotionSample> {
        self.samples.lock().unwrap().clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn record(&self, sample: EmotionSample) {
        self.samples.lock().unwrap().push(sample);
    }
}
