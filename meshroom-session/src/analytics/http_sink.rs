use meshroom_core::EmotionSample;
use tokio::runtime::Handle;
use tracing::debug;

use crate::analytics::AnalyticsSink;

/// Posts samples as JSON to an HTTP endpoint on a background task.
#[derive(Clone)]
pub struct HttpAnalyticsSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalyticsSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AnalyticsSink for HttpAnalyticsSink {
    fn record(&self, sample: EmotionSample) {
        let Ok(runtime) = Handle::try_current() else {
            debug!("No runtime to post analytics sample, dropping it");
            return;
        };

        let request = self.client.post(&self.endpoint).json(&sample);
        runtime.spawn(async move {
            match request.send().await {
                Ok(response) => debug!("Analytics sample posted: {}", response.status()),
                Err(e) => debug!("Analytics sample dropped: {}", e),
            }
        });
    }
}
