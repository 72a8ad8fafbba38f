mod analytics_sink;
#[cfg(feature = "http-analytics")]
mod http_sink;

pub use analytics_sink::*;
#[cfg(feature = "http-analytics")]
pub use http_sink::*;

use std::sync::Arc;

use crate::config::SessionConfig;

/// Sink configured by `analytics_endpoint`, or a no-op one.
pub fn sink_for(config: &SessionConfig) -> Arc<dyn AnalyticsSink> {
    match &config.analytics_endpoint {
        #[cfg(feature = "http-analytics")]
        Some(endpoint) => Arc::new(HttpAnalyticsSink::new(endpoint.clone())),
        #[cfg(not(feature = "http-analytics"))]
        Some(endpoint) => {
            tracing::warn!(
                "Analytics endpoint {} ignored: built without http-analytics",
                endpoint
            );
            Arc::new(NoopAnalytics)
        }
        None => Arc::new(NoopAnalytics),
    }
}
