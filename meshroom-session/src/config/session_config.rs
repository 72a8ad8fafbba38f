use meshroom_core::MediaConstraints;
use meshroom_core::utils::DEFAULT_EVENT_BUFFER;
use std::time::Duration;

/// Settings for a participant and the room sessions it opens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name announced to peers.
    pub display_name: String,

    /// Constraints for the first capture.
    pub initial_constraints: MediaConstraints,

    /// Give up on a join that the transport never acknowledges.
    /// `None` leaves the session in `Joining` indefinitely.
    pub join_timeout: Option<Duration>,

    /// Reset the local emotion to neutral when the room opens.
    pub reset_emotion_on_open: bool,

    /// Capacity of the room event channel handed to the transport.
    pub event_buffer: usize,

    /// Endpoint receiving emotion samples, if any.
    pub analytics_endpoint: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            initial_constraints: MediaConstraints::any(),
            join_timeout: None,
            reset_emotion_on_open: true,
            event_buffer: DEFAULT_EVENT_BUFFER,
            analytics_endpoint: None,
        }
    }
}

impl SessionConfig {
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_join_timeout(mut self, timeout: Duration) -> Self {
        self.join_timeout = Some(timeout);
        self
    }
}
