use meshroom_core::{EmotionLevel, PeerId};
use std::sync::Arc;
use tracing::info;

use crate::media::MediaStream;
use crate::view::RoomView;

/// Headless view that reports every change through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingView;

impl RoomView for TracingView {
    fn notice(&self, text: &str) {
        info!("{}", text);
    }

    fn show_local(&self, name: &str, emotion: EmotionLevel) {
        info!("Local: {} [{}] {}", name, emotion.value(), emotion.label());
    }

    fn attach(&self, peer_id: &PeerId, stream: &Arc<MediaStream>, label: &str) {
        info!(
            "Attached stream {} of {} ({}), {} track(s)",
            stream.id(),
            peer_id,
            label,
            stream.tracks().len()
        );
    }

    fn detach(&self, peer_id: &PeerId) {
        info!("Detached {}", peer_id);
    }

    fn rename(&self, peer_id: &PeerId, name: &str) {
        info!("{} is now {}", peer_id, name);
    }

    fn show_emotion(&self, peer_id: &PeerId, emotion: EmotionLevel) {
        info!("{} feels [{}] {}", peer_id, emotion.value(), emotion.label());
    }
}
