use meshroom_core::{EmotionLevel, PeerId};
use std::sync::Arc;

use crate::media::MediaStream;

/// Rendering surface notified by the room session.
///
/// Implementations decide how peers are shown; the session only reports
/// what changed.
pub trait RoomView: Send + Sync {
    /// Free-form status line ("You joined", "peer left", ...).
    fn notice(&self, text: &str);

    /// Local name and emotion changed.
    fn show_local(&self, name: &str, emotion: EmotionLevel);

    /// Show `stream` for `peer_id`, captioned with `label`.
    fn attach(&self, peer_id: &PeerId, stream: &Arc<MediaStream>, label: &str);

    fn detach(&self, peer_id: &PeerId);

    /// Re-caption an attached peer.
    fn rename(&self, peer_id: &PeerId, name: &str);

    /// Transient emotion indicator of a remote peer.
    fn show_emotion(&self, _peer_id: &PeerId, _emotion: EmotionLevel) {}
}
