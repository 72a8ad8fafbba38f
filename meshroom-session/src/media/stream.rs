use meshroom_core::{MediaKind, PeerId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// A single capture track. The enabled flag is written only by
/// [`LocalSession`](crate::media::LocalSession).
#[derive(Debug)]
pub struct MediaTrack {
    id: String,
    kind: MediaKind,
    device_id: Option<String>,
    label: String,
    enabled: AtomicBool,
    live: AtomicBool,
}

impl MediaTrack {
    pub fn new(kind: MediaKind, device_id: Option<String>, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            device_id,
            label: label.into(),
            enabled: AtomicBool::new(true),
            live: AtomicBool::new(true),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Live and enabled: the track is actually producing media.
    pub fn is_active(&self) -> bool {
        self.is_live() && self.is_enabled()
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    pub(crate) fn stop(&self) {
        self.live.store(false, Ordering::Release);
    }
}

/// A set of tracks, optionally tagged with the peer it came from.
#[derive(Debug)]
pub struct MediaStream {
    id: String,
    peer_id: Option<PeerId>,
    tracks: Vec<Arc<MediaTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<MediaTrack>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            peer_id: None,
            tracks: tracks.into_iter().map(Arc::new).collect(),
        }
    }

    /// The same tracks as seen by remote peers, tagged with their origin.
    pub fn remote_view(&self, origin: PeerId) -> Self {
        Self {
            id: self.id.clone(),
            peer_id: Some(origin),
            tracks: self.tracks.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Originating peer for streams received from the room.
    pub fn peer_id(&self) -> Option<&PeerId> {
        self.peer_id.as_ref()
    }

    pub fn tracks(&self) -> &[Arc<MediaTrack>] {
        &self.tracks
    }

    pub fn tracks_of(&self, kind: MediaKind) -> impl Iterator<Item = &Arc<MediaTrack>> {
        self.tracks.iter().filter(move |t| t.kind() == kind)
    }

    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(|t| t.is_live())
    }

    pub(crate) fn set_kind_enabled(&self, kind: MediaKind, enabled: bool) {
        for track in self.tracks_of(kind) {
            track.set_enabled(enabled);
        }
    }

    pub(crate) fn stop(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}
