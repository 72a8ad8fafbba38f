use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn other(self) -> Self {
        match self {
            MediaKind::Audio => MediaKind::Video,
            MediaKind::Video => MediaKind::Audio,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => f.write_str("audio"),
            MediaKind::Video => f.write_str("video"),
        }
    }
}

/// Device class as reported by the capture API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    AudioInput,
    VideoInput,
    AudioOutput,
}

impl DeviceKind {
    /// Capture kind for input devices, `None` for outputs.
    pub fn media_kind(self) -> Option<MediaKind> {
        match self {
            DeviceKind::AudioInput => Some(MediaKind::Audio),
            DeviceKind::VideoInput => Some(MediaKind::Video),
            DeviceKind::AudioOutput => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_id: String,
    pub kind: DeviceKind,
    pub label: String,
}

impl DeviceInfo {
    /// Splits an enumeration into `(audio inputs, video inputs)`; outputs are dropped.
    pub fn split_by_kind(devices: &[DeviceInfo]) -> (Vec<DeviceInfo>, Vec<DeviceInfo>) {
        let pick = |kind: MediaKind| {
            devices
                .iter()
                .filter(|d| d.kind.media_kind() == Some(kind))
                .cloned()
                .collect::<Vec<_>>()
        };
        (pick(MediaKind::Audio), pick(MediaKind::Video))
    }
}

/// Per-kind capture request: on/off, or an exact device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackConstraint {
    Enabled(bool),
    Device {
        #[serde(rename = "deviceId")]
        device_id: String,
    },
}

impl TrackConstraint {
    pub fn wants_track(&self) -> bool {
        !matches!(self, TrackConstraint::Enabled(false))
    }

    pub fn device_id(&self) -> Option<&str> {
        match self {
            TrackConstraint::Device { device_id } => Some(device_id),
            TrackConstraint::Enabled(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConstraints {
    pub audio: TrackConstraint,
    pub video: TrackConstraint,
}

impl MediaConstraints {
    /// Any microphone and any camera.
    pub fn any() -> Self {
        Self {
            audio: TrackConstraint::Enabled(true),
            video: TrackConstraint::Enabled(true),
        }
    }

    pub fn get(&self, kind: MediaKind) -> &TrackConstraint {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }

    /// Keeps the other kind's constraint and pins `kind` to `device_id`.
    pub fn with_device(&self, kind: MediaKind, device_id: impl Into<String>) -> Self {
        let mut next = self.clone();
        let pinned = TrackConstraint::Device {
            device_id: device_id.into(),
        };
        match kind {
            MediaKind::Audio => next.audio = pinned,
            MediaKind::Video => next.video = pinned,
        }
        next
    }
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self::any()
    }
}
