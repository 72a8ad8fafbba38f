use async_trait::async_trait;
use meshroom_core::{DeviceInfo, DeviceKind, MediaConstraints, MediaKind, TrackConstraint};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::debug;

use crate::error::DeviceError;
use crate::media::{MediaDevices, MediaStream, MediaTrack};

/// In-process capture rig with a fixed device list.
pub struct VirtualDevices {
    devices: Vec<DeviceInfo>,
    deny: AtomicBool,
    acquisitions: AtomicUsize,
}

impl VirtualDevices {
    pub fn new(devices: Vec<DeviceInfo>) -> Self {
        Self {
            devices,
            deny: AtomicBool::new(false),
            acquisitions: AtomicUsize::new(0),
        }
    }

    /// One microphone, two cameras and a speaker.
    pub fn default_rig() -> Self {
        let device = |id: &str, kind, label: &str| DeviceInfo {
            device_id: id.to_owned(),
            kind,
            label: label.to_owned(),
        };
        Self::new(vec![
            device("mic1", DeviceKind::AudioInput, "Built-in Microphone"),
            device("cam1", DeviceKind::VideoInput, "Front Camera"),
            device("cam2", DeviceKind::VideoInput, "USB Camera"),
            device("spk1", DeviceKind::AudioOutput, "Speakers"),
        ])
    }

    /// Makes every following `acquire` fail with `PermissionDenied`.
    pub fn deny_permission(&self, deny: bool) {
        self.deny.store(deny, Ordering::Release);
    }

    /// Number of successful acquisitions so far.
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::Acquire)
    }

    fn open_track(
        &self,
        kind: MediaKind,
        constraint: &TrackConstraint,
    ) -> Result<Option<MediaTrack>, DeviceError> {
        if !constraint.wants_track() {
            return Ok(None);
        }

        let wanted = constraint.device_id();
        let device = self
            .devices
            .iter()
            .filter(|d| d.kind.media_kind() == Some(kind))
            .find(|d| wanted.is_none_or(|id| d.device_id == id))
            .ok_or_else(|| DeviceError::NotFound {
                kind,
                device_id: wanted.map(str::to_owned),
            })?;

        Ok(Some(MediaTrack::new(
            kind,
            Some(device.device_id.clone()),
            device.label.clone(),
        )))
    }
}

#[async_trait]
impl MediaDevices for VirtualDevices {
    async fn enumerate(&self) -> Result<Vec<DeviceInfo>, DeviceError> {
        if self.deny.load(Ordering::Acquire) {
            return Err(DeviceError::PermissionDenied);
        }
        Ok(self.devices.clone())
    }

    async fn acquire(&self, constraints: &MediaConstraints) -> Result<MediaStream, DeviceError> {
        if self.deny.load(Ordering::Acquire) {
            return Err(DeviceError::PermissionDenied);
        }
        if !constraints.audio.wants_track() && !constraints.video.wants_track() {
            return Err(DeviceError::Unsatisfiable(
                "at least one of audio or video must be requested".into(),
            ));
        }

        let mut tracks = Vec::new();
        for kind in [MediaKind::Audio, MediaKind::Video] {
            if let Some(track) = self.open_track(kind, constraints.get(kind))? {
                tracks.push(track);
            }
        }

        self.acquisitions.fetch_add(1, Ordering::AcqRel);
        let stream = MediaStream::new(tracks);
        debug!("Virtual capture opened stream {}", stream.id());
        Ok(stream)
    }
}
