use meshroom_core::{MediaConstraints, MediaKind};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::DeviceError;
use crate::media::{MediaDevices, MediaStream};

/// Owner of the local capture stream and of its per-kind enabled flags.
///
/// Exactly one stream is live at a time: installing a new one stops the
/// previous one, and the sticky enabled flags are applied to the new stream
/// before it is handed to anybody else.
pub struct LocalSession {
    devices: Arc<dyn MediaDevices>,
    stream: Option<Arc<MediaStream>>,
    constraints: MediaConstraints,

    /// Device selection including switches still being acquired.
    selected: MediaConstraints,

    audio_enabled: bool,
    video_enabled: bool,
}

impl LocalSession {
    pub fn new(devices: Arc<dyn MediaDevices>) -> Self {
        Self {
            devices,
            stream: None,
            constraints: MediaConstraints::any(),
            selected: MediaConstraints::any(),
            audio_enabled: true,
            video_enabled: true,
        }
    }

    pub fn devices(&self) -> Arc<dyn MediaDevices> {
        Arc::clone(&self.devices)
    }

    pub fn stream(&self) -> Option<&Arc<MediaStream>> {
        self.stream.as_ref()
    }

    /// Constraints the current stream was opened with.
    pub fn constraints(&self) -> &MediaConstraints {
        &self.constraints
    }

    pub fn is_enabled(&self, kind: MediaKind) -> bool {
        match kind {
            MediaKind::Audio => self.audio_enabled,
            MediaKind::Video => self.video_enabled,
        }
    }

    /// Opens a stream and makes it the owned one.
    pub async fn acquire(
        &mut self,
        constraints: MediaConstraints,
    ) -> Result<Arc<MediaStream>, DeviceError> {
        let stream = self.devices.acquire(&constraints).await?;
        self.selected = constraints.clone();
        Ok(self.install(stream, constraints))
    }

    /// Adopts an already opened stream, replacing and stopping the old one.
    pub fn install(&mut self, stream: MediaStream, constraints: MediaConstraints) -> Arc<MediaStream> {
        stream.set_kind_enabled(MediaKind::Audio, self.audio_enabled);
        stream.set_kind_enabled(MediaKind::Video, self.video_enabled);

        let stream = Arc::new(stream);
        if let Some(old) = self.stream.replace(Arc::clone(&stream)) {
            old.stop();
            debug!("Released local stream {}", old.id());
        }
        self.constraints = constraints;

        info!(
            "Local stream {} installed (audio: {}, video: {})",
            stream.id(),
            self.audio_enabled,
            self.video_enabled
        );
        stream
    }

    /// Sets the enabled flag of every `kind` track. No-op without a stream.
    pub fn set_enabled(&mut self, kind: MediaKind, enabled: bool) {
        let Some(stream) = &self.stream else {
            return;
        };
        stream.set_kind_enabled(kind, enabled);
        match kind {
            MediaKind::Audio => self.audio_enabled = enabled,
            MediaKind::Video => self.video_enabled = enabled,
        }
        debug!("Local {} enabled: {}", kind, enabled);
    }

    /// Flips the enabled flag of `kind` and returns the new value.
    pub fn toggle(&mut self, kind: MediaKind) -> bool {
        let next = !self.is_enabled(kind);
        self.set_enabled(kind, next);
        self.is_enabled(kind)
    }

    /// Records a switch of `kind` to `device_id` on top of the switches
    /// already selected, and returns the constraints to acquire.
    pub fn select_device(&mut self, kind: MediaKind, device_id: &str) -> MediaConstraints {
        self.selected = self.selected.with_device(kind, device_id);
        self.selected.clone()
    }

    /// Selection waiting to be acquired, or the installed constraints.
    pub fn selected(&self) -> &MediaConstraints {
        &self.selected
    }

    /// Drops selections that will never be installed.
    pub fn reset_selection(&mut self) {
        self.selected = self.constraints.clone();
    }

    /// Reopens capture on a different device for `kind`.
    ///
    /// The caller is responsible for pushing the returned stream to the room.
    pub async fn replace_device(
        &mut self,
        kind: MediaKind,
        device_id: &str,
    ) -> Result<Arc<MediaStream>, DeviceError> {
        let constraints = self.select_device(kind, device_id);
        let result = self.acquire(constraints).await;
        if result.is_err() {
            self.reset_selection();
        }
        result
    }

    /// Stops and forgets the owned stream.
    pub fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop();
        }
    }
}

impl Drop for LocalSession {
    fn drop(&mut self) {
        self.release();
    }
}
