use async_trait::async_trait;
use meshroom_core::{DeviceInfo, MediaConstraints};

use crate::error::DeviceError;
use crate::media::MediaStream;

/// Capture API of the host platform.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    /// Lists capture and output devices.
    async fn enumerate(&self) -> Result<Vec<DeviceInfo>, DeviceError>;

    /// Opens a new stream matching `constraints`.
    async fn acquire(&self, constraints: &MediaConstraints) -> Result<MediaStream, DeviceError>;
}
