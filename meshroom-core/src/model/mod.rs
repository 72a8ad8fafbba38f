mod control;
mod emotion;
mod media;
mod peer;
mod room;
mod sample;

pub use control::ControlMessage;
pub use emotion::{EmotionDelta, EmotionLevel};
pub use media::{DeviceInfo, DeviceKind, MediaConstraints, MediaKind, TrackConstraint};
pub use peer::PeerId;
pub use room::RoomId;
pub use sample::EmotionSample;
