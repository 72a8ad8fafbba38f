use meshroom_core::{EmotionDelta, MediaKind};

/// User actions fed into a running [`Participant`](crate::participant::Participant).
#[derive(Debug, Clone)]
pub enum ParticipantCommand {
    /// Join a room with the current local stream.
    Join { room_id: String },

    /// Leave the current room.
    Leave,

    /// Change the announced name.
    SetDisplayName(String),

    /// One step on the emotion scale (arrow keys).
    ShiftEmotion(EmotionDelta),

    SetEnabled { kind: MediaKind, enabled: bool },

    /// Mute/unmute button.
    Toggle(MediaKind),

    /// Switch capture device for one kind.
    SelectDevice { kind: MediaKind, device_id: String },
}
