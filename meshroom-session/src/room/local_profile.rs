use meshroom_core::{ControlMessage, EmotionLevel};

/// What the local user announces to the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalProfile {
    pub display_name: String,
    pub emotion: EmotionLevel,
}

impl LocalProfile {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            emotion: EmotionLevel::NEUTRAL,
        }
    }

    pub fn name_message(&self) -> ControlMessage {
        ControlMessage::Name(self.display_name.clone())
    }

    pub fn emotion_message(&self) -> ControlMessage {
        ControlMessage::Emotion(self.emotion)
    }
}
