use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("room id must not be empty")]
    InvalidRoomId,

    #[error("emotion level {0} is outside 0..=4")]
    EmotionOutOfRange(i64),

    #[error("malformed control message: {0}")]
    Malformed(#[from] serde_json::Error),
}
