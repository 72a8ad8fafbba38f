pub use meshroom_core::model::{EmotionLevel, PeerId, RoomId};

pub mod model {
    pub use meshroom_core::model::*;
}

#[cfg(feature = "session")]
pub mod session {
    pub use meshroom_session::*;
}
