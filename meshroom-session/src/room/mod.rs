mod local_profile;
mod room_event;
mod room_session;
mod room_state;
mod roster;

pub use local_profile::*;
pub use room_event::*;
pub use room_session::*;
pub use room_state::*;
pub use roster::*;
