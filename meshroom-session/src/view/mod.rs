mod room_view;
mod tracing_view;

pub use room_view::*;
pub use tracing_view::*;
