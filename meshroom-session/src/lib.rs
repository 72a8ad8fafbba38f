pub mod analytics;
pub mod config;
pub mod error;
pub mod media;
pub mod participant;
pub mod room;
pub mod transport;
pub mod view;

pub use analytics::*;
pub use config::*;
pub use error::*;
pub use media::*;
pub use participant::*;
pub use room::*;
pub use transport::*;
pub use view::*;
