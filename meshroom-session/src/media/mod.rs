mod device_switcher;
mod local_session;
mod media_devices;
mod stream;
mod virtual_devices;

pub use device_switcher::*;
pub use local_session::*;
pub use media_devices::*;
pub use stream::*;
pub use virtual_devices::*;
