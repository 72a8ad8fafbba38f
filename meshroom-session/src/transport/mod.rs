mod loopback;
mod mesh_transport;

pub use loopback::*;
pub use mesh_transport::*;
