mod participant;
mod participant_command;

pub use participant::*;
pub use participant_command::*;
