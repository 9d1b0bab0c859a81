//! Domain models for the NexaCare core.

mod account;
mod appointment;
mod patient;

pub use account::*;
pub use appointment::*;
pub use patient::*;
