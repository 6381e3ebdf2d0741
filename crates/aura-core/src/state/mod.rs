//! Session state machine.

pub mod model;

pub use model::ShowroomState;
