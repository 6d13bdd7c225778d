//! Terminal input collaborator.
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]s and repeats
//! held keys with a configurable delay and interval, including on terminals
//! that never report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::KeyRepeat;
pub use map::{action_for_code, handle_key_event, should_quit};
