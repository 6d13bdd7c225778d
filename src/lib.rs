//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine and its collaborators under one name, plus the
//! headless observation stream used by the `headless` subcommand.

pub mod observe;

pub use blockfall_audio as audio;
pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
