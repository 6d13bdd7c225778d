//! Terminal presentation for blockfall.
//!
//! Renders a [`core::GameSnapshot`] into a plain framebuffer of styled
//! characters, then flushes only the changed runs to the terminal. Board cells
//! are two columns wide to offset the usual glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
