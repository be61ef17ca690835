//! Input routing: raw key and pointer events mapped to per-frame actions.
//!
//! # Invariants
//! - The scene consumes actions, never raw events.
//! - Held keys repeat every frame; clicks and toggles fire once per press.

pub mod action;
mod router;

pub use action::{Action, BLOCK_REACH, BlockEdit, block_target};
pub use router::{InputEvent, InputRouter, Key, MouseButton};

pub fn crate_info() -> &'static str {
    "voxelwalk-input v0.1.0"
}
