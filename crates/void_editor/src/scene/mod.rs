//! Scene contents as seen by the editor.
//!
//! Game objects live in an arena so commands can refer to them by id.

mod game_object;

pub use game_object::{GameObject, Scene};
