//! # void_core - Editor Core Primitives
//!
//! Zero-dependency building blocks shared by the editor crates:
//! - **ObjectId**: generational identifier for scene game objects
//! - **Arena**: generational storage that hands out `ObjectId`s
//!
//! Edit commands hold `ObjectId`s instead of references, so an undo entry
//! never keeps a deleted object alive and a stale id is detected at
//! replay time instead of mutating the wrong object.

pub mod arena;
pub mod id;

pub use arena::Arena;
pub use id::ObjectId;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::arena::Arena;
    pub use crate::id::ObjectId;
}
