//! Asset loading
//!
//! Model files are the only asset this engine reads: tracks and cars are
//! Wavefront OBJ files whose named objects carry the collision and anchor
//! semantics (see [`crate::world`] and [`crate::vehicle`]).

pub mod obj_loader;

pub use obj_loader::{Model, ModelBounds, ModelError, ModelObject};
