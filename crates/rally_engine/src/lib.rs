//! # Rally Engine
//!
//! The simulation core of a rally driving game: collision geometry, track
//! loading, and per-tick four-wheel vehicle dynamics.
//!
//! ## Features
//!
//! - **Collision Primitives**: Segment/triangle and segment/mesh closest-hit
//!   queries with a bounding-sphere broad phase
//! - **Track Worlds**: OBJ-loaded tracks split into ground and wall
//!   collision sets, plus waypoints and decorative anchors
//! - **Vehicle Dynamics**: Steering, front-wheel drive, suspension raycasts,
//!   and wall contact response, advanced one fixed tick at a time
//! - **Deterministic**: No clocks and no randomness inside the simulation;
//!   the same inputs always replay the same run
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rally_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let track = Track::load("assets/tracks/forest.obj")?;
//!     let mut car = Car::load("assets/cars/hatch.obj", CarTuning::default())?;
//!     car.set_position(Vec3::new(0.0, 10.0, 0.0));
//!
//!     for _ in 0..600 {
//!         let input = DriveInput::from_keys(true, false, false, false, false);
//!         car.update(input, &track);
//!     }
//!     println!("finished at {:?}", car.position());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod collision;
pub mod foundation;
pub mod vehicle;
pub mod world;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{Model, ModelError},
        collision::{Line, LineCollision, Mesh, Triangle},
        foundation::math::{Mat4, Vec3},
        vehicle::{Car, CarTuning, DriveInput, WheelPlacement},
        world::{CollisionWorld, Track},
    };
}
