//! Vehicle simulation
//!
//! Per-tick dynamics of a four-wheeled car over a [`crate::world`] collision
//! world: steering and throttle shaping, a front-wheel-drive speed model,
//! suspension raycasts, wall contact response, and incremental rotation of
//! the body frame.
//!
//! # Module Organization
//!
//! - [`input`] - Drive input flags
//! - [`tuning`] - Immutable tuning constants
//! - [`wheel`] - Per-wheel state and load-time probe constants
//! - [`car`] - The car itself and its tick update

pub mod car;
pub mod input;
pub mod tuning;
pub mod wheel;

pub use car::Car;
pub use input::DriveInput;
pub use tuning::CarTuning;
pub use wheel::{Wheel, WheelPlacement};
