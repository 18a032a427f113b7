//! Math utilities and types
//!
//! Provides fundamental math types for the simulation. All angular state in
//! the engine is expressed in degrees; the rotation helpers here take degrees
//! and convert internally.

pub use nalgebra::{Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// Scale a vector to the given length.
///
/// The direction is undefined when `v` has (near-)zero length; callers guard
/// with their own epsilons where that matters.
pub fn resized(v: Vec3, length: f32) -> Vec3 {
    v.normalize() * length
}

/// Rotation matrix around an arbitrary axis, angle in degrees.
///
/// The axis does not need to be normalized.
pub fn rotation_deg(angle_deg: f32, axis: Vec3) -> Mat4 {
    Mat4::from_axis_angle(&Unit::new_normalize(axis), utils::deg_to_rad(angle_deg))
}

/// Translation matrix
pub fn translation(offset: Vec3) -> Mat4 {
    Mat4::new_translation(&offset)
}

/// Apply a homogeneous transform to a vector with w = 1
pub fn transform_vector(matrix: &Mat4, v: Vec3) -> Vec3 {
    matrix
        .transform_point(&nalgebra::Point3::new(v.x, v.y, v.z))
        .coords
}
