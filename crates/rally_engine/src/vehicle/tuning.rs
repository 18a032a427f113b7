//! Immutable tuning constants for the car simulation
//!
//! Lifting these into one struct keeps the dynamics free of scattered magic
//! numbers and lets tests perturb a constant deterministically. All angles
//! are degrees, all distances world units, all per-tick.

/// Tuning constants consumed by [`crate::vehicle::Car`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarTuning {
    /// Downward force added to the velocity every tick
    pub gravity: f32,
    /// Acceleration while the forward flag is held
    pub forward_acceleration: f32,
    /// Acceleration while the back flag is held (negative)
    pub reverse_acceleration: f32,
    /// Fraction of velocity kept each tick (global rolling friction)
    pub speed_friction: f32,
    /// Fraction applied twice to the rotation accumulator each tick
    pub rotation_friction: f32,
    /// Velocity decay factor while braking
    pub wheel_friction: f32,
    /// Tangential velocity kept after a wall contact
    pub wall_restitution: f32,
    /// Suspension travel below the wheel's rest location
    pub suspension_length: f32,
    /// Steering limit in degrees (symmetric)
    pub max_steering: i32,
    /// Steering change per tick while left/right is held
    pub steering_step: i32,
    /// Self-centering decay per tick when neither or both are held
    pub centering_step: i32,
    /// Outward reach of the lateral wall probes
    pub wall_probe_length: f32,
    /// Upward reach of the suspension ray above the wheel
    pub ground_ray_reach: f32,
    /// Padding added to the wheel's X/Z probe half-extents at load time
    pub wheel_probe_pad: f32,
    /// Wheel-speed floor scale applied to the throttle input
    pub direct_drive_scale: f32,
    /// Scale of the weight-transfer torque from suspension compression
    pub lateral_torque_scale: f32,
    /// Steering torques below this magnitude are dropped
    pub turn_torque_epsilon: f32,
    /// Rotations below this magnitude are not applied
    pub rotation_epsilon: f32,
}

impl Default for CarTuning {
    fn default() -> Self {
        Self {
            gravity: 0.15,
            forward_acceleration: 0.15,
            reverse_acceleration: -0.1,
            speed_friction: 99.0 / 100.0,
            rotation_friction: 60.0 / 100.0,
            wheel_friction: 99.0 / 100.0,
            wall_restitution: 90.0 / 100.0,
            suspension_length: 4.0,
            max_steering: 30,
            steering_step: 2,
            centering_step: 1,
            wall_probe_length: 20.0,
            ground_ray_reach: 1000.0,
            wheel_probe_pad: 4.0,
            direct_drive_scale: 20.0,
            lateral_torque_scale: 20.0,
            turn_torque_epsilon: 0.0001,
            rotation_epsilon: 0.0000001,
        }
    }
}
