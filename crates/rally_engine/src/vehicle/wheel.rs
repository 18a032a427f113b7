//! Per-wheel state and load-time probe constants

use super::tuning::CarTuning;
use crate::assets::ModelBounds;
use crate::foundation::math::{constants, Vec3};

/// The four wheel corners, with their model sub-object names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelPlacement {
    /// Front left ("LF")
    FrontLeft,
    /// Front right ("RF")
    FrontRight,
    /// Back left ("LB")
    BackLeft,
    /// Back right ("RB")
    BackRight,
}

impl WheelPlacement {
    /// All placements, in the fixed update order
    pub const ALL: [Self; 4] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::BackLeft,
        Self::BackRight,
    ];

    /// The named sub-object this wheel is loaded from
    pub fn object_name(self) -> &'static str {
        match self {
            Self::FrontLeft => "LF",
            Self::FrontRight => "RF",
            Self::BackLeft => "LB",
            Self::BackRight => "RB",
        }
    }

    /// Whether this is a steered, driven front wheel
    pub fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }

    /// Index of this placement within a car's wheel array
    pub fn index(self) -> usize {
        match self {
            Self::FrontLeft => 0,
            Self::FrontRight => 1,
            Self::BackLeft => 2,
            Self::BackRight => 3,
        }
    }
}

/// One wheel of the car
///
/// `location` is the frame-local rest anchor and never changes; `position`
/// is the same anchor rotated along with the body frame; `real` is the
/// resolved render anchor after the suspension pass. The three `check_*`
/// half-extents size the collision probes and are derived once at load time.
#[derive(Debug, Clone, Copy)]
pub struct Wheel {
    pub(crate) location: Vec3,
    pub(crate) position: Vec3,
    pub(crate) real: Vec3,
    pub(crate) is_touched: bool,
    pub(crate) roll_angle: f32,
    pub(crate) turn_koef: f32,
    pub(crate) check_x: f32,
    pub(crate) check_y: f32,
    pub(crate) check_z: f32,
}

impl Wheel {
    /// Derive a wheel from its rest anchor and the car model's bounds.
    ///
    /// The X and Z half-extents reach from the anchor to the bounding box
    /// face on the wheel's outward side, padded so the wall probes clear the
    /// bodywork; the Y extent reaches to the bottom of the model.
    /// `turn_koef` converts a travel distance into degrees of wheel roll.
    pub fn new(center: Vec3, bounds: ModelBounds, placement: WheelPlacement, tuning: &CarTuning) -> Self {
        let pad = tuning.wheel_probe_pad;
        let (check_x, check_z) = match placement {
            WheelPlacement::FrontLeft => (
                (bounds.max.x - center.x).abs() + pad,
                (bounds.min.z - center.z).abs() + pad,
            ),
            WheelPlacement::FrontRight => (
                (bounds.min.x - center.x).abs() + pad,
                (bounds.min.z - center.z).abs() + pad,
            ),
            WheelPlacement::BackLeft => (
                (bounds.max.x - center.x).abs() + pad,
                (bounds.max.z - center.z).abs() + pad,
            ),
            WheelPlacement::BackRight => (
                (bounds.min.x - center.x).abs() + pad,
                (bounds.max.z - center.z).abs() + pad,
            ),
        };
        let check_y = (bounds.min.y - center.y).abs();
        Self {
            location: center,
            position: center,
            real: center,
            is_touched: false,
            roll_angle: 0.0,
            turn_koef: 180.0 / (constants::PI * check_y),
            check_x,
            check_y,
            check_z,
        }
    }

    /// Frame-local rest anchor
    pub fn location(&self) -> Vec3 {
        self.location
    }

    /// Rest anchor rotated into the current body frame
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Resolved render anchor after the last suspension pass
    pub fn real(&self) -> Vec3 {
        self.real
    }

    /// Whether the last ground probe found contact within suspension range
    pub fn is_touched(&self) -> bool {
        self.is_touched
    }

    /// Accumulated roll in degrees
    pub fn roll_angle(&self) -> f32 {
        self.roll_angle
    }

    /// Distance-to-roll-degrees conversion factor
    pub fn turn_koef(&self) -> f32 {
        self.turn_koef
    }

    /// Lateral probe half-extent
    pub fn check_x(&self) -> f32 {
        self.check_x
    }

    /// Downward probe extent to the wheel's contact patch
    pub fn check_y(&self) -> f32 {
        self.check_y
    }

    /// Longitudinal probe half-extent
    pub fn check_z(&self) -> f32 {
        self.check_z
    }
}
