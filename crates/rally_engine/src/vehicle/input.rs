//! Drive input flags

use bitflags::bitflags;

bitflags! {
    /// The five directional/brake flags a driver can hold during a tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DriveInput: u8 {
        /// Throttle forward
        const FORWARD = 1;
        /// Throttle in reverse
        const BACK = 1 << 1;
        /// Steer left
        const LEFT = 1 << 2;
        /// Steer right
        const RIGHT = 1 << 3;
        /// Brake
        const BRAKE = 1 << 4;
    }
}

impl DriveInput {
    /// Build an input set from the five raw key states
    pub fn from_keys(forward: bool, back: bool, left: bool, right: bool, brake: bool) -> Self {
        let mut input = Self::empty();
        input.set(Self::FORWARD, forward);
        input.set(Self::BACK, back);
        input.set(Self::LEFT, left);
        input.set(Self::RIGHT, right);
        input.set(Self::BRAKE, brake);
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keys_matches_flags() {
        let input = DriveInput::from_keys(true, false, false, true, true);
        assert!(input.contains(DriveInput::FORWARD));
        assert!(!input.contains(DriveInput::BACK));
        assert!(!input.contains(DriveInput::LEFT));
        assert!(input.contains(DriveInput::RIGHT));
        assert!(input.contains(DriveInput::BRAKE));
    }
}
