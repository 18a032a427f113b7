//! Probe segments and collision hit records

use crate::foundation::math::Vec3;

/// A finite line segment used as a collision probe
#[derive(Debug, Clone, Copy)]
pub struct Line {
    start: Vec3,
    end: Vec3,
    length: f32,
}

impl Line {
    /// Creates a segment between two points, caching its length
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            length: (end - start).magnitude(),
        }
    }

    /// The segment's start point
    pub fn start(&self) -> Vec3 {
        self.start
    }

    /// The segment's end point
    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// The segment's length
    pub fn length(&self) -> f32 {
        self.length
    }

    /// The segment's squared length
    pub fn length_squared(&self) -> f32 {
        self.length * self.length
    }

    /// Direction from start to end (not normalized)
    pub fn direction(&self) -> Vec3 {
        self.end - self.start
    }
}

/// Result of a segment-triangle intersection
///
/// Valid only when returned from a successful collision query. The two
/// heights are the signed distances of the segment's start and end from the
/// triangle's plane along its normal; `bottom_height` doubles as a
/// penetration-depth estimate in the contact response.
#[derive(Debug, Clone, Copy)]
pub struct LineCollision {
    pub(crate) intersection: Vec3,
    pub(crate) normal: Vec3,
    pub(crate) top_height: f32,
    pub(crate) bottom_height: f32,
}

impl LineCollision {
    /// The point where the segment crosses the triangle
    pub fn intersection(&self) -> Vec3 {
        self.intersection
    }

    /// The unit normal of the triangle that was hit
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed height of the segment start above the triangle plane
    pub fn top_height(&self) -> f32 {
        self.top_height
    }

    /// Signed height of the segment end above the triangle plane
    pub fn bottom_height(&self) -> f32 {
        self.bottom_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_length() {
        let line = Line::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 4.0));
        assert_relative_eq!(line.length(), 5.0);
        assert_relative_eq!(line.length_squared(), 25.0);
    }

    #[test]
    fn test_line_direction() {
        let line = Line::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 0.0, 1.0));
        assert_relative_eq!(line.direction(), Vec3::new(1.0, -1.0, 0.0));
    }
}
