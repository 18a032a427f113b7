//! Triangles with cached normals and segment intersection

use super::line::{Line, LineCollision};
use crate::foundation::math::{resized, Vec3};

/// Segments closer to parallel with the plane than this are rejected,
/// guarding the interpolation against division by near-zero.
const PARALLEL_EPSILON: f32 = 0.00001;

/// A triangle with a precomputed unit normal
///
/// The normal is derived from the vertex winding at construction. A
/// degenerate (collinear) triangle is not detected; its normal direction is
/// undefined and such a triangle never reports a hit.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    a: Vec3,
    b: Vec3,
    c: Vec3,
    normal: Vec3,
}

impl Triangle {
    /// Creates a triangle, caching its unit normal
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            a,
            b,
            c,
            normal: winding_normal(a, b, c),
        }
    }

    /// First vertex
    pub fn a(&self) -> Vec3 {
        self.a
    }

    /// Second vertex
    pub fn b(&self) -> Vec3 {
        self.b
    }

    /// Third vertex
    pub fn c(&self) -> Vec3 {
        self.c
    }

    /// The cached unit normal
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Centroid of the triangle
    pub fn center(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Test whether a point on the triangle's plane lies inside the triangle.
    ///
    /// Points exactly on an edge are classified as outside: each oriented
    /// edge uses a strict `> 0` counter-clockwise test.
    pub fn contains(&self, point: Vec3) -> bool {
        is_in_triangle(point, self.a, self.b, self.c, self.normal)
    }

    /// Find where a segment first crosses this triangle.
    ///
    /// The segment must cross the plane from the normal side: a start below
    /// the plane or an end above it reports no hit. The crossing point is
    /// interpolated from the two signed plane heights and then tested for
    /// triangle membership.
    pub fn line_collision(&self, line: &Line) -> Option<LineCollision> {
        let surface_to_start = line.start() - self.a;
        let surface_to_end = line.end() - self.a;

        let top_height = self.normal.dot(&surface_to_start);
        let bottom_height = self.normal.dot(&surface_to_end);
        if top_height < 0.0 || bottom_height > 0.0 {
            return None;
        }

        let height = top_height - bottom_height;
        if height.abs() < PARALLEL_EPSILON {
            return None;
        }

        let factor = top_height / height;
        let intersection = line.start() + line.direction() * factor;

        if !is_in_triangle(intersection, self.a, self.b, self.c, self.normal) {
            return None;
        }
        Some(LineCollision {
            intersection,
            normal: self.normal,
            top_height,
            bottom_height,
        })
    }
}

fn is_in_triangle(point: Vec3, a: Vec3, b: Vec3, c: Vec3, normal: Vec3) -> bool {
    is_counter_clockwise(a, b, point, normal)
        && is_counter_clockwise(b, c, point, normal)
        && is_counter_clockwise(c, a, point, normal)
}

fn is_counter_clockwise(a: Vec3, b: Vec3, c: Vec3, normal: Vec3) -> bool {
    let evaluated_normal = winding_normal(a, b, c);
    normal.dot(&evaluated_normal) > 0.0
}

fn winding_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    resized((a - c).cross(&(b - c)), 1.0)
}
