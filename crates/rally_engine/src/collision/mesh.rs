//! Triangle-soup collision meshes
//!
//! A mesh is an immutable set of triangles with a precomputed bounding
//! sphere. The one query it answers is "does this segment hit any triangle,
//! and where is the closest hit". The scan is linear with no spatial index:
//! world geometry is static and the probes are vehicle-sized, so the bounding
//! sphere reject is the only broad phase needed.

use super::line::{Line, LineCollision};
use super::triangle::Triangle;
use crate::foundation::math::Vec3;

/// An immutable triangle mesh with a closest-hit segment query
#[derive(Debug, Clone)]
pub struct Mesh {
    center: Vec3,
    radius: f32,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Creates a mesh, precomputing its bounding center and radius
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let center = evaluate_center(&triangles);
        let radius = evaluate_radius(&triangles, center);
        Self {
            center,
            radius,
            triangles,
        }
    }

    /// The triangles of this mesh
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Find the hit closest to the segment's start, if any.
    ///
    /// The initial closest-so-far threshold is the segment's own squared
    /// length, so a candidate farther than the query's endpoint is ignored.
    pub fn line_collision(&self, line: &Line) -> Option<LineCollision> {
        if (line.start() - self.center).magnitude() > line.length() + self.radius {
            return None;
        }
        if (line.end() - self.center).magnitude() > line.length() + self.radius {
            return None;
        }

        let mut best_collision = None;
        let mut closest_distance = line.length_squared();
        for triangle in &self.triangles {
            if let Some(collision) = triangle.line_collision(line) {
                let distance = (collision.intersection() - line.start()).magnitude_squared();
                if distance < closest_distance {
                    closest_distance = distance;
                    best_collision = Some(collision);
                }
            }
        }
        best_collision
    }
}

fn evaluate_center(triangles: &[Triangle]) -> Vec3 {
    let mut center = Vec3::zeros();
    let mut count = 0;
    for triangle in triangles {
        center += triangle.a() + triangle.b() + triangle.c();
        count += 3;
    }
    center / count as f32
}

fn evaluate_radius(triangles: &[Triangle], center: Vec3) -> f32 {
    let mut radius = 0.0f32;
    for triangle in triangles {
        for vertex in [triangle.a(), triangle.b(), triangle.c()] {
            radius = radius.max((vertex - center).magnitude());
        }
    }
    radius
}
