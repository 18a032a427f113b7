//! Track world: ground and wall collision sets
//!
//! A [`Track`] owns two disjoint collision sets built from a track model's
//! named objects: grounds (drivable and fall surfaces, probed vertically) and
//! walls (obstacles, probed near-horizontally). The two nearest-collision
//! queries share one algorithm but never mix mesh sets.
//!
//! Vehicle dynamics only sees the [`CollisionWorld`] trait, so tests can
//! substitute a synthetic world (a single plane, say) without any file IO.

use crate::assets::{Model, ModelError, ModelObject};
use crate::collision::{Line, LineCollision, Mesh, Triangle};
use crate::foundation::math::Vec3;

/// The collision capability the vehicle needs from its surroundings
pub trait CollisionWorld {
    /// Closest hit of the segment against ground geometry, if any
    fn nearest_ground_collision(&self, line: &Line) -> Option<LineCollision>;

    /// Closest hit of the segment against wall geometry, if any
    fn nearest_wall_collision(&self, line: &Line) -> Option<LineCollision>;
}

/// A drivable or fall surface
#[derive(Debug, Clone)]
pub struct Ground {
    /// Collision geometry for vertical probes
    pub collision: Mesh,
}

/// An obstacle surface
#[derive(Debug, Clone)]
pub struct Wall {
    /// Collision geometry for lateral probes
    pub collision: Mesh,
}

/// A decorative anchor with no collision semantics
#[derive(Debug, Clone, Copy)]
pub struct Dummy {
    /// Anchor position
    pub center: Vec3,
}

/// A loaded track: collision sets plus decorative anchors and waypoints
#[derive(Debug, Clone, Default)]
pub struct Track {
    grounds: Vec<Ground>,
    walls: Vec<Wall>,
    dummies: Vec<Dummy>,
    waypoints: Vec<Vec3>,
}

impl Track {
    /// Load a track from a model file.
    ///
    /// Objects named `Grounds*` become ground collision meshes, `Walls*`
    /// become wall collision meshes, `Dummy*` become decorative anchors, and
    /// `Way1`, `Way2`, ... (consecutively numbered) become the ordered
    /// waypoint sequence.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ModelError> {
        let model = Model::load(path)?;
        let track = Self::from_model(&model);
        log::info!(
            "track loaded: {} grounds, {} walls, {} waypoints",
            track.grounds.len(),
            track.walls.len(),
            track.waypoints.len()
        );
        Ok(track)
    }

    /// Assemble a track from an already-parsed model
    pub fn from_model(model: &Model) -> Self {
        let grounds = model
            .objects_with_prefix("Grounds")
            .map(|object| Ground {
                collision: collision_mesh(object),
            })
            .collect();
        let walls = model
            .objects_with_prefix("Walls")
            .map(|object| Wall {
                collision: collision_mesh(object),
            })
            .collect();
        let dummies = model
            .objects_with_prefix("Dummy")
            .map(|object| Dummy {
                center: object.center(),
            })
            .collect();

        let mut waypoints = Vec::new();
        let mut waypoint_id = 1;
        while let Some(object) = model.find_object(&format!("Way{waypoint_id}")) {
            waypoints.push(object.center());
            waypoint_id += 1;
        }

        Self {
            grounds,
            walls,
            dummies,
            waypoints,
        }
    }

    /// Ground surfaces
    pub fn grounds(&self) -> &[Ground] {
        &self.grounds
    }

    /// Wall surfaces
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Decorative anchors
    pub fn dummies(&self) -> &[Dummy] {
        &self.dummies
    }

    /// Ordered waypoint centers
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }
}

impl CollisionWorld for Track {
    fn nearest_ground_collision(&self, line: &Line) -> Option<LineCollision> {
        nearest_collision(self.grounds.iter().map(|ground| &ground.collision), line)
    }

    fn nearest_wall_collision(&self, line: &Line) -> Option<LineCollision> {
        nearest_collision(self.walls.iter().map(|wall| &wall.collision), line)
    }
}

/// Closest hit across a set of meshes, seeded with the segment's own squared
/// length so hits beyond the query endpoint are ignored.
fn nearest_collision<'a>(
    meshes: impl Iterator<Item = &'a Mesh>,
    line: &Line,
) -> Option<LineCollision> {
    let mut best_collision = None;
    let mut closest_distance = line.length_squared();
    for mesh in meshes {
        if let Some(collision) = mesh.line_collision(line) {
            let distance = (collision.intersection() - line.start()).magnitude_squared();
            if distance < closest_distance {
                closest_distance = distance;
                best_collision = Some(collision);
            }
        }
    }
    best_collision
}

fn collision_mesh(object: &ModelObject) -> Mesh {
    let triangles = object
        .faces
        .iter()
        .map(|face| {
            Triangle::new(
                object.vertices[face[0] as usize],
                object.vertices[face[1] as usize],
                object.vertices[face[2] as usize],
            )
        })
        .collect();
    Mesh::new(triangles)
}
