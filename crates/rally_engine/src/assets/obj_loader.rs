//! OBJ file loader for 3D models
//!
//! Parses the subset of Wavefront OBJ the simulation needs: named objects,
//! vertex positions, and triangulated faces. Normals, texture coordinates and
//! materials are skipped; collision geometry and anchor points only depend on
//! positions.

use crate::foundation::math::Vec3;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a model file
#[derive(Error, Debug)]
pub enum ModelError {
    /// Underlying file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A numeric field failed to parse
    #[error("Parse error: {0}")]
    ParseError(String),
    /// The file structure is not usable
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// A required named object is missing from the model
    #[error("Missing object: {0}")]
    MissingObject(String),
}

/// A named group of geometry within a model
#[derive(Debug, Clone)]
pub struct ModelObject {
    /// Object name as declared by the `o`/`g` statement
    pub name: String,
    /// Vertex positions referenced by this object
    pub vertices: Vec<Vec3>,
    /// Triangle faces as indices into `vertices`
    pub faces: Vec<[u32; 3]>,
}

impl ModelObject {
    /// Average of the object's vertex positions (zero for empty objects)
    pub fn center(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::zeros();
        }
        let sum: Vec3 = self.vertices.iter().sum();
        sum / self.vertices.len() as f32
    }

    /// Shift the object's vertices so its center lands on the origin
    pub fn recenter(&mut self) {
        let center = self.center();
        for vertex in &mut self.vertices {
            *vertex -= center;
        }
    }
}

/// Axis-aligned bounds over a model's vertices
#[derive(Debug, Clone, Copy)]
pub struct ModelBounds {
    /// Componentwise minimum
    pub min: Vec3,
    /// Componentwise maximum
    pub max: Vec3,
}

/// A loaded model: an ordered sequence of named objects
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// The model's objects, in file order
    pub objects: Vec<ModelObject>,
}

impl Model {
    /// Load a model from an OBJ file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let file = File::open(path.as_ref())?;
        let model = Self::from_reader(BufReader::new(file))?;
        log::debug!(
            "loaded model {:?} with {} objects",
            path.as_ref(),
            model.objects.len()
        );
        Ok(model)
    }

    /// Parse a model from any buffered reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ModelError> {
        let mut parser = Parser::default();
        for line in reader.lines() {
            let line = line?;
            parser.consume_line(line.trim())?;
        }
        Ok(Model {
            objects: parser.objects,
        })
    }

    /// Find an object by exact name
    pub fn find_object(&self, name: &str) -> Option<&ModelObject> {
        self.objects.iter().find(|object| object.name == name)
    }

    /// All objects whose name starts with the given prefix, in file order
    pub fn objects_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a ModelObject> + 'a {
        self.objects
            .iter()
            .filter(move |object| !object.name.is_empty() && object.name.starts_with(prefix))
    }

    /// Bounds over every vertex of every object
    ///
    /// Returns `None` for a model with no geometry.
    pub fn bounds(&self) -> Option<ModelBounds> {
        let mut vertices = self.objects.iter().flat_map(|object| &object.vertices);
        let first = *vertices.next()?;
        let mut bounds = ModelBounds {
            min: first,
            max: first,
        };
        for vertex in vertices {
            bounds.min = bounds.min.inf(vertex);
            bounds.max = bounds.max.sup(vertex);
        }
        Some(bounds)
    }
}

/// Incremental OBJ line parser
///
/// OBJ vertex indices are global to the file while objects keep their own
/// vertex lists, so each object remaps the global indices it references.
#[derive(Default)]
struct Parser {
    positions: Vec<Vec3>,
    objects: Vec<ModelObject>,
    remap: HashMap<usize, u32>,
}

impl Parser {
    fn consume_line(&mut self, line: &str) -> Result<(), ModelError> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "o" | "g" => {
                let name = parts.get(1).copied().unwrap_or("").to_string();
                self.objects.push(ModelObject {
                    name,
                    vertices: Vec::new(),
                    faces: Vec::new(),
                });
                self.remap.clear();
            }
            "v" => {
                if parts.len() < 4 {
                    return Err(ModelError::InvalidFormat(format!(
                        "vertex with {} components",
                        parts.len() - 1
                    )));
                }
                let x = parse_float(parts[1], "vertex x")?;
                let y = parse_float(parts[2], "vertex y")?;
                let z = parse_float(parts[3], "vertex z")?;
                self.positions.push(Vec3::new(x, y, z));
            }
            "f" => {
                if parts.len() < 4 {
                    return Err(ModelError::InvalidFormat(
                        "face with fewer than 3 vertices".to_string(),
                    ));
                }
                if self.objects.is_empty() {
                    return Err(ModelError::InvalidFormat(
                        "face before any object".to_string(),
                    ));
                }
                let mut corners = Vec::with_capacity(parts.len() - 1);
                for part in &parts[1..] {
                    corners.push(self.local_index(part)?);
                }
                let Some(object) = self.objects.last_mut() else {
                    return Err(ModelError::InvalidFormat(
                        "face before any object".to_string(),
                    ));
                };
                // Fan triangulation for quads and larger polygons
                for i in 1..corners.len() - 1 {
                    object.faces.push([corners[0], corners[i], corners[i + 1]]);
                }
            }
            // Normals, texture coordinates, materials and smoothing groups
            // carry no collision meaning here.
            _ => {}
        }
        Ok(())
    }

    fn local_index(&mut self, part: &str) -> Result<u32, ModelError> {
        let index_text = part.split('/').next().unwrap_or("");
        let global: usize = index_text
            .parse()
            .map_err(|_| ModelError::ParseError(format!("invalid face index '{part}'")))?;
        if global == 0 || global > self.positions.len() {
            return Err(ModelError::InvalidFormat(format!(
                "face index {global} out of bounds"
            )));
        }
        let position = self.positions[global - 1];
        let Some(object) = self.objects.last_mut() else {
            return Err(ModelError::InvalidFormat(
                "face before any object".to_string(),
            ));
        };
        if let Some(&local) = self.remap.get(&global) {
            return Ok(local);
        }
        let local = object.vertices.len() as u32;
        object.vertices.push(position);
        self.remap.insert(global, local);
        Ok(local)
    }
}

fn parse_float(text: &str, what: &str) -> Result<f32, ModelError> {
    text.parse()
        .map_err(|_| ModelError::ParseError(format!("invalid {what}: '{text}'")))
}
