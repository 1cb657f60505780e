use glam::Vec3;
use std::{error::Error, fmt};

/// Three indices into [`Mesh::positions`].
pub type Face = [u32; 3];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    NonFiniteVertex {
        vertex: usize,
    },
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NonFiniteVertex { vertex } => write!(f, "vertex {vertex} is not finite"),
            Self::FaceIndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {face} references vertex {index}, mesh has {vertex_count}"
            ),
        }
    }
}

impl Error for MeshError {}

/// Indexed triangle list as read from a model file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            positions: vec![a, b, c],
            faces: vec![[0, 1, 2]],
        }
    }

    /// Four faces around the origin, inside the `[-1, 1]` view square.
    pub fn tetrahedron() -> Self {
        Self {
            positions: vec![
                Vec3::new(0.0, 0.8, 0.0),
                Vec3::new(-0.7, -0.4, 0.4),
                Vec3::new(0.7, -0.4, 0.4),
                Vec3::new(0.0, -0.4, -0.8),
            ],
            faces: vec![[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]],
        }
    }

    pub fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex(&self, i: usize) -> Option<Vec3> {
        self.positions.get(i).copied()
    }

    pub fn face(&self, i: usize) -> Option<Face> {
        self.faces.get(i).copied()
    }

    /// Checks that every vertex is finite and every face index names a vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        if let Some(vertex) = self.positions.iter().position(|p| !p.is_finite()) {
            return Err(MeshError::NonFiniteVertex { vertex });
        }
        let vertex_count = self.positions.len();
        for (face, corners) in self.faces.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}
