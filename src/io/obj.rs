use crate::Mesh;
use glam::Vec3;
use std::{error::Error, fmt, fs, path::Path};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjError {
    Io,
    ParseFloat { line: usize },
    ParseIndex { line: usize },
    MissingVertex { line: usize },
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "io error"),
            Self::ParseFloat { line } => write!(f, "line {line}: failed to parse float"),
            Self::ParseIndex { line } => write!(f, "line {line}: failed to parse index"),
            Self::MissingVertex { line } => write!(f, "line {line}: vertex index out of range"),
        }
    }
}

impl Error for ObjError {}

pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, ObjError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|err| {
        log::warn!("failed to read {}: {err}", path.display());
        ObjError::Io
    })?;
    let mesh = load_obj_str(&src)?;
    log::debug!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Parses the `v` and `f` records of a Wavefront OBJ document.
///
/// Texture and normal references in face corners are accepted and dropped.
/// Polygons are fan-triangulated around their first corner.
pub fn load_obj_str(src: &str) -> Result<Mesh, ObjError> {
    let mut mesh = Mesh::new();
    let mut corners: Vec<u32> = Vec::new();

    for (n, line) in src.lines().enumerate() {
        let line_no = n + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut it = line.split_whitespace();
        let Some(key) = it.next() else {
            continue;
        };
        match key {
            "v" => {
                let mut coord = || -> Result<f32, ObjError> {
                    let tok = it.next().ok_or(ObjError::ParseFloat { line: line_no })?;
                    tok.parse::<f32>()
                        .map_err(|_| ObjError::ParseFloat { line: line_no })
                };
                let (x, y, z) = (coord()?, coord()?, coord()?);
                mesh.positions.push(Vec3::new(x, y, z));
            }
            "f" => {
                corners.clear();
                for tok in it {
                    let idx = parse_corner(tok, line_no)?;
                    corners.push(resolve_index(idx, mesh.positions.len(), line_no)?);
                }
                if corners.len() < 3 {
                    log::warn!("line {line_no}: skipping face with {} corners", corners.len());
                    continue;
                }
                for i in 1..(corners.len() - 1) {
                    mesh.push_face([corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}

fn parse_corner(tok: &str, line: usize) -> Result<i32, ObjError> {
    let v = tok.split('/').next().unwrap_or_default();
    v.parse::<i32>().map_err(|_| ObjError::ParseIndex { line })
}

fn resolve_index(idx: i32, len: usize, line: usize) -> Result<u32, ObjError> {
    if idx == 0 {
        return Err(ObjError::ParseIndex { line });
    }
    let i = if idx > 0 {
        idx as i64 - 1
    } else {
        len as i64 + idx as i64
    };
    if i < 0 || i as usize >= len {
        return Err(ObjError::MissingVertex { line });
    }
    u32::try_from(i).map_err(|_| ObjError::MissingVertex { line })
}
