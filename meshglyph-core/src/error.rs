/// Errors raised while loading a mesh
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum LoadError {
    /// The model file could not be read
    Io(io::Error),
    /// A `v` or `f` line could not be parsed
    Parse { line: usize, message: String },
    /// A face refers to a vertex that does not exist
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    /// No vertices or no triangles were found
    Corrupt { vertices: usize, triangles: usize },
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "unable to read model: {err}"),
            Self::Parse { line, message } => write!(f, "line {line}: {message}"),
            Self::IndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {face} references vertex {} but only {vertex_count} vertices exist",
                index + 1
            ),
            Self::Corrupt {
                vertices,
                triangles,
            } => write!(
                f,
                "corrupt model: {vertices} vertices and {triangles} triangles parsed"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// A projected triangle whose area is too small to take barycentric weights from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegenerateTriangle {
    /// Doubled signed area in screen cells
    pub determinant: f32,
}

impl fmt::Display for DegenerateTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "degenerate triangle (determinant {})", self.determinant)
    }
}

impl std::error::Error for DegenerateTriangle {}
