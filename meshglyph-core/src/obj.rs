/// Wavefront OBJ subset parser
///
/// Only `v` and `f` records are read. Faces with more than three corners are
/// split into a fan around their first corner, every other record is skipped.
use std::fs;
use std::path::Path;

use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{i64 as index, space1},
    multi::many1,
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::LoadError;
use crate::geometry::{Mesh, Triangle, Vertex};

/// Read and parse an OBJ file
pub fn load_obj_file<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_obj(&text)
}

/// Parse OBJ text into a mesh
pub fn parse_obj(input: &str) -> Result<Mesh, LoadError> {
    let mut vertices = Vec::new();
    let mut triangles = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim_start();
        let number = number + 1;

        if is_record(line, "v") {
            let (_, vertex) = vertex_record(line).map_err(|_| LoadError::Parse {
                line: number,
                message: "expected `v x y z`".to_string(),
            })?;
            vertices.push(vertex);
        } else if is_record(line, "f") {
            let (_, corners) = face_record(line).map_err(|_| LoadError::Parse {
                line: number,
                message: "expected `f` followed by vertex indices".to_string(),
            })?;

            if corners.len() < 3 {
                return Err(LoadError::Parse {
                    line: number,
                    message: format!("face has {} corners, at least 3 required", corners.len()),
                });
            }

            let resolved = corners
                .iter()
                .map(|&corner| resolve_index(corner, vertices.len()))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| LoadError::Parse {
                    line: number,
                    message: "vertex index 0 or before the first vertex".to_string(),
                })?;

            for pair in resolved[1..].windows(2) {
                triangles.push(Triangle::new(resolved[0], pair[0], pair[1]));
            }
        }
    }

    let mesh = Mesh::new(vertices, triangles)?;
    log::debug!(
        "parsed OBJ: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// A record keyword followed by whitespace, so `vn`/`vt` do not count as `v`
fn is_record(line: &str, keyword: &str) -> bool {
    line.strip_prefix(keyword)
        .map_or(false, |rest| rest.starts_with([' ', '\t']))
}

/// Map a 1-based (or negative, relative) OBJ index to a 0-based one
fn resolve_index(index: i64, vertex_count: usize) -> Option<usize> {
    match index {
        0 => None,
        i if i > 0 => usize::try_from(i - 1).ok(),
        i => {
            let back = usize::try_from(i.unsigned_abs()).ok()?;
            vertex_count.checked_sub(back)
        }
    }
}

fn vertex_record(input: &str) -> IResult<&str, Vertex> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(space1, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    Ok((input, Vertex::new(x, y, z)))
}

fn face_record(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, _) = tag("f")(input)?;
    many1(preceded(space1, face_corner))(input)
}

/// `i`, `i/t`, `i//n` or `i/t/n`; only the position index is kept
fn face_corner(input: &str) -> IResult<&str, i64> {
    terminated(index, take_till(char::is_whitespace))(input)
}
