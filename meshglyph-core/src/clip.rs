/// Near-plane clipping of camera-space triangles
use nalgebra::Vector3;

use crate::projection::NEAR_PLANE;

/// A camera-space triangle
pub type CameraTriangle = [Vector3<f32>; 3];

/// The zero, one or two triangles left after clipping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clipped {
    triangles: [CameraTriangle; 2],
    len: usize,
}

impl Clipped {
    fn none() -> Self {
        Self {
            triangles: [[Vector3::zeros(); 3]; 2],
            len: 0,
        }
    }

    fn one(triangle: CameraTriangle) -> Self {
        Self {
            triangles: [triangle, [Vector3::zeros(); 3]],
            len: 1,
        }
    }

    fn two(first: CameraTriangle, second: CameraTriangle) -> Self {
        Self {
            triangles: [first, second],
            len: 2,
        }
    }

    pub fn triangles(&self) -> &[CameraTriangle] {
        &self.triangles[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// True when a camera-space point lies behind the near plane
pub fn is_behind(point: &Vector3<f32>) -> bool {
    point.z < NEAR_PLANE
}

/// Clip a triangle against the near plane
///
/// Triangles entirely in front pass through untouched and triangles entirely
/// behind are dropped. Otherwise the vertex alone on its side is found and
/// its two edges are cut at `z == NEAR_PLANE`: one triangle remains when it is
/// the only vertex in front, two (a split quad) when it is the only one
/// behind. Output triangles keep the input winding.
pub fn clip_near(triangle: &CameraTriangle) -> Clipped {
    let behind = triangle.iter().filter(|p| is_behind(p)).count();

    match behind {
        0 => Clipped::one(*triangle),
        3 => Clipped::none(),
        _ => {
            // Only two vertices behind means the odd one is the one in front
            let odd_is_behind = behind == 1;
            let odd = triangle
                .iter()
                .position(|p| is_behind(p) == odd_is_behind)
                .unwrap_or(0);

            // Cyclic order from the odd vertex keeps the winding
            let apex = triangle[odd];
            let next = triangle[(odd + 1) % 3];
            let prev = triangle[(odd + 2) % 3];

            let cut_next = near_intersection(&apex, &next);
            let cut_prev = near_intersection(&apex, &prev);

            if odd_is_behind {
                // Quad: cut_next, next, prev, cut_prev
                Clipped::two([cut_next, next, prev], [cut_next, prev, cut_prev])
            } else {
                Clipped::one([apex, cut_next, cut_prev])
            }
        }
    }
}

/// Where the edge from `apex` to `other` crosses the near plane
///
/// Coordinates the two endpoints share are copied exactly instead of
/// interpolated.
fn near_intersection(apex: &Vector3<f32>, other: &Vector3<f32>) -> Vector3<f32> {
    let t = (NEAR_PLANE - apex.z) / (other.z - apex.z);
    let lerp = |a: f32, b: f32| if a == b { a } else { a + (b - a) * t };

    Vector3::new(lerp(apex.x, other.x), lerp(apex.y, other.y), NEAR_PLANE)
}
