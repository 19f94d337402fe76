/// One mesh, one cumulative transform, and the per-frame render pipeline
use nalgebra::Vector3;

use crate::clip::{clip_near, is_behind};
use crate::command::{Axis, Command, ScaleAxis};
use crate::framebuffer::FrameBuffer;
use crate::geometry::Mesh;
use crate::projection::{ProjectionMode, Projector, ScreenVertex};
use crate::raster::fill_triangle;
use crate::shading::{shade, ShadingMode};
use crate::transform::TransformStack;

/// Counters collected while rendering one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Mesh triangles processed
    pub triangles: usize,
    /// Triangles entirely behind the near plane
    pub culled: usize,
    /// Triangles produced by splitting at the near plane
    pub clipped: usize,
    /// Triangles skipped for having no projected area
    pub degenerate: usize,
    /// Cells written, counting overdraw
    pub pixels: usize,
}

/// Render state owned by a viewer session
#[derive(Debug, Clone)]
pub struct Scene {
    mesh: Mesh,
    pub transform: TransformStack,
    pub projection: ProjectionMode,
    pub shading: ShadingMode,
}

impl Scene {
    /// A scene at the initial view, perspective projection, lit shading
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            transform: TransformStack::new(),
            projection: ProjectionMode::default(),
            shading: ShadingMode::default(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Swap in a freshly loaded mesh, keeping the transform and modes
    pub fn replace_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
    }

    /// Apply a command to the scene or the framebuffer
    ///
    /// Help and quit belong to the front end and leave the state untouched.
    pub fn apply(&mut self, command: &Command, buffer: &mut FrameBuffer) {
        log::debug!("applying {command:?}");

        match *command {
            Command::Translate(axis, amount) => match axis {
                Axis::X => self.transform.translate(amount, 0.0, 0.0),
                Axis::Y => self.transform.translate(0.0, amount, 0.0),
                Axis::Z => self.transform.translate(0.0, 0.0, amount),
            },
            Command::Rotate(axis, angle) => match axis {
                Axis::X => self.transform.rotate_x(angle),
                Axis::Y => self.transform.rotate_y(angle),
                Axis::Z => self.transform.rotate_z(angle),
            },
            Command::Scale(axis, factor) => match axis {
                ScaleAxis::X => self.transform.scale(factor, 1.0, 1.0),
                ScaleAxis::Y => self.transform.scale(1.0, factor, 1.0),
                ScaleAxis::Z => self.transform.scale(1.0, 1.0, factor),
                ScaleAxis::All => self.transform.scale(factor, factor, factor),
            },
            Command::ToggleProjection => self.projection = self.projection.toggled(),
            Command::ToggleShading => self.shading = self.shading.toggled(),
            Command::Reset => self.transform.reset(),
            Command::Resize(width, height) => {
                buffer.resize(width, height);
            }
            Command::Help | Command::Quit => {}
        }
    }

    /// Every mesh vertex mapped into camera space
    pub fn camera_vertices(&self) -> Vec<Vector3<f32>> {
        self.mesh
            .vertices()
            .iter()
            .map(|vertex| self.transform.apply(vertex))
            .collect()
    }

    /// Screen positions of the mesh vertices, `None` for those behind the near plane
    pub fn projected_vertices(&self, buffer: &FrameBuffer) -> Vec<Option<ScreenVertex>> {
        let projector = self.projector(buffer);
        self.camera_vertices()
            .iter()
            .map(|point| (!is_behind(point)).then(|| projector.project(point)))
            .collect()
    }

    fn projector(&self, buffer: &FrameBuffer) -> Projector {
        Projector::for_buffer(self.projection, buffer, self.transform.camera_distance())
    }

    /// Clear the framebuffer and draw the whole mesh into it
    ///
    /// Triangles are drawn in mesh order, so equal-depth cells go to the
    /// earlier triangle and output is reproducible.
    pub fn render(&self, buffer: &mut FrameBuffer) -> FrameStats {
        buffer.clear();

        let projector = self.projector(buffer);
        let camera_vertices = self.camera_vertices();
        let mut stats = FrameStats::default();

        for (index, triangle) in self.mesh.triangles().iter().enumerate() {
            stats.triangles += 1;

            let corners = triangle.corners(&camera_vertices);
            let clipped = clip_near(&corners);
            if clipped.is_empty() {
                log::trace!("triangle {index} is behind the near plane");
                stats.culled += 1;
                continue;
            }
            if clipped.triangles() != [corners] {
                stats.clipped += clipped.len();
            }

            for piece in clipped.triangles() {
                let glyph = shade(self.shading, piece, index);
                let screen = piece.map(|point| projector.project(&point));

                match fill_triangle(buffer, &screen, glyph, self.projection) {
                    Ok(written) => stats.pixels += written,
                    Err(err) => {
                        log::trace!("skipping triangle {index}: {err}");
                        stats.degenerate += 1;
                    }
                }
            }
        }

        stats
    }

    /// Status line: mesh size, modes and transform
    pub fn status(&self) -> String {
        format!(
            "{} vertices, {} triangles | {} | {} | {}",
            self.mesh.vertex_count(),
            self.mesh.triangle_count(),
            self.projection.name(),
            self.shading.name(),
            self.transform.summary(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandReader;
    use crate::geometry::{Triangle, Vertex};
    use crate::shading::{LIT_GLYPH, MATERIAL_PALETTE, SHADOW_GLYPH};

    const WIDTH: usize = 80;
    const HEIGHT: usize = 24;

    fn cube_scene() -> (Scene, FrameBuffer) {
        (Scene::new(Mesh::cube(1.0)), FrameBuffer::new(WIDTH, HEIGHT))
    }

    fn single_triangle(corners: [Vertex; 3]) -> Mesh {
        Mesh::new(corners.to_vec(), vec![Triangle::new(0, 1, 2)]).unwrap()
    }

    fn screen_positions(scene: &Scene, buffer: &FrameBuffer) -> Vec<ScreenVertex> {
        scene
            .projected_vertices(buffer)
            .into_iter()
            .map(|vertex| vertex.expect("vertex behind the near plane"))
            .collect()
    }

    /// Per-triangle screen bounding boxes as (min x, min y, max x, max y)
    fn triangle_bounds(scene: &Scene, buffer: &FrameBuffer) -> Vec<[f32; 4]> {
        let screen = screen_positions(scene, buffer);
        scene
            .mesh()
            .triangles()
            .iter()
            .map(|triangle| {
                let corners = triangle.indices.map(|index| screen[index]);
                corners.iter().fold(
                    [f32::MAX, f32::MAX, f32::MIN, f32::MIN],
                    |[min_x, min_y, max_x, max_y], v| {
                        [min_x.min(v.x), min_y.min(v.y), max_x.max(v.x), max_y.max(v.y)]
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_cube_renders_lit_glyphs() {
        let (scene, mut buffer) = cube_scene();
        let stats = scene.render(&mut buffer);

        assert_eq!(stats.triangles, 12);
        assert_eq!(stats.culled, 0);
        assert_eq!(stats.clipped, 0);
        assert!(buffer.covered() > 0);
        assert!(buffer
            .glyphs()
            .iter()
            .all(|&c| c == ' ' || c == LIT_GLYPH || c == SHADOW_GLYPH));
        // The cube sits in the middle of the screen
        assert_ne!(buffer.glyph(WIDTH / 2, HEIGHT / 2), Some(' '));
        assert_eq!(buffer.glyph(0, 0), Some(' '));
    }

    #[test]
    fn test_render_is_deterministic() {
        let (mut scene, mut first) = cube_scene();
        scene.apply(&Command::Rotate(Axis::X, 0.4), &mut first);
        scene.apply(&Command::Rotate(Axis::Y, 0.7), &mut first);

        let mut second = first.clone();
        let stats_first = scene.render(&mut first);
        let stats_second = scene.render(&mut second);
        assert_eq!(first, second);
        assert_eq!(stats_first, stats_second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_reset_reproduces_first_frame() {
        let (mut scene, mut buffer) = cube_scene();
        scene.render(&mut buffer);
        let first = buffer.clone();
        assert!(first.covered() > 0);

        let mut reader = CommandReader::new();
        for line in ["rx 30", "ry 45", "tz -2", "tx 0.5", "sa 1.5", "sy 0.2", "rz 10"] {
            let command = reader.read(line).unwrap();
            scene.apply(&command, &mut buffer);
        }
        scene.render(&mut buffer);
        assert_ne!(buffer, first);

        scene.apply(&reader.read("m").unwrap(), &mut buffer);
        scene.render(&mut buffer);
        assert_eq!(buffer, first);
    }

    #[test]
    fn test_full_turn_restores_projection() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let (mut scene, mut buffer) = cube_scene();
            scene.apply(&Command::Rotate(Axis::X, 0.3), &mut buffer);
            let before = screen_positions(&scene, &buffer);

            let step = 1.0_f32.to_radians();
            for _ in 0..360 {
                scene.apply(&Command::Rotate(axis, step), &mut buffer);
            }

            let after = screen_positions(&scene, &buffer);
            for (a, b) in before.iter().zip(&after) {
                assert!((a.x - b.x).abs() < 0.05, "{axis:?}: {a:?} vs {b:?}");
                assert!((a.y - b.y).abs() < 0.05, "{axis:?}: {a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_scale_round_trip_restores_bounds() {
        let (mut scene, mut buffer) = cube_scene();
        scene.apply(&Command::Rotate(Axis::Y, 0.5), &mut buffer);
        let before = triangle_bounds(&scene, &buffer);

        scene.apply(&Command::Scale(ScaleAxis::All, 0.5), &mut buffer);
        assert_ne!(triangle_bounds(&scene, &buffer), before);
        scene.apply(&Command::Scale(ScaleAxis::All, 2.0), &mut buffer);

        let after = triangle_bounds(&scene, &buffer);
        for (a, b) in before.iter().zip(&after) {
            for (x, y) in a.iter().zip(b) {
                assert!((x - y).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_translate_round_trip() {
        let (mut scene, mut buffer) = cube_scene();
        let before = scene.transform.clone();
        scene.apply(&Command::Translate(Axis::Y, 0.3), &mut buffer);
        scene.apply(&Command::Translate(Axis::Y, -0.3), &mut buffer);
        assert!((scene.transform.translation() - before.translation()).norm() < 1e-6);
    }

    #[test]
    fn test_translate_x_moves_right_on_screen() {
        let (mut scene, mut buffer) = cube_scene();
        let before = screen_positions(&scene, &buffer);
        scene.apply(&Command::Translate(Axis::X, 0.5), &mut buffer);
        let after = screen_positions(&scene, &buffer);
        assert!(before.iter().zip(&after).all(|(a, b)| b.x > a.x));
    }

    #[test]
    fn test_triangle_behind_camera_draws_nothing() {
        // The initial view puts object z = 6 at camera z = -1
        let mesh = single_triangle([
            Vertex::new(-1.0, -1.0, 6.0),
            Vertex::new(1.0, -1.0, 6.0),
            Vertex::new(0.0, 1.0, 6.0),
        ]);
        let scene = Scene::new(mesh);
        let mut buffer = FrameBuffer::new(WIDTH, HEIGHT);
        let stats = scene.render(&mut buffer);

        assert_eq!(stats.culled, 1);
        assert_eq!(stats.pixels, 0);
        assert_eq!(buffer.covered(), 0);
        assert!(scene.projected_vertices(&buffer).iter().all(Option::is_none));
    }

    #[test]
    fn test_crossing_triangle_shares_material() {
        // Camera z of 2, 2 and -1: one corner behind the near plane
        let mesh = single_triangle([
            Vertex::new(-1.0, -1.0, 3.0),
            Vertex::new(1.0, -1.0, 3.0),
            Vertex::new(0.0, 1.0, 6.0),
        ]);
        let mut scene = Scene::new(mesh);
        let mut buffer = FrameBuffer::new(WIDTH, HEIGHT);
        scene.apply(&Command::ToggleShading, &mut buffer);

        let stats = scene.render(&mut buffer);
        assert_eq!(stats.clipped, 2);
        assert_eq!(stats.culled, 0);
        assert!(buffer.covered() > 0);
        assert_eq!(buffer.glyph(WIDTH / 2, HEIGHT / 2), Some(MATERIAL_PALETTE[0]));
        assert!(buffer
            .glyphs()
            .iter()
            .all(|&c| c == ' ' || c == MATERIAL_PALETTE[0]));
    }

    #[test]
    fn test_material_mode_uses_palette_in_mesh_order() {
        let (mut scene, mut buffer) = cube_scene();
        scene.apply(&Command::ToggleShading, &mut buffer);
        scene.render(&mut buffer);
        assert!(buffer
            .glyphs()
            .iter()
            .all(|&c| c == ' ' || MATERIAL_PALETTE[..12].contains(&c)));
    }

    #[test]
    fn test_orthographic_toggle_round_trip() {
        let (mut scene, mut buffer) = cube_scene();
        scene.render(&mut buffer);
        let perspective = buffer.clone();

        scene.apply(&Command::ToggleProjection, &mut buffer);
        assert_eq!(scene.projection, ProjectionMode::Orthographic);
        scene.render(&mut buffer);
        assert!(buffer.covered() > 0);

        scene.apply(&Command::ToggleProjection, &mut buffer);
        scene.render(&mut buffer);
        assert_eq!(buffer, perspective);
    }

    #[test]
    fn test_resize_command() {
        let (mut scene, mut buffer) = cube_scene();
        scene.apply(&Command::Resize(120, 40), &mut buffer);
        assert_eq!((buffer.width(), buffer.height()), (120, 40));

        scene.apply(&Command::Resize(0, 40), &mut buffer);
        assert_eq!((buffer.width(), buffer.height()), (120, 40));

        let stats = scene.render(&mut buffer);
        assert!(stats.pixels > 0);
    }

    #[test]
    fn test_oversized_resize_keeps_rendering() {
        let (mut scene, mut buffer) = cube_scene();
        let mut reader = CommandReader::new();
        let resize = reader.read("v 4294967296x4294967296").unwrap();
        scene.apply(&resize, &mut buffer);
        assert_eq!((buffer.width(), buffer.height()), (WIDTH, HEIGHT));

        let stats = scene.render(&mut buffer);
        assert!(stats.pixels > 0);
    }

    #[test]
    fn test_replace_mesh_keeps_view() {
        let (mut scene, mut buffer) = cube_scene();
        scene.apply(&Command::Rotate(Axis::X, 0.5), &mut buffer);
        scene.apply(&Command::ToggleShading, &mut buffer);
        let transform = scene.transform.clone();

        let triangle = single_triangle([
            Vertex::new(-1.0, -1.0, 0.0),
            Vertex::new(1.0, -1.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        ]);
        scene.replace_mesh(triangle.clone());
        assert_eq!(scene.mesh(), &triangle);
        assert_eq!(scene.transform, transform);
        assert_eq!(scene.shading, ShadingMode::Material);

        let stats = scene.render(&mut buffer);
        assert_eq!(stats.triangles, 1);
        assert!(buffer.glyphs().iter().all(|&g| g == ' ' || g == MATERIAL_PALETTE[0]));
    }

    #[test]
    fn test_help_and_quit_leave_state() {
        let (mut scene, mut buffer) = cube_scene();
        let transform = scene.transform.clone();
        scene.apply(&Command::Help, &mut buffer);
        scene.apply(&Command::Quit, &mut buffer);
        assert_eq!(scene.transform, transform);
        assert_eq!(buffer, FrameBuffer::new(WIDTH, HEIGHT));
    }

    #[test]
    fn test_status_mentions_counts() {
        let (scene, _) = cube_scene();
        let status = scene.status();
        assert!(status.starts_with("8 vertices, 12 triangles"));
        assert!(status.contains("perspective"));
    }
}
