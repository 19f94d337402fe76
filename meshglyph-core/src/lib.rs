/// meshglyph core library - software rasterization of meshes into glyph grids
///
/// This library holds the whole render pipeline: the cumulative model
/// transform, near-plane clipping, projection, barycentric scan filling with
/// a depth test, and two-tone or palette shading. It also parses OBJ meshes
/// and the viewer's command syntax. Presentation lives elsewhere.

pub mod clip;
pub mod command;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod shading;
pub mod transform;

// Re-export commonly used types
pub use command::{Axis, Command, CommandReader, ScaleAxis};
pub use error::{DegenerateTriangle, LoadError};
pub use framebuffer::FrameBuffer;
pub use geometry::{Mesh, Triangle, Vertex};
pub use obj::{load_obj_file, parse_obj};
pub use projection::{ProjectionMode, Projector, ScreenVertex};
pub use scene::{FrameStats, Scene};
pub use shading::ShadingMode;
pub use transform::{normalized_angle, RotationState, TransformStack};
