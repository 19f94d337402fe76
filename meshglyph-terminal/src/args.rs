/// Command line options
use std::path::PathBuf;

use clap::Parser;
use meshglyph_core::{ProjectionMode, ShadingMode};

#[derive(Parser, Debug, Clone)]
#[clap(name = "meshglyph", about = "Render OBJ meshes as text in the terminal")]
pub struct Opts {
    /// The OBJ model to view (def: built-in cube)
    #[clap(value_name = "MODEL")]
    pub model: Option<PathBuf>,

    /// Read typed commands line by line instead of single key presses
    #[clap(long)]
    pub line: bool,

    /// Viewport width in the line front end
    #[clap(long, value_name = "CELLS", default_value = "80")]
    pub width: usize,

    /// Viewport height in the line front end
    #[clap(long, value_name = "CELLS", default_value = "24")]
    pub height: usize,

    /// Start with orthographic projection
    #[clap(long)]
    pub ortho: bool,

    /// Start with palette shading instead of lighting
    #[clap(long)]
    pub material: bool,

    /// Draw cells as colored blocks
    #[clap(short, long)]
    pub color: bool,

    /// Show how long each frame took
    #[clap(long, alias = "benchmark")]
    pub frame_time: bool,

    /// Skip the help screen at start
    #[clap(long)]
    pub no_help: bool,
}

impl Opts {
    pub fn projection(&self) -> ProjectionMode {
        if self.ortho {
            ProjectionMode::Orthographic
        } else {
            ProjectionMode::Perspective
        }
    }

    pub fn shading(&self) -> ShadingMode {
        if self.material {
            ShadingMode::Material
        } else {
            ShadingMode::Lit
        }
    }
}
