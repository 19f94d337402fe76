/// meshglyph - view OBJ meshes as text
///
/// Runs the single key front end by default, or the typed command front end
/// with `--line`. Without a model a unit cube is shown.
use anyhow::{Context, Result};
use clap::Parser;
use meshglyph_core::{load_obj_file, Mesh, Scene};
use meshglyph_terminal::args::Opts;
use meshglyph_terminal::{LineApp, TerminalApp};

fn main() -> Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();

    let mesh = match &opts.model {
        Some(path) => load_obj_file(path)
            .with_context(|| format!("failed to load model {}", path.display()))?,
        None => {
            log::info!("no model given, showing a cube");
            Mesh::cube(1.0)
        }
    };
    log::info!(
        "loaded {} vertices and {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    let mut scene = Scene::new(mesh);
    scene.projection = opts.projection();
    scene.shading = opts.shading();

    if opts.line {
        LineApp::new(scene, opts.width, opts.height)
            .with_color(opts.color)
            .with_frame_time(opts.frame_time)
            .with_help(!opts.no_help)
            .run()
            .context("line viewer failed")?;
    } else {
        TerminalApp::new(scene)
            .context("failed to query the terminal size")?
            .with_color(opts.color)
            .with_frame_time(opts.frame_time)
            .with_help(!opts.no_help)
            .run()
            .context("terminal viewer failed")?;
    }

    Ok(())
}
