/// Example: render a single frame of a model to stdout
///
/// Usage: cargo run --example snapshot -- [path/to/model.obj] [yaw-degrees]
use anyhow::{Context, Result};
use meshglyph_core::{load_obj_file, Command, FrameBuffer, Mesh, Scene};
use meshglyph_terminal::GlyphPresenter;
use std::env;
use std::io::{self, Write};

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mesh = match args.get(1) {
        Some(path) => load_obj_file(path).with_context(|| format!("failed to load {path}"))?,
        None => Mesh::cube(1.0),
    };
    let yaw: f32 = match args.get(2) {
        Some(degrees) => degrees.parse().context("yaw must be a number")?,
        None => 30.0,
    };

    let mut buffer = FrameBuffer::new(80, 24);
    let mut scene = Scene::new(mesh);
    scene.apply(&Command::Rotate(meshglyph_core::Axis::Y, yaw.to_radians()), &mut buffer);
    scene.apply(&Command::Rotate(meshglyph_core::Axis::X, 0.4), &mut buffer);

    let stats = scene.render(&mut buffer);

    let mut stdout = io::stdout();
    GlyphPresenter::new(false).draw_lines(&mut stdout, &buffer, scene.shading)?;
    writeln!(stdout, "{}", scene.status())?;
    writeln!(stdout, "{stats:?}")?;
    stdout.flush()?;
    Ok(())
}
