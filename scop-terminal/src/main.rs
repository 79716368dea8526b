/// Scop - interactive OBJ viewer for the terminal
///
/// Usage: scop <model.obj>
/// Controls:
///   - WASD / Arrow Keys: Rotate the model
///   - Q/E: Roll rotation
///   - R: Reset orientation
///   - =/-: Zoom in / out
///   - T: Fade between flat colours and texture
///   - F: Switch smooth / per-face shading
///   - ESC: Quit

use anyhow::Context;
use scop_core::{load_obj, load_texture};
use scop_terminal::{Settings, TerminalApp};
use std::env;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let path = match model_path(&args) {
        Ok(path) => path,
        Err(usage) => {
            eprintln!("{}", usage);
            return ExitCode::from(1);
        }
    };

    ExitCode::from(exit_status(&run(path)))
}

/// The single model argument, or the usage line.
fn model_path(args: &[String]) -> Result<&str, String> {
    match args {
        [_, path] => Ok(path.as_str()),
        _ => Err(format!(
            "usage: {} <model.obj>",
            args.first().map_or("scop", String::as_str)
        )),
    }
}

/// Print a failed run and map it to the process status.
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {:#}", e);
            1
        }
    }
}

fn run(path: &str) -> anyhow::Result<()> {
    let settings = Settings::load();

    info!("Loading model: {}", path);
    let model = load_obj(path).with_context(|| format!("failed to load model '{}'", path))?;
    info!(
        vertices = model.mesh.vertex_count(),
        triangles = model.mesh.triangle_count(),
        "Loaded model"
    );

    let texture_path = &settings.display.texture;
    let image = load_texture(texture_path)
        .with_context(|| format!("failed to load texture '{}'", texture_path.display()))?;
    info!(
        width = image.width,
        height = image.height,
        channels = image.channels,
        "Loaded texture"
    );

    let mut app = TerminalApp::new(model, &image, settings)?;
    app.run().context("terminal rendering failed")?;
    Ok(())
}
