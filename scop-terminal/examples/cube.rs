/// Example: spin the built-in cube without a model file
///
/// Usage: cargo run --example cube

use scop_core::{load_texture, Mesh, ObjModel};
use scop_terminal::{Settings, TerminalApp};

fn main() -> anyhow::Result<()> {
    let settings = Settings::default();
    let model = ObjModel::from_mesh(Mesh::cube(2.0));
    let image = load_texture(&settings.display.texture)?;

    println!("Starting terminal renderer (press Esc to quit)...");
    let mut app = TerminalApp::new(model, &image, settings)?;
    app.run()?;

    Ok(())
}
