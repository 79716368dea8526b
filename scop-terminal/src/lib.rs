/// Terminal-based viewer for OBJ models
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Vector3;
use scop_core::{
    BoundingBox, Camera, FrameMatrices, ObjModel, SceneBuffers, TextureImage, Transform,
    ViewerState,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod input;
pub mod renderer;
pub mod settings;

pub use renderer::{AsciiRenderer, Shading, Texture};
pub use settings::Settings;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: SceneBuffers,
    bbox: BoundingBox,
    camera: Camera,
    state: ViewerState,
    renderer: AsciiRenderer,
    texture: Texture,
    settings: Settings,
    last_tick: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Prepare both shading variants and frame the model for the camera.
    pub fn new(model: ObjModel, image: &TextureImage, settings: Settings) -> anyhow::Result<Self> {
        let bbox = BoundingBox::from_positions(&model.mesh.positions)?.fit_unit_sphere();
        let camera = Camera::framing(bbox.radius(), &settings.camera_config());
        let scene = SceneBuffers::build(&model);
        info!(
            center = ?bbox.center,
            scale = bbox.scale,
            distance = camera.distance,
            "Framed model"
        );

        let (width, height) = terminal::size()?;
        let state = ViewerState::new(settings.zoom_limits(), settings.controls.rotation_step);
        let now = Instant::now();

        Ok(Self {
            scene,
            bbox,
            camera,
            state,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            texture: Texture::from_image(image),
            settings,
            last_tick: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let fps = self.settings.display.target_fps.max(1);
        let target_frame_time = Duration::from_secs_f32(1.0 / fps as f32);

        while !self.state.should_close {
            let frame_start = Instant::now();

            // Handle input
            self.handle_input()?;

            // Update
            let dt = (frame_start - self.last_tick).as_secs_f32();
            self.last_tick = frame_start;
            self.state = self.state.advance(dt);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        info!("Viewer closed");
        Ok(())
    }

    /// Drain every pending event without blocking.
    fn handle_input(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(command) = input::command_for(&key) {
                        debug!(?command, "Input");
                        self.state = self.state.apply(command);
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "Resize");
                    self.renderer.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Matrices for the current state and terminal size.
    pub fn frame(&self) -> FrameMatrices {
        let (width, height) = self.renderer.size();
        let aspect =
            width as f32 / (height.max(1) as f32 * self.settings.display.cell_aspect);
        Transform::frame(&self.camera, &self.bbox, &self.state.transform, aspect)
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.frame();
        let [lx, ly, lz] = self.settings.display.light_direction;
        let shading = Shading {
            texture: &self.texture,
            blend: self.state.render.blend,
            light_direction: Vector3::new(lx, ly, lz),
        };
        let mesh = self.scene.select(self.state.render.per_face);

        // Clear renderer
        self.renderer.clear();

        // Render mesh
        self.renderer.render_mesh(mesh, &frame, &shading);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let render = &self.state.render;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "scop | FPS: {:.1} | {} | texture {:.0}% | zoom {:.1} | {}",
                self.fps,
                if render.per_face { "per-face" } else { "smooth" },
                render.blend * 100.0,
                self.state.transform.zoom,
                input::HELP
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
