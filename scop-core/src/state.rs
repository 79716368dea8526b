/// Viewer state and the commands that change it
///
/// Input handling produces [`Command`]s; the frame loop folds them into a
/// [`ViewerState`] value and reads the result when drawing.
use crate::transform::{TransformState, ZoomLimits};
use crate::uv::Axis;

/// Default rotation per key press, in radians.
pub const ROTATION_STEP: f32 = 0.01;

/// Seconds for the texture blend to fade fully in or out.
pub const BLEND_FADE_SECONDS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rotate one step about an axis; `positive` selects the direction.
    Rotate { axis: Axis, positive: bool },
    ResetOrientation,
    ZoomIn,
    ZoomOut,
    ToggleTexture,
    ToggleShading,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub use_texture: bool,
    /// 0 shows the flat colours, 1 the texture.
    pub blend: f32,
    pub per_face: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            use_texture: false,
            blend: 0.0,
            per_face: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerState {
    pub transform: TransformState,
    pub render: RenderSettings,
    pub rotation_step: f32,
    pub should_close: bool,
}

impl ViewerState {
    pub fn new(limits: ZoomLimits, rotation_step: f32) -> Self {
        Self {
            transform: TransformState::new(limits),
            render: RenderSettings::default(),
            rotation_step,
            should_close: false,
        }
    }

    /// Apply one input command.
    pub fn apply(mut self, command: Command) -> Self {
        match command {
            Command::Rotate { axis, positive } => {
                let angle = if positive {
                    self.rotation_step
                } else {
                    -self.rotation_step
                };
                self.transform.rotate(&axis.unit(), angle);
            }
            Command::ResetOrientation => self.transform.reset_orientation(),
            // Zooming in brings the eye closer, so the factor shrinks
            Command::ZoomIn => self.transform.zoom_by(-1.0),
            Command::ZoomOut => self.transform.zoom_by(1.0),
            Command::ToggleTexture => self.render.use_texture = !self.render.use_texture,
            Command::ToggleShading => self.render.per_face = !self.render.per_face,
            Command::Quit => self.should_close = true,
        }
        self
    }

    /// Advance time-based state by `dt` seconds.
    pub fn advance(mut self, dt: f32) -> Self {
        let delta = dt / BLEND_FADE_SECONDS;
        let blend = if self.render.use_texture {
            self.render.blend + delta
        } else {
            self.render.blend - delta
        };
        self.render.blend = blend.clamp(0.0, 1.0);
        self
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(ZoomLimits::default(), ROTATION_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::quat_identity;

    #[test]
    fn test_rotate_then_reset() {
        let state = ViewerState::default()
            .apply(Command::Rotate {
                axis: Axis::X,
                positive: true,
            })
            .apply(Command::Rotate {
                axis: Axis::Z,
                positive: false,
            });
        assert_ne!(state.transform.orientation, quat_identity());
        assert!((state.transform.orientation.norm() - 1.0).abs() < 1e-6);

        let state = state.apply(Command::ResetOrientation);
        assert_eq!(state.transform.orientation, quat_identity());
    }

    #[test]
    fn test_opposite_steps_cancel() {
        let state = ViewerState::default()
            .apply(Command::Rotate {
                axis: Axis::Y,
                positive: true,
            })
            .apply(Command::Rotate {
                axis: Axis::Y,
                positive: false,
            });
        assert!((state.transform.orientation.coords - quat_identity().coords).norm() < 1e-6);
    }

    #[test]
    fn test_zoom_direction() {
        let state = ViewerState::default().apply(Command::ZoomIn);
        assert!((state.transform.zoom - 0.9).abs() < 1e-6);
        let state = state.apply(Command::ZoomOut).apply(Command::ZoomOut);
        assert!((state.transform.zoom - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_toggles_and_quit() {
        let state = ViewerState::default()
            .apply(Command::ToggleTexture)
            .apply(Command::ToggleShading);
        assert!(state.render.use_texture);
        assert!(state.render.per_face);
        assert!(!state.should_close);
        assert!(state.apply(Command::Quit).should_close);
    }

    #[test]
    fn test_blend_fades_and_clamps() {
        let state = ViewerState::default().apply(Command::ToggleTexture);
        let state = state.advance(0.25);
        assert!((state.render.blend - 0.25).abs() < 1e-6);
        let state = state.advance(5.0);
        assert_eq!(state.render.blend, 1.0);

        let state = state.apply(Command::ToggleTexture).advance(0.5);
        assert!((state.render.blend - 0.5).abs() < 1e-6);
        assert_eq!(state.advance(10.0).render.blend, 0.0);
    }
}
