/// Keyboard mapping onto viewer commands
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use scop_core::{Axis, Command};

pub const HELP: &str =
    "WASD/Arrows=Rotate Q/E=Roll R=Reset +/-=Zoom T=Texture F=Flat Esc=Quit";

/// The command bound to a key press, if any.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let rotate = |axis, positive| Some(Command::Rotate { axis, positive });
    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => rotate(Axis::X, true),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => rotate(Axis::X, false),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => rotate(Axis::Y, true),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => rotate(Axis::Y, false),
        KeyCode::Char('e') | KeyCode::Char('E') => rotate(Axis::Z, true),
        KeyCode::Char('q') | KeyCode::Char('Q') => rotate(Axis::Z, false),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::ResetOrientation),
        KeyCode::Char('=') | KeyCode::Char('+') => Some(Command::ZoomIn),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Command::ZoomOut),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Command::ToggleTexture),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::ToggleShading),
        KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
