use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Control, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Stage a new heading
    Turn(Direction),
    /// Lifecycle transition
    Control(Control),
    Quit,
    None,
}

/// Maps terminal key presses to game actions
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w' | 'W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('a' | 'A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('s' | 'S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('d' | 'D') => KeyAction::Turn(Direction::Right),

            // Lifecycle
            KeyCode::Char(' ') => KeyAction::Control(Control::TogglePause),
            KeyCode::Enter => KeyAction::Control(Control::Confirm),
            KeyCode::Char('g' | 'G') => KeyAction::Control(Control::Start),
            KeyCode::Char('p' | 'P') => KeyAction::Control(Control::Pause),
            KeyCode::Char('r' | 'R') => KeyAction::Control(Control::Restart),

            KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
