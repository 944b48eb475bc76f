use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Action, Direction};

/// What a key press means to the running game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Pause,
    Restart,
    Quit,
    None,
}

/// Maps terminal key events onto game commands
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Releases and repeats only show up on terminals with the kitty protocol
        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = steering_direction(key.code) {
            return KeyAction::GameAction(Action::Move(direction));
        }

        match key.code {
            KeyCode::Char(' ') => KeyAction::Pause,
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'p' => KeyAction::Pause,
                'r' => KeyAction::Restart,
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrow keys and WASD, either case
fn steering_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn moves(direction: Direction) -> KeyAction {
        KeyAction::GameAction(Action::Move(direction))
    }

    #[test]
    fn test_steering_keys() {
        let handler = InputHandler::new();
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Char('D'), Direction::Right),
        ];

        for (code, direction) in cases {
            assert_eq!(handler.handle_key_event(press(code)), moves(direction));
        }
    }

    #[test]
    fn test_control_keys() {
        let handler = InputHandler::new();

        assert_eq!(handler.handle_key_event(press(KeyCode::Char(' '))), KeyAction::Pause);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('P'))), KeyAction::Pause);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('r'))), KeyAction::Restart);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('x'))), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_release_is_ignored() {
        let handler = InputHandler::new();

        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(handler.handle_key_event(release), KeyAction::None);
    }
}
