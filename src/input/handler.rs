use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Intent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Intent),
    Quit,
    None,
}

impl KeyAction {
    /// Direction keys only matter while the snake is moving
    pub fn is_turn(&self) -> bool {
        matches!(self, KeyAction::Game(Intent::Turn(_)))
    }
}

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
            KeyCode::Up => turn(Direction::Up),
            KeyCode::Down => turn(Direction::Down),
            KeyCode::Left => turn(Direction::Left),
            KeyCode::Right => turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => turn(Direction::Right),

            // Lifecycle
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
                KeyAction::Game(Intent::Start)
            }
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::Game(Intent::PauseToggle)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Game(Intent::Reset),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

fn turn(direction: Direction) -> KeyAction {
    KeyAction::Game(Intent::Turn(direction))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &InputHandler, code: KeyCode) -> KeyAction {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Up), turn(Direction::Up));
        assert_eq!(press(&handler, KeyCode::Down), turn(Direction::Down));
        assert_eq!(press(&handler, KeyCode::Left), turn(Direction::Left));
        assert_eq!(press(&handler, KeyCode::Right), turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('w')), turn(Direction::Up));
        assert_eq!(press(&handler, KeyCode::Char('a')), turn(Direction::Left));
        assert_eq!(press(&handler, KeyCode::Char('s')), turn(Direction::Down));
        assert_eq!(press(&handler, KeyCode::Char('d')), turn(Direction::Right));

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(w_upper), turn(Direction::Up));
    }

    #[test]
    fn test_lifecycle_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Enter),
            KeyAction::Game(Intent::Start)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('n')),
            KeyAction::Game(Intent::Start)
        );
        assert_eq!(
            press(&handler, KeyCode::Char(' ')),
            KeyAction::Game(Intent::PauseToggle)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('P')),
            KeyAction::Game(Intent::PauseToggle)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('r')),
            KeyAction::Game(Intent::Reset)
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(&handler, KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();
        assert_eq!(press(&handler, KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn test_is_turn() {
        assert!(turn(Direction::Left).is_turn());
        assert!(!KeyAction::Game(Intent::Reset).is_turn());
        assert!(!KeyAction::Quit.is_turn());
    }
}
