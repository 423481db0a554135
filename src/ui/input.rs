use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Direction, Intent};

/// What a key press means to the terminal front end.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Game(Intent),
    /// Submit whatever is typed in the puzzle input.
    SubmitInput,
    /// Forward the key to the puzzle input.
    Edit(KeyEvent),
    ScrollLogUp,
    ScrollLogDown,
    Quit,
}

pub fn map_key(key: KeyEvent, puzzle_open: bool) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    if puzzle_open {
        return Some(match key.code {
            KeyCode::Enter => Command::SubmitInput,
            KeyCode::Esc => Command::Game(Intent::Close),
            _ => Command::Edit(key),
        });
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Command::Game(Intent::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Command::Game(Intent::Move(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Command::Game(Intent::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Game(Intent::Move(Direction::Right))
        }
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char(' ') => Command::Game(Intent::Door),
        KeyCode::Char(c @ '1'..='9') => {
            Command::Game(Intent::Inspect(c as usize - '1' as usize))
        }
        KeyCode::PageUp => Command::ScrollLogUp,
        KeyCode::PageDown => Command::ScrollLogDown,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn wasd_and_arrows_move() {
        for (code, dir) in [
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('S'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('d'), Direction::Right),
        ] {
            assert_eq!(
                map_key(key(code), false),
                Some(Command::Game(Intent::Move(dir)))
            );
        }
    }

    #[test]
    fn digits_pick_interactables() {
        assert_eq!(
            map_key(key(KeyCode::Char('1')), false),
            Some(Command::Game(Intent::Inspect(0)))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('9')), false),
            Some(Command::Game(Intent::Inspect(8)))
        );
        assert_eq!(map_key(key(KeyCode::Char('0')), false), None);
    }

    #[test]
    fn puzzle_keys_go_to_the_input() {
        assert_eq!(map_key(key(KeyCode::Enter), true), Some(Command::SubmitInput));
        assert_eq!(
            map_key(key(KeyCode::Esc), true),
            Some(Command::Game(Intent::Close))
        );
        let w = key(KeyCode::Char('w'));
        assert_eq!(map_key(w, true), Some(Command::Edit(w)));
        assert_eq!(
            map_key(key(KeyCode::Char('q')), true),
            Some(Command::Edit(key(KeyCode::Char('q'))))
        );
    }

    #[test]
    fn ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, true), Some(Command::Quit));
        assert_eq!(map_key(ctrl_c, false), Some(Command::Quit));
    }
}
