use rand::Rng;

use crate::config::StageConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Everything that changes while playing. Owned by [`super::Progression`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub current_room_id: u32,
    pub avatar_x: f32,
    pub avatar_y: f32,
    pub solved: bool,
    /// Reserved; nothing puts items here yet.
    pub inventory: Vec<String>,
}

impl GameState {
    pub fn new(room_id: u32, x: f32, y: f32) -> Self {
        GameState {
            current_room_id: room_id,
            avatar_x: x,
            avatar_y: y,
            solved: false,
            inventory: Vec::new(),
        }
    }

    /// Take one step, staying inside `[0, size - avatar]` on both axes.
    pub fn step(&mut self, direction: Direction, stage: &StageConfig) {
        let max_x = stage.width - stage.avatar_size;
        let max_y = stage.height - stage.avatar_size;
        match direction {
            Direction::Up => self.avatar_y = (self.avatar_y - stage.step).max(0.0),
            Direction::Down => self.avatar_y = (self.avatar_y + stage.step).min(max_y),
            Direction::Left => self.avatar_x = (self.avatar_x - stage.step).max(0.0),
            Direction::Right => self.avatar_x = (self.avatar_x + stage.step).min(max_x),
        }
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        (x - self.avatar_x).hypot(y - self.avatar_y)
    }
}

/// HUD room label, zero-padded to three digits.
pub fn room_label(room_id: u32) -> String {
    format!("ROOM: #{room_id:03}")
}

const TRACE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const TRACE_LEN: usize = 6;

/// Decorative base-36 token shown in the HUD. Means nothing.
pub fn trace_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..TRACE_LEN)
        .map(|_| TRACE_ALPHABET[rng.gen_range(0..TRACE_ALPHABET.len())] as char)
        .collect()
}
