use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use super::input::{map_key, Command};
use super::stage::{hit_test, Projection, Target};
use crate::game::{Effect, Intent, Phase, Progression, Tone};
use crate::puzzle::Interactable;
use crate::save::SaveStore;

/// Most lines kept in the on-screen log.
const LOG_CAPACITY: usize = 500;

pub struct Modal<'a> {
    pub prompt: String,
    pub input: TextArea<'a>,
    pub feedback: Option<(String, Tone)>,
}

impl<'a> Modal<'a> {
    fn new(prompt: String) -> Self {
        let mut input = TextArea::default();
        input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Answer [Enter: Submit | Esc: Close] "),
        );
        input.set_cursor_line_style(Style::default());
        Modal {
            prompt,
            input,
            feedback: None,
        }
    }

    fn text(&self) -> String {
        self.input.lines().join(" ")
    }
}

/// Terminal view of a running game. Mirrors what the effects describe.
pub struct App<'a, S: SaveStore> {
    pub game: Progression<S>,
    pub log: Vec<String>,
    pub log_scroll: u16,
    pub room_id: u32,
    pub kind: String,
    pub trace: String,
    pub interactables: Vec<Interactable>,
    pub avatar: (f32, f32),
    pub modal: Option<Modal<'a>>,
    /// Where the stage was last drawn, for mouse hit testing.
    pub stage_area: Option<Rect>,
    pub quit: bool,
}

impl<'a, S: SaveStore> App<'a, S> {
    pub fn new(game: Progression<S>, startup: Vec<Effect>) -> Self {
        let mut app = App {
            room_id: game.state().current_room_id,
            kind: game.room().kind.clone(),
            trace: game.trace().to_string(),
            interactables: game.room().interactables.clone(),
            avatar: (game.state().avatar_x, game.state().avatar_y),
            game,
            log: Vec::new(),
            log_scroll: 0,
            modal: None,
            stage_area: None,
            quit: false,
        };
        app.apply(startup);
        app
    }

    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Log(line) => self.push_log(line),
                Effect::AvatarMoved { x, y } => self.avatar = (x, y),
                Effect::RoomEntered {
                    room_id,
                    kind,
                    interactables,
                    trace,
                } => {
                    self.room_id = room_id;
                    self.kind = kind;
                    self.interactables = interactables;
                    self.trace = trace;
                }
                Effect::PuzzleOpened { prompt } => self.modal = Some(Modal::new(prompt)),
                Effect::Feedback { text, tone } => {
                    if let Some(modal) = self.modal.as_mut() {
                        modal.feedback = Some((text, tone));
                    }
                }
                Effect::PuzzleClosed => self.modal = None,
                Effect::Saved(_) => {}
            }
        }
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
        // Follow the newest line.
        self.log_scroll = 0;
    }

    pub fn dispatch(&mut self, intent: Intent, now: Instant) {
        let effects = self.game.handle(intent, now);
        self.apply(effects);
    }

    pub fn tick(&mut self, now: Instant) {
        let effects = self.game.tick(now);
        self.apply(effects);
    }

    pub fn on_key(&mut self, key: crossterm::event::KeyEvent, now: Instant) {
        let puzzle_open = self.game.phase() == Phase::PuzzleOpen;
        match map_key(key, puzzle_open) {
            Some(Command::Game(intent)) => self.dispatch(intent, now),
            Some(Command::SubmitInput) => {
                let text = self.modal.as_ref().map(Modal::text).unwrap_or_default();
                self.dispatch(Intent::Submit(text), now);
            }
            Some(Command::Edit(key)) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.input.input(key);
                }
            }
            Some(Command::ScrollLogUp) => {
                let max = self.log.len().saturating_sub(1) as u16;
                self.log_scroll = (self.log_scroll + 3).min(max);
            }
            Some(Command::ScrollLogDown) => {
                self.log_scroll = self.log_scroll.saturating_sub(3);
            }
            Some(Command::Quit) => self.quit = true,
            None => {}
        }
    }

    pub fn on_click(&mut self, column: u16, row: u16, now: Instant) {
        let Some(area) = self.stage_area else {
            return;
        };
        let projection = Projection::new(area, self.game.stage());
        let door = (self.game.rules().door_x, self.game.rules().door_y);
        match hit_test(&projection, door, &self.interactables, column, row) {
            Some(Target::Door) => self.dispatch(Intent::Door, now),
            Some(Target::Interactable(index)) => self.dispatch(Intent::Inspect(index), now),
            None => {}
        }
    }
}

pub fn feedback_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Failure => Color::Red,
    }
}
