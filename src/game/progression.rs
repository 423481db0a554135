//! Room and puzzle progression.
//!
//! The player explores a room, opens the door's puzzle when standing close to
//! it, answers it, and walks through the door to the next room. All mutation of
//! [`GameState`] happens here; each call returns the [`Effect`]s a presentation
//! layer needs to redraw.

use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;

use super::state::{trace_token, Direction, GameState};
use super::timer::Deadline;
use crate::config::{RulesConfig, StageConfig};
use crate::puzzle::{generate, normalize_answer, Catalog, Interactable, RoomDefinition};
use crate::save::{load_or_none, SaveRecord, SaveStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Exploring,
    PuzzleOpen,
}

/// Player input, already translated from keys or clicks.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Move(Direction),
    Door,
    /// Click on the interactable at this index in the current room.
    Inspect(usize),
    Submit(String),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
}

/// A change the presentation layer should reflect.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Log(String),
    AvatarMoved { x: f32, y: f32 },
    RoomEntered {
        room_id: u32,
        kind: String,
        interactables: Vec<Interactable>,
        trace: String,
    },
    PuzzleOpened { prompt: String },
    Feedback { text: String, tone: Tone },
    PuzzleClosed,
    Saved(SaveRecord),
}

/// How a submitted answer is judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerRule {
    /// Catalog rooms: normalized input must equal the stored answer.
    Exact(String),
    /// Generated rooms: any non-empty input passes. The generated answer is
    /// never kept, so there is nothing to compare against.
    AnyNonEmpty,
}

impl AnswerRule {
    pub fn accepts(&self, raw: &str) -> bool {
        let input = normalize_answer(raw);
        match self {
            AnswerRule::Exact(answer) => input == *answer,
            AnswerRule::AnyNonEmpty => !input.is_empty(),
        }
    }
}

pub struct Progression<S: SaveStore> {
    stage: StageConfig,
    rules: RulesConfig,
    catalog: Catalog,
    store: S,
    rng: StdRng,
    state: GameState,
    phase: Phase,
    room: RoomDefinition,
    prompt: Option<String>,
    auto_close: Deadline,
    trace: String,
}

impl<S: SaveStore> Progression<S> {
    /// Seed the session from the store and enter the saved room (or room 1).
    pub fn start(
        stage: StageConfig,
        rules: RulesConfig,
        catalog: Catalog,
        mut store: S,
        mut rng: StdRng,
    ) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();
        let saved = load_or_none(&mut store);
        let room_id = saved.map(|r| r.room_id).unwrap_or(1);
        if saved.is_some() {
            info!("resuming at room {}", room_id);
            effects.push(Effect::Log("> SYSTEM: Save file loaded.".to_string()));
        }

        let state = GameState::new(room_id, rules.spawn_x, rules.spawn_y);
        let room = Self::room_for(&catalog, &mut rng, room_id);
        let mut game = Progression {
            stage,
            rules,
            catalog,
            store,
            rng,
            state,
            phase: Phase::Exploring,
            room,
            prompt: None,
            auto_close: Deadline::default(),
            trace: String::new(),
        };
        game.enter_room(room_id, &mut effects);
        effects.push(Effect::Log("SYSTEM READY. Use WASD to move.".to_string()));
        (game, effects)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn room(&self) -> &RoomDefinition {
        &self.room
    }

    /// Prompt of the open puzzle, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn trace(&self) -> &str {
        &self.trace
    }

    pub fn stage(&self) -> &StageConfig {
        &self.stage
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn auto_close_pending(&self) -> bool {
        self.auto_close.is_pending()
    }

    pub fn answer_rule(&self) -> AnswerRule {
        match self.catalog.find(self.state.current_room_id) {
            Some(room) => AnswerRule::Exact(room.expected_answer.clone()),
            None => AnswerRule::AnyNonEmpty,
        }
    }

    pub fn handle(&mut self, intent: Intent, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        match intent {
            Intent::Move(direction) => self.on_move(direction, &mut effects),
            Intent::Door => self.on_door(&mut effects),
            Intent::Inspect(index) => self.on_inspect(index, &mut effects),
            Intent::Submit(input) => self.on_submit(&input, now, &mut effects),
            Intent::Close => self.on_close(&mut effects),
        }
        effects
    }

    /// Fire the success auto-close once its delay has passed.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.auto_close.fire_if_due(now) && self.phase == Phase::PuzzleOpen {
            debug!("auto-closing solved puzzle");
            self.close_puzzle(&mut effects);
        }
        effects
    }

    fn on_move(&mut self, direction: Direction, effects: &mut Vec<Effect>) {
        if self.phase == Phase::PuzzleOpen {
            return;
        }
        self.state.step(direction, &self.stage);
        effects.push(Effect::AvatarMoved {
            x: self.state.avatar_x,
            y: self.state.avatar_y,
        });
    }

    fn on_door(&mut self, effects: &mut Vec<Effect>) {
        let distance = self.state.distance_to(self.rules.door_x, self.rules.door_y);
        if distance > self.rules.door_radius {
            effects.push(Effect::Log("> DOOR: It's locked. Get closer.".to_string()));
            return;
        }
        if self.state.solved {
            if self.phase == Phase::PuzzleOpen {
                self.close_puzzle(effects);
            }
            self.advance(effects);
        } else {
            self.open_puzzle(effects);
        }
    }

    fn on_inspect(&mut self, index: usize, effects: &mut Vec<Effect>) {
        let Some(spot) = self.room.interactables.get(index) else {
            debug!("no interactable at index {}", index);
            return;
        };
        if self.state.distance_to(spot.x, spot.y) < self.rules.interact_radius {
            effects.push(Effect::Log(format!("> INVESTIGATE: {}", spot.hint)));
        } else {
            effects.push(Effect::Log("> ERROR: Too far to reach.".to_string()));
        }
    }

    fn on_submit(&mut self, input: &str, now: Instant, effects: &mut Vec<Effect>) {
        if self.phase != Phase::PuzzleOpen {
            return;
        }
        if self.answer_rule().accepts(input) {
            self.state.solved = true;
            effects.push(Effect::Feedback {
                text: "ACCESS GRANTED.".to_string(),
                tone: Tone::Success,
            });
            effects.push(Effect::Log(
                "> SYSTEM: Door mechanism unlocked.".to_string(),
            ));
            self.auto_close.schedule(now, self.rules.auto_close());
            info!("room {} solved", self.state.current_room_id);
        } else {
            effects.push(Effect::Feedback {
                text: "ACCESS DENIED.".to_string(),
                tone: Tone::Failure,
            });
            effects.push(Effect::Log("> ALERT: Incorrect Answer.".to_string()));
        }
    }

    fn on_close(&mut self, effects: &mut Vec<Effect>) {
        if self.phase == Phase::PuzzleOpen {
            self.close_puzzle(effects);
        }
    }

    fn open_puzzle(&mut self, effects: &mut Vec<Effect>) {
        // Generated rooms draw a brand new question every time the door is used.
        let room_id = self.state.current_room_id;
        let prompt = if self.catalog.contains(room_id) {
            self.room.prompt.clone()
        } else {
            generate(room_id, &mut self.rng).prompt
        };
        self.auto_close.cancel();
        self.phase = Phase::PuzzleOpen;
        self.prompt = Some(prompt.clone());
        effects.push(Effect::PuzzleOpened { prompt });
    }

    fn close_puzzle(&mut self, effects: &mut Vec<Effect>) {
        self.auto_close.cancel();
        self.phase = Phase::Exploring;
        self.prompt = None;
        effects.push(Effect::PuzzleClosed);
    }

    fn advance(&mut self, effects: &mut Vec<Effect>) {
        let next = match self.state.current_room_id.checked_add(1) {
            Some(next) if next < u32::MAX => next,
            _ => {
                warn!("room {} is the last one", self.state.current_room_id);
                effects.push(Effect::Log("> DOOR: No sectors remain.".to_string()));
                return;
            }
        };
        let record = SaveRecord { room_id: next };
        match self.store.save(&record) {
            Ok(()) => {
                effects.push(Effect::Saved(record));
                effects.push(Effect::Log("> SYSTEM: Progress saved.".to_string()));
            }
            Err(e) => {
                warn!("could not save progress: {}", e);
                effects.push(Effect::Log(
                    "> SYSTEM: Progress could not be saved.".to_string(),
                ));
            }
        }
        self.enter_room(next, effects);
        effects.push(Effect::Log(format!("> MOVING to Sector #{next}...")));
    }

    fn enter_room(&mut self, room_id: u32, effects: &mut Vec<Effect>) {
        if room_id != self.room.id {
            self.room = Self::room_for(&self.catalog, &mut self.rng, room_id);
        }
        self.state.current_room_id = room_id;
        self.state.avatar_x = self.rules.spawn_x;
        self.state.avatar_y = self.rules.spawn_y;
        self.state.solved = false;
        self.phase = Phase::Exploring;
        self.prompt = None;
        self.auto_close.cancel();
        self.trace = trace_token(&mut self.rng);
        debug!("entered room {} ({})", room_id, self.room.kind);

        effects.push(Effect::RoomEntered {
            room_id,
            kind: self.room.kind.clone(),
            interactables: self.room.interactables.clone(),
            trace: self.trace.clone(),
        });
        effects.push(Effect::AvatarMoved {
            x: self.state.avatar_x,
            y: self.state.avatar_y,
        });
        if let Some(message) = &self.room.entry_message {
            effects.push(Effect::Log(format!("> LOG: {message}")));
        }
    }

    fn room_for(catalog: &Catalog, rng: &mut StdRng, room_id: u32) -> RoomDefinition {
        if catalog.contains(room_id) {
            if let Some(room) = catalog.find(room_id) {
                return room.clone();
            }
        }
        generate(room_id, rng)
    }
}
