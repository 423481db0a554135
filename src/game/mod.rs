pub mod progression;
pub mod state;
pub mod timer;

pub use progression::{AnswerRule, Effect, Intent, Phase, Progression, Tone};
pub use state::{room_label, trace_token, Direction, GameState};
pub use timer::Deadline;
