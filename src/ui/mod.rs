//! Terminal front end: turns keys and clicks into intents and draws the
//! effects the game reports.

pub mod app;
pub mod input;
pub mod render;
pub mod stage;

pub use app::App;
pub use render::draw_ui;
