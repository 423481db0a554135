pub mod config;
pub mod error;
pub mod game;
pub mod puzzle;
pub mod save;
pub mod ui;
