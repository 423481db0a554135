pub mod catalog;
pub mod generator;
pub mod loader;
pub mod types;

pub use catalog::Catalog;
pub use generator::generate;
pub use loader::{load_catalog, load_room, load_room_dir};
pub use types::{normalize_answer, Interactable, RoomDefinition};
