use std::path::Path;

use super::loader::parse_catalog;
use super::types::{normalize_answer, RoomDefinition};
use crate::error::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("../../puzzles/catalog.toml");

/// Ordered, read-only list of hand-written rooms. Ids run from 1 to `len()`.
#[derive(Debug, Clone)]
pub struct Catalog {
    rooms: Vec<RoomDefinition>,
}

impl Catalog {
    /// Validate and normalize a list of rooms. Input may arrive in any order.
    pub fn new(mut rooms: Vec<RoomDefinition>) -> Result<Self, CatalogError> {
        if rooms.is_empty() {
            return Err(CatalogError::Empty);
        }
        rooms.sort_by_key(|r| r.id);
        for (index, room) in rooms.iter_mut().enumerate() {
            let expected = index as u32 + 1;
            if room.id != expected {
                return Err(CatalogError::NonContiguous {
                    expected,
                    found: room.id,
                });
            }
            room.expected_answer = normalize_answer(&room.expected_answer);
            if room.expected_answer.is_empty() {
                return Err(CatalogError::EmptyAnswer(room.id));
            }
        }
        Ok(Catalog { rooms })
    }

    /// The catalog shipped with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(parse_catalog(
            BUILTIN_CATALOG,
            Path::new("puzzles/catalog.toml"),
        )?)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Whether `id` is served by the catalog rather than the generator.
    pub fn contains(&self, id: u32) -> bool {
        id >= 1 && (id as usize) <= self.rooms.len()
    }

    pub fn find(&self, id: u32) -> Option<&RoomDefinition> {
        self.rooms.iter().find(|r| r.id == id)
    }
}
