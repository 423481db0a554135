use std::path::Path;

use log::debug;

use super::catalog::Catalog;
use super::types::{CatalogFile, RoomDefinition};
use crate::error::CatalogError;

fn read(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a single room from a file holding one room table at top level.
pub fn load_room(path: &Path) -> Result<RoomDefinition, CatalogError> {
    let content = read(path)?;
    toml::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a catalog file made of `[[room]]` tables. `origin` only labels errors.
pub fn parse_catalog(content: &str, origin: &Path) -> Result<Vec<RoomDefinition>, CatalogError> {
    let file: CatalogFile = toml::from_str(content).map_err(|source| CatalogError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    Ok(file.rooms)
}

/// Load every `room_*.toml` in a directory.
pub fn load_room_dir(dir: &Path) -> Result<Vec<RoomDefinition>, CatalogError> {
    let pattern = dir.join("room_*.toml");
    let mut paths: Vec<_> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|e| e.ok())
        .collect();

    // Sort by filename so room_01, room_02, room_03 are in order
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut rooms = Vec::with_capacity(paths.len());
    for path in paths {
        debug!("loading room file {}", path.display());
        rooms.push(load_room(&path)?);
    }
    Ok(rooms)
}

/// Load a catalog from either a `[[room]]` file or a directory of room files.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let rooms = if path.is_dir() {
        load_room_dir(path)?
    } else {
        parse_catalog(&read(path)?, path)?
    };
    Catalog::new(rooms)
}
