//! Save-game persistence. Only the current room id is stored, as a small JSON
//! record under a fixed key: `{"roomId": 5}`.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveRecord {
    pub room_id: u32,
}

/// Wire shape. Kept signed so negative ids are reported as invalid rather
/// than as a parse failure.
#[derive(Serialize, Deserialize)]
struct RawRecord {
    #[serde(rename = "roomId")]
    room_id: i64,
}

pub fn encode(record: &SaveRecord) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&RawRecord {
        room_id: i64::from(record.room_id),
    })?)
}

/// Accepts ids in `1..u32::MAX`; the last id has no room after it.
pub fn decode(text: &str) -> Result<SaveRecord, SaveError> {
    let raw: RawRecord = serde_json::from_str(text)?;
    match u32::try_from(raw.room_id) {
        Ok(room_id) if (1..u32::MAX).contains(&room_id) => Ok(SaveRecord { room_id }),
        _ => Err(SaveError::InvalidRoom(raw.room_id)),
    }
}

/// Durable key-value slot holding one save record.
pub trait SaveStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&mut self) -> Result<Option<SaveRecord>, SaveError>;
    fn save(&mut self, record: &SaveRecord) -> Result<(), SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;
}

/// Load a save, treating anything unreadable as "no save".
pub fn load_or_none<S: SaveStore + ?Sized>(store: &mut S) -> Option<SaveRecord> {
    match store.load() {
        Ok(record) => record,
        Err(e) => {
            warn!("ignoring unreadable save: {}", e);
            None
        }
    }
}

/// Stores the record as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path, key: &str) -> Self {
        FileStore {
            path: dir.join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn load(&mut self) -> Result<Option<SaveRecord>, SaveError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&text).map(Some)
    }

    fn save(&mut self, record: &SaveRecord) -> Result<(), SaveError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        // Replaced atomically via a temp file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encode(record)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("saved room {} to {}", record.room_id, self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory slot holding the encoded record. Counts writes.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slot: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw text in the slot, as if written by another session.
    pub fn with_raw(text: &str) -> Self {
        MemoryStore {
            slot: Some(text.to_string()),
            saves: 0,
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SaveStore for MemoryStore {
    fn load(&mut self) -> Result<Option<SaveRecord>, SaveError> {
        self.slot.as_deref().map(decode).transpose()
    }

    fn save(&mut self, record: &SaveRecord) -> Result<(), SaveError> {
        self.slot = Some(encode(record)?);
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.slot = None;
        Ok(())
    }
}
