use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoomDefinition {
    pub id: u32,
    /// Classification label, shown in the HUD only.
    pub kind: String,
    pub prompt: String,
    #[serde(rename = "objects", default)]
    pub interactables: Vec<Interactable>,
    #[serde(rename = "answer")]
    pub expected_answer: String,
    #[serde(rename = "message", default)]
    pub entry_message: Option<String>,
}

/// A point of interest on the stage. Its hint is only readable up close.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interactable {
    pub x: f32,
    pub y: f32,
    pub hint: String,
}

/// On-disk shape of a catalog file: a list of `[[room]]` tables.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(rename = "room", default)]
    pub rooms: Vec<RoomDefinition>,
}

/// Uppercase and trim, the single normalization applied to both stored
/// answers and player input.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_uppercase()
}
