use serde::{Deserialize, Serialize};

/// Mission ids are millisecond timestamps taken at creation time.
pub type MissionId = i64;

/// Id of the built-in mission seeded on first run.
pub const DEFAULT_MISSION_ID: MissionId = 1;

pub const DEFAULT_MISSION_TASK: &str = "Install this application";

pub const DEFAULT_MISSION_DESCRIPTION: &str =
    "Use the install button in your browser's address bar to add it to your home screen.";

/// A single to-do item.
///
/// The serialized form is the storage format: `id`, `task`, `description`
/// and `is_completed`, with no envelope around the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    /// Title. Never empty in stored state.
    pub task: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl Mission {
    pub fn new(id: MissionId, task: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            task: task.into(),
            description: description.into(),
            is_completed: false,
        }
    }

    /// The mission list used when nothing usable is in storage.
    pub fn defaults() -> Vec<Mission> {
        vec![Mission::new(
            DEFAULT_MISSION_ID,
            DEFAULT_MISSION_TASK,
            DEFAULT_MISSION_DESCRIPTION,
        )]
    }
}

/// A title is accepted when it has at least one non-whitespace character.
pub fn is_valid_title(title: &str) -> bool {
    !title.trim().is_empty()
}
