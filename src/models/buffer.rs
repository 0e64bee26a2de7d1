use super::mission::{is_valid_title, Mission, MissionId};

/// Contents of the add-mission form.
///
/// Inputs are written freely; the title is only checked when the draft is
/// submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    title: String,
    description: String,
}

impl Draft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn can_submit(&self) -> bool {
        is_valid_title(&self.title)
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

/// In-progress edits to a single mission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    id: MissionId,
    title: String,
    description: String,
}

impl EditBuffer {
    /// Seed the buffer from the mission's current values.
    pub fn for_mission(mission: &Mission) -> Self {
        Self {
            id: mission.id,
            title: mission.task.clone(),
            description: mission.description.clone(),
        }
    }

    pub fn id(&self) -> MissionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn can_save(&self) -> bool {
        is_valid_title(&self.title)
    }
}
