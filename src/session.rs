//! Application state for one running front-end.
//!
//! A [`Session`] owns the [`MissionStore`] together with the UI state that
//! is never persisted: the add form's draft and the buffer of a mission
//! being edited. Inputs are written through plain setters and validated only
//! when committed.
//!
//! Editing and detail selection are independent: a mission can be selected
//! while another (or the same) mission is being edited.

use crate::models::{Draft, EditBuffer, Mission, MissionId};
use crate::store::{MissionStore, Snapshot};

pub struct Session {
    store: MissionStore,
    draft: Draft,
    editing: Option<EditBuffer>,
}

impl Session {
    pub fn new(store: MissionStore) -> Self {
        Self {
            store,
            draft: Draft::default(),
            editing: None,
        }
    }

    pub fn store(&self) -> &MissionStore {
        &self.store
    }

    pub fn missions(&self) -> &[Mission] {
        self.store.missions()
    }

    // ============================================================
    // Add form
    // ============================================================

    pub fn draft_title(&self) -> &str {
        self.draft.title()
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.set_title(title);
    }

    pub fn draft_description(&self) -> &str {
        self.draft.description()
    }

    pub fn set_draft_description(&mut self, description: impl Into<String>) {
        self.draft.set_description(description);
    }

    pub fn can_submit(&self) -> bool {
        self.draft.can_submit()
    }

    /// Add the drafted mission. The draft is cleared only when the mission
    /// was accepted; returns the new mission's id.
    pub fn submit_draft(&mut self) -> Option<MissionId> {
        if !self.draft.can_submit() {
            return None;
        }

        let snapshot = self
            .store
            .add(self.draft.title(), self.draft.description());
        self.draft.clear();
        snapshot.first().map(|m| m.id)
    }

    // ============================================================
    // Editing
    // ============================================================

    /// Start editing a mission, replacing any edit already in progress.
    /// Returns `false` when there is no such mission.
    pub fn begin_edit(&mut self, id: MissionId) -> bool {
        match self.store.get(id) {
            Some(mission) => {
                self.editing = Some(EditBuffer::for_mission(mission));
                true
            }
            None => false,
        }
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    pub fn editing_id(&self) -> Option<MissionId> {
        self.editing.as_ref().map(EditBuffer::id)
    }

    /// Returns `false` when no edit is in progress.
    pub fn set_edit_title(&mut self, title: impl Into<String>) -> bool {
        match self.editing.as_mut() {
            Some(buffer) => {
                buffer.set_title(title);
                true
            }
            None => false,
        }
    }

    /// Returns `false` when no edit is in progress.
    pub fn set_edit_description(&mut self, description: impl Into<String>) -> bool {
        match self.editing.as_mut() {
            Some(buffer) => {
                buffer.set_description(description);
                true
            }
            None => false,
        }
    }

    pub fn can_save_edit(&self) -> bool {
        self.editing.as_ref().is_some_and(EditBuffer::can_save)
    }

    /// Commit the edit buffer. The buffer is kept when its title is blank so
    /// the user can fix it.
    pub fn save_edit(&mut self) -> bool {
        let Some(buffer) = self.editing.as_ref() else {
            return false;
        };
        if !buffer.can_save() {
            return false;
        }

        self.store
            .edit(buffer.id(), buffer.title(), buffer.description());
        self.editing = None;
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // ============================================================
    // List commands
    // ============================================================

    pub fn toggle(&mut self, id: MissionId) -> Snapshot {
        self.store.toggle_complete(id)
    }

    /// Delete a mission. Its selection and any edit in progress on it are
    /// dropped too.
    pub fn delete(&mut self, id: MissionId) -> Snapshot {
        if self.editing_id() == Some(id) {
            self.editing = None;
        }
        self.store.delete(id)
    }

    // ============================================================
    // Detail panel
    // ============================================================

    pub fn select(&mut self, id: MissionId) -> Option<&Mission> {
        self.store.select(Some(id));
        self.store.selected_mission()
    }

    pub fn close_detail(&mut self) {
        self.store.select(None);
    }

    pub fn selected(&self) -> Option<&Mission> {
        self.store.selected_mission()
    }
}
