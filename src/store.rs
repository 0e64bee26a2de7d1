//! The canonical, ordered mission list.
//!
//! Every command either leaves the list untouched or replaces it with a new
//! immutable [`Snapshot`]. Replacements are handed to the persistence
//! gateway straight away; a failed save is logged and otherwise ignored, since
//! the in-memory list stays authoritative for the running session.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::error::StorageError;
use crate::gateway::PersistenceGateway;
use crate::models::{is_valid_title, Mission, MissionId};

/// The full ordered mission list at one point in time, newest first.
pub type Snapshot = Arc<[Mission]>;

pub struct MissionStore {
    missions: Snapshot,
    selected: Option<MissionId>,
    /// Highest id ever handed out or loaded; ids are never reused.
    last_id: MissionId,
    gateway: Box<dyn PersistenceGateway>,
}

impl MissionStore {
    /// Seed the store from the gateway, falling back to the built-in default
    /// list when nothing usable is stored.
    pub fn initialize(gateway: impl PersistenceGateway + 'static) -> Self {
        let missions = match gateway.load() {
            Ok(missions) => {
                tracing::debug!("Loaded {} missions", missions.len());
                missions
            }
            Err(StorageError::Missing { key }) => {
                tracing::debug!("Nothing stored under {}, using defaults", key);
                Mission::defaults()
            }
            Err(e) => {
                tracing::warn!("Failed to load missions, using defaults: {}", e);
                Mission::defaults()
            }
        };

        let last_id = missions.iter().map(|m| m.id).max().unwrap_or(0);

        Self {
            missions: missions.into(),
            selected: None,
            last_id,
            gateway: Box::new(gateway),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.missions.clone()
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn get(&self, id: MissionId) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    /// Number of missions not yet completed.
    pub fn remaining(&self) -> usize {
        self.missions.iter().filter(|m| !m.is_completed).count()
    }

    // ============================================================
    // Commands
    // ============================================================

    /// Prepend a new incomplete mission. Blank titles are ignored.
    pub fn add(&mut self, title: &str, description: &str) -> Snapshot {
        if !is_valid_title(title) {
            tracing::debug!("Ignoring add with an empty title");
            return self.snapshot();
        }

        let mission = Mission::new(self.next_id(), title, description);
        tracing::debug!("Adding mission {}", mission.id);

        let mut missions = Vec::with_capacity(self.missions.len() + 1);
        missions.push(mission);
        missions.extend(self.missions.iter().cloned());
        self.commit(missions)
    }

    /// Flip the completion flag of a mission.
    pub fn toggle_complete(&mut self, id: MissionId) -> Snapshot {
        self.update(id, |m| m.is_completed = !m.is_completed)
    }

    /// Replace a mission's title and description, keeping its id and
    /// completion state. Blank titles are ignored.
    pub fn edit(&mut self, id: MissionId, title: &str, description: &str) -> Snapshot {
        if !is_valid_title(title) {
            tracing::debug!("Ignoring edit of mission {} with an empty title", id);
            return self.snapshot();
        }

        self.update(id, |m| {
            m.task = title.to_string();
            m.description = description.to_string();
        })
    }

    /// Remove a mission, clearing the selection if it pointed at it.
    pub fn delete(&mut self, id: MissionId) -> Snapshot {
        if self.get(id).is_none() {
            return self.snapshot();
        }

        if self.selected == Some(id) {
            self.selected = None;
        }

        let missions = self.missions.iter().filter(|m| m.id != id).cloned().collect();
        self.commit(missions)
    }

    // ============================================================
    // Selection (transient, never persisted)
    // ============================================================

    /// Choose the mission shown in the detail panel. Selecting an unknown id
    /// clears the selection.
    pub fn select(&mut self, id: Option<MissionId>) {
        self.selected = id.filter(|id| self.get(*id).is_some());
    }

    pub fn selected(&self) -> Option<MissionId> {
        self.selected
    }

    pub fn selected_mission(&self) -> Option<&Mission> {
        self.selected.and_then(|id| self.get(id))
    }

    // ============================================================
    // Internals
    // ============================================================

    fn next_id(&mut self) -> MissionId {
        match self.last_id.checked_add(1) {
            Some(next) => {
                let id = Utc::now().timestamp_millis().max(next);
                self.last_id = id;
                id
            }
            None => {
                // Nothing above the highest id is left; take the lowest free one.
                let taken: HashSet<MissionId> = self.missions.iter().map(|m| m.id).collect();
                (1..=MissionId::MAX)
                    .find(|id| !taken.contains(id))
                    .unwrap_or(MissionId::MIN)
            }
        }
    }

    fn update(&mut self, id: MissionId, apply: impl Fn(&mut Mission)) -> Snapshot {
        if self.get(id).is_none() {
            tracing::debug!("No mission with id {}", id);
            return self.snapshot();
        }

        let missions = self
            .missions
            .iter()
            .cloned()
            .map(|mut m| {
                if m.id == id {
                    apply(&mut m);
                }
                m
            })
            .collect();
        self.commit(missions)
    }

    fn commit(&mut self, missions: Vec<Mission>) -> Snapshot {
        self.missions = missions.into();
        if let Err(e) = self.gateway.save(&self.missions) {
            tracing::warn!("Failed to save missions: {}", e);
        }
        self.snapshot()
    }
}
