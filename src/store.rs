//! The project store: the single source of truth for project records.
//!
//! The store owns the record collection and the "currently selected" record
//! used to pre-fill the edit form. Every mutation writes the full collection
//! back to storage under a fixed key; construction reads it back.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::DashResult;
use crate::project::{seed_projects, Project};
use crate::storage::Storage;

/// Storage key the collection is persisted under.
pub const STORAGE_KEY: &str = "project-storage";

/// On-disk shape of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Persisted collection of projects plus the selection used by the form view.
pub struct ProjectStore {
    projects: Vec<Project>,
    selected: Option<Project>,
    storage: Box<dyn Storage>,
}

impl ProjectStore {
    /// Open a store over `storage`, rehydrating whatever was saved before.
    /// Missing or unreadable data yields an empty store.
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let projects = match storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Snapshot>(&raw) {
                Ok(snapshot) => snapshot.projects,
                Err(e) => {
                    warn!(error = %e, "stored projects are corrupt, starting fresh");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("no stored projects yet");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not read stored projects, starting fresh");
                Vec::new()
            }
        };
        debug!(count = projects.len(), "store rehydrated");

        ProjectStore {
            projects,
            selected: None,
            storage,
        }
    }

    /// Populate an empty store with the seed records. No-op otherwise.
    pub fn initialize(&mut self) -> bool {
        if !self.projects.is_empty() {
            return false;
        }
        self.projects = seed_projects();
        info!(count = self.projects.len(), "seeded empty store");
        self.persist();
        true
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Append a record. The caller supplies the id, normally from `next_id`.
    pub fn add(&mut self, project: Project) {
        if self.get(project.id).is_some() {
            warn!(id = project.id, "adding a project whose id is already taken");
        }
        debug!(id = project.id, name = %project.name, "add project");
        self.projects.push(project);
        self.persist();
    }

    /// Replace the record with the same id. Returns false if none matched,
    /// in which case the collection is left as it was.
    pub fn update(&mut self, project: Project) -> bool {
        let id = project.id;
        let matched = match self.projects.iter_mut().find(|p| p.id == id) {
            Some(slot) => {
                *slot = project;
                true
            }
            None => false,
        };
        debug!(id, matched, "update project");
        self.persist();
        matched
    }

    /// Remove the record with `id`. Returns false if there was none.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        let removed = self.projects.len() != before;
        debug!(id, removed, "delete project");
        self.persist();
        removed
    }

    /// Set or clear the record the form view edits. Stores a copy; later
    /// mutations do not reach an already selected snapshot.
    pub fn select(&mut self, project: Option<Project>) {
        self.selected = project;
    }

    pub fn selected(&self) -> Option<&Project> {
        self.selected.as_ref()
    }

    /// Next free id: one past the highest id, or 1 for an empty store.
    pub fn next_id(&self) -> u64 {
        self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Write the collection to storage.
    pub fn save(&self) -> DashResult<()> {
        let snapshot = Snapshot {
            projects: self.projects.clone(),
        };
        let data = serde_json::to_string_pretty(&snapshot)?;
        self.storage.write(STORAGE_KEY, &data)
    }

    // Mutations never fail on a storage error; the in-memory state stays authoritative.
    fn persist(&self) {
        if let Err(e) = self.save() {
            error!(error = %e, "failed to persist projects");
        }
    }
}
