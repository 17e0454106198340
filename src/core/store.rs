use std::{collections::HashSet, path::Path, sync::Arc};

use tokio::sync::watch;
use tracing::debug;

use crate::core::{
    csv,
    model::{Project, ProjectId},
};

/// Immutable view of the project list handed out to consumers.
pub type ProjectSnapshot = Arc<[Project]>;

/// Single source of truth for the project list.
///
/// Cloning the store hands out another handle to the same list. Every mutation
/// goes through the methods below; consumers only ever see immutable snapshots,
/// either by calling [`ProjectStore::list`] or by holding a receiver from
/// [`ProjectStore::subscribe`]. Subscribers are woken only when a mutation
/// actually changed the list.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    tx: Arc<watch::Sender<ProjectSnapshot>>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::with_projects(Vec::new())
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        let (tx, _rx) = watch::channel(ProjectSnapshot::from(projects));
        Self { tx: Arc::new(tx) }
    }

    /// Store holding the two demo projects shown on a fresh dashboard.
    pub fn seeded() -> Self {
        Self::with_projects(vec![
            Project::new("Marketing Campaign 2025")
                .with_tables(15)
                .with_favorite(true),
            Project::new("Sales Analytics").with_tables(8),
        ])
    }

    pub fn list(&self) -> ProjectSnapshot {
        self.tx.borrow().clone()
    }

    pub fn get(&self, id: ProjectId) -> Option<Project> {
        self.tx.borrow().iter().find(|p| p.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProjectSnapshot> {
        self.tx.subscribe()
    }

    /// Prepends a new project. Blank names are ignored and yield `None`.
    pub fn add(&self, name: &str) -> Option<ProjectId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let project = Project::new(name);
        let id = project.id;
        self.tx.send_modify(|list| {
            *list = std::iter::once(project)
                .chain(list.iter().cloned())
                .collect();
        });
        debug!(%id, name, "project added");
        Some(id)
    }

    pub fn rename(&self, id: ProjectId, name: &str) {
        let changed = self.replace_with(id, |p| p.renamed(name));
        if changed {
            debug!(%id, name, "project renamed");
        }
    }

    pub fn remove(&self, id: ProjectId) {
        self.remove_many(&[id]);
    }

    pub fn remove_many(&self, ids: &[ProjectId]) {
        let ids: HashSet<ProjectId> = ids.iter().copied().collect();
        let removed = self.retain(|p| !ids.contains(&p.id));
        if removed > 0 {
            debug!(removed, "projects removed");
        }
    }

    pub fn toggle_favorite(&self, id: ProjectId) {
        let changed = self.replace_with(id, Project::favorite_toggled);
        if changed {
            debug!(%id, "project favorite toggled");
        }
    }

    /// CSV text for `rows`; see [`csv::export_csv`].
    pub fn export_csv(&self, rows: &[Project]) -> anyhow::Result<String> {
        csv::export_csv(rows)
    }

    /// Writes `rows` as CSV to `path`, the file-download side of [`Self::export_csv`].
    pub fn download_csv(&self, rows: &[Project], path: impl AsRef<Path>) -> anyhow::Result<()> {
        csv::write_csv(path, rows)
    }

    /// Swaps the project with `id` for `f(project)` in place. Returns whether it was found.
    fn replace_with(&self, id: ProjectId, f: impl FnOnce(&Project) -> Project) -> bool {
        self.tx.send_if_modified(|list| {
            let Some(index) = list.iter().position(|p| p.id == id) else {
                return false;
            };
            let mut next = list.to_vec();
            next[index] = f(&list[index]);
            *list = next.into();
            true
        })
    }

    /// Keeps projects matching `keep` and returns how many were dropped.
    fn retain(&self, keep: impl Fn(&Project) -> bool) -> usize {
        let mut removed = 0;
        self.tx.send_if_modified(|list| {
            let next: Vec<Project> = list.iter().filter(|p| keep(p)).cloned().collect();
            removed = list.len() - next.len();
            if removed == 0 {
                return false;
            }
            *list = next.into();
            true
        });
        removed
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}
