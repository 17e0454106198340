use std::{collections::HashSet, num::NonZeroUsize};

use tokio::sync::watch;
use tracing::debug;

use crate::core::{
    model::{Project, ProjectId},
    store::{ProjectSnapshot, ProjectStore},
};

/// Viewports shorter than this get the short page.
pub const TALL_VIEWPORT_MIN_HEIGHT: u32 = 800;
pub const SHORT_PAGE_SIZE: usize = 5;
pub const TALL_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSizePolicy {
    Fixed(NonZeroUsize),
    /// 5 rows below 800px of viewport height, 8 rows otherwise.
    #[default]
    Adaptive,
}

impl PageSizePolicy {
    pub fn page_size(self, viewport_height: u32) -> usize {
        match self {
            PageSizePolicy::Fixed(size) => size.get(),
            PageSizePolicy::Adaptive if viewport_height < TALL_VIEWPORT_MIN_HEIGHT => {
                SHORT_PAGE_SIZE
            }
            PageSizePolicy::Adaptive => TALL_PAGE_SIZE,
        }
    }
}

/// Case-insensitive substring filter on the project name. A blank keyword keeps everything.
pub fn filter_projects(projects: &[Project], keyword: &str) -> Vec<Project> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return projects.to_vec();
    }
    projects
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Number of pages needed for `len` items. An empty list still has one (empty) page.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// The dashboard's read model: the latest store snapshot run through
/// filter and pagination, plus selection and panel state that never reaches the store.
#[derive(Debug)]
pub struct DashboardView {
    store: ProjectStore,
    rx: watch::Receiver<ProjectSnapshot>,
    projects: ProjectSnapshot,
    keyword: String,
    filtered: Vec<Project>,
    policy: PageSizePolicy,
    page_size: usize,
    page_index: usize,
    selected: HashSet<ProjectId>,
    aside_open: bool,
}

impl DashboardView {
    pub fn new(store: ProjectStore, policy: PageSizePolicy, viewport_height: u32) -> Self {
        let mut rx = store.subscribe();
        let projects = rx.borrow_and_update().clone();
        let filtered = projects.to_vec();
        Self {
            store,
            rx,
            projects,
            keyword: String::new(),
            filtered,
            policy,
            page_size: policy.page_size(viewport_height),
            page_index: 0,
            selected: HashSet::new(),
            aside_open: false,
        }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn filtered(&self) -> &[Project] {
        &self.filtered
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len(), self.page_size)
    }

    /// Projects on the current page.
    pub fn page(&self) -> &[Project] {
        let start = (self.page_index * self.page_size).min(self.filtered.len());
        let end = (start + self.page_size).min(self.filtered.len());
        &self.filtered[start..end]
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn has_prev_page(&self) -> bool {
        self.page_index > 0
    }

    /// Pulls the latest store snapshot if it changed. Returns whether anything was applied.
    pub fn sync(&mut self) -> bool {
        if !self.rx.has_changed().unwrap_or(false) {
            return false;
        }
        self.apply_snapshot();
        true
    }

    /// Waits until the store publishes a new list and applies it.
    pub async fn next_update(&mut self) -> anyhow::Result<()> {
        self.rx.changed().await?;
        self.apply_snapshot();
        Ok(())
    }

    fn apply_snapshot(&mut self) {
        self.projects = self.rx.borrow_and_update().clone();
        let live: HashSet<ProjectId> = self.projects.iter().map(|p| p.id).collect();
        self.selected.retain(|id| live.contains(id));
        self.refilter();
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        if keyword == self.keyword {
            return;
        }
        self.keyword = keyword;
        self.refilter();
        self.page_index = 0;
    }

    fn refilter(&mut self) {
        let filtered = filter_projects(&self.projects, &self.keyword);
        let membership_changed = filtered.len() != self.filtered.len()
            || filtered.iter().zip(&self.filtered).any(|(a, b)| a.id != b.id);
        self.filtered = filtered;
        if membership_changed {
            self.page_index = 0;
        }
        debug!(
            keyword = %self.keyword,
            matches = self.filtered.len(),
            page_index = self.page_index,
            "dashboard filtered"
        );
    }

    /// Recomputes the page size for a new viewport height. A size change restarts at page 0.
    pub fn resize(&mut self, viewport_height: u32) {
        let page_size = self.policy.page_size(viewport_height);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page_index = 0;
        }
    }

    /// Jumps to page `index`. Out-of-range requests are rejected and leave the index alone.
    pub fn goto_page(&mut self, index: usize) -> bool {
        if index >= self.page_count() {
            return false;
        }
        self.page_index = index;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.page_index += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev_page() {
            return false;
        }
        self.page_index -= 1;
        true
    }

    pub fn aside_open(&self) -> bool {
        self.aside_open
    }

    pub fn toggle_aside(&mut self) {
        self.aside_open = !self.aside_open;
    }

    pub fn is_checked(&self, id: ProjectId) -> bool {
        self.selected.contains(&id)
    }

    pub fn toggle_check(&mut self, id: ProjectId, checked: bool) {
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    pub fn selected(&self) -> &HashSet<ProjectId> {
        &self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Adds a project from the quick-add box and clears the search so it is visible.
    pub fn add_quick(&mut self, name: &str) -> Option<ProjectId> {
        let id = self.store.add(name)?;
        self.keyword.clear();
        self.sync();
        Some(id)
    }

    /// Renames a project. Blank names are ignored.
    pub fn rename(&mut self, id: ProjectId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.store.rename(id, name);
        self.sync()
    }

    pub fn remove_one(&mut self, id: ProjectId) {
        self.store.remove(id);
        self.sync();
    }

    pub fn remove_selected(&mut self) {
        let ids: Vec<ProjectId> = self.selected.iter().copied().collect();
        if !ids.is_empty() {
            self.store.remove_many(&ids);
        }
        self.selected.clear();
        self.sync();
    }

    pub fn toggle_favorite(&mut self, id: ProjectId) {
        self.store.toggle_favorite(id);
        self.sync();
    }

    /// CSV of the rows currently matching the search, across all pages.
    pub fn export_csv(&self) -> anyhow::Result<String> {
        self.store.export_csv(&self.filtered)
    }
}
