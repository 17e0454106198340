use std::time::Duration;

use projdash::core::{Avatar, Config, MockLatency, Project, ProjectId, ProjectStore};

/// Creates a store holding one project per name, in the given order.
pub fn store_with(names: &[&str]) -> ProjectStore {
    ProjectStore::with_projects(names.iter().map(|name| Project::new(*name)).collect())
}

/// Creates a store with `count` projects named "Project 01", "Project 02", ...
pub fn numbered_store(count: usize) -> ProjectStore {
    ProjectStore::with_projects(
        (1..=count)
            .map(|i| Project::new(format!("Project {i:02}")))
            .collect(),
    )
}

/// Config with every artificial delay removed.
pub fn instant_config() -> Config {
    Config {
        mock_latency: MockLatency::uniform(Duration::ZERO),
        save_delay: Duration::ZERO,
        ..Config::default()
    }
}

/// A small PNG-typed avatar of the given size.
pub fn make_avatar(mime_type: &str, size: usize) -> Avatar {
    Avatar {
        file_name: "avatar.png".to_string(),
        mime_type: mime_type.to_string(),
        bytes: vec![0u8; size],
    }
}

/// Viewport heights used across the footer and paging tests.
pub const SHORT_VIEWPORT: u32 = 500;
pub const MEDIUM_VIEWPORT: u32 = 600;
pub const TALL_VIEWPORT: u32 = 900;

/// Id of the first project in `store` with this name.
pub fn project_named(store: &ProjectStore, name: &str) -> ProjectId {
    store
        .list()
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id)
        .unwrap_or_else(|| panic!("no project named {name}"))
}
