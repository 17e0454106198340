#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from projdash for tests
pub use projdash::core::{
    DashboardView, FooterController, FooterScope, FooterSettings, FooterState, LayoutSnapshot,
    MockBackend, MockLatency, MockProfileService, PageSizePolicy, ProfileEditor, ProfileError,
    ProfileForm, Project, ProjectDetail, ProjectId, ProjectStore, Span, Trigger, UpdateStatus,
};
