pub mod config;
pub mod csv;
pub mod detail;
pub mod footer;
mod model;
pub mod paging;
pub mod profile;
mod store;

pub use config::{Config, ConfigError};
pub use detail::{
    ColumnDto, DetailError, MockBackend, MockLatency, ProjectDetail, ProjectDetailBackend,
    ProjectDto, RowDto, TableDto,
};
pub use footer::{
    FooterController, FooterScope, FooterSettings, FooterState, LayoutProbe, LayoutSnapshot, Span,
    Trigger, overlaps,
};
pub use model::{Project, ProjectId};
pub use paging::{DashboardView, PageSizePolicy};
pub use profile::{
    Avatar, AvatarError, MockProfileService, ProfileEditor, ProfileError, ProfileForm,
    ProfileService, ProfileUpdate, UpdateStatus,
};
pub use store::{ProjectSnapshot, ProjectStore};
