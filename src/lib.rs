pub mod core;
pub mod gui;

pub use self::core::{
    Config, DashboardView, FooterController, FooterState, PageSizePolicy, Project, ProjectId,
    ProjectStore,
};
pub use gui::{AppState, Message, ProjdashApp, Route};
