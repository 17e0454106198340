use tracing::warn;

use crate::{
    core::{DashboardView, FooterScope, ProjectId},
    gui::{
        AppState,
        screens::{Route, Screen, enter_footer},
    },
};

#[derive(Debug)]
pub struct DashboardScreen {
    view: DashboardView,
    /// Text of the last successful CSV export, ready to hand to the host for download.
    last_export: Option<String>,
    error: Option<String>,
    _footer: FooterScope,
}

#[derive(Debug, Clone)]
pub enum DashboardMessage {
    KeywordChanged(String),
    AddQuick(String),
    Rename(ProjectId, String),
    ToggleCheck(ProjectId, bool),
    RemoveOne(ProjectId),
    RemoveSelected,
    ToggleFavorite(ProjectId),
    ToggleAside,
    GotoPage(usize),
    NextPage,
    PrevPage,
    ExportCsv,
    OpenProject(ProjectId),
    EditProfile,
    SignOut,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    OpenProject(ProjectId),
    EditProfile,
    SignedOut,
}

impl DashboardScreen {
    pub fn new(state: &AppState, viewport_height: u32) -> Self {
        let footer = enter_footer::<Self>(state);
        Self {
            view: DashboardView::new(state.store.clone(), state.config.page_size, viewport_height),
            last_export: None,
            error: None,
            _footer: footer,
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn last_export(&self) -> Option<&str> {
        self.last_export.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn resize(&mut self, viewport_height: u32) {
        self.view.resize(viewport_height);
    }
}

impl Screen for DashboardScreen {
    type Message = DashboardMessage;
    type ParentMessage = ParentMessage;

    const FOOTER_THRESHOLD: Option<u32> = Some(578);

    fn route(&self) -> Route {
        Route::Dashboard
    }

    async fn update(
        &mut self,
        message: DashboardMessage,
        state: &mut AppState,
    ) -> Option<ParentMessage> {
        // Another screen may have changed the store since this one last looked.
        self.view.sync();
        match message {
            DashboardMessage::KeywordChanged(keyword) => self.view.set_keyword(keyword),
            DashboardMessage::AddQuick(name) => {
                self.view.add_quick(&name);
            }
            DashboardMessage::Rename(id, name) => {
                self.view.rename(id, &name);
            }
            DashboardMessage::ToggleCheck(id, checked) => self.view.toggle_check(id, checked),
            DashboardMessage::RemoveOne(id) => self.view.remove_one(id),
            DashboardMessage::RemoveSelected => self.view.remove_selected(),
            DashboardMessage::ToggleFavorite(id) => self.view.toggle_favorite(id),
            DashboardMessage::ToggleAside => self.view.toggle_aside(),
            DashboardMessage::GotoPage(index) => {
                self.view.goto_page(index);
            }
            DashboardMessage::NextPage => {
                self.view.next_page();
            }
            DashboardMessage::PrevPage => {
                self.view.prev_page();
            }
            DashboardMessage::ExportCsv => match self.view.export_csv() {
                Ok(csv) => {
                    self.last_export = Some(csv);
                    self.error = None;
                }
                Err(e) => {
                    warn!(error = %e, "csv export failed");
                    self.error = Some("Export failed. Please try again.".to_string());
                }
            },
            DashboardMessage::OpenProject(project_id) => {
                return Some(ParentMessage::OpenProject(project_id));
            }
            DashboardMessage::EditProfile => return Some(ParentMessage::EditProfile),
            DashboardMessage::SignOut => {
                state.session = None;
                return Some(ParentMessage::SignedOut);
            }
        }
        None
    }
}
