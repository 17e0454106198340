use crate::{
    core::{FooterScope, MockBackend, ProjectDetail, ProjectId},
    gui::{
        AppState,
        screens::{Route, Screen, enter_footer},
    },
};

#[derive(Debug)]
pub struct ProjectDetailScreen {
    detail: ProjectDetail<MockBackend>,
    /// Problem with what the user typed, as opposed to a failed backend call.
    input_error: Option<String>,
    _footer: FooterScope,
}

#[derive(Debug, Clone)]
pub enum ProjectDetailMessage {
    Reload,
    SelectTable(i64),
    CreateTable(String),
    RenameTable(i64, String),
    DeleteTable(i64),
    Back,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    Back,
}

impl ProjectDetailScreen {
    pub async fn load(state: &AppState, project_id: ProjectId) -> Self {
        let footer = enter_footer::<Self>(state);
        let mut detail = ProjectDetail::new(state.backend.clone(), project_id);
        detail.load().await;
        Self {
            detail,
            input_error: None,
            _footer: footer,
        }
    }

    pub fn detail(&self) -> &ProjectDetail<MockBackend> {
        &self.detail
    }

    pub fn input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }
}

impl Screen for ProjectDetailScreen {
    type Message = ProjectDetailMessage;
    type ParentMessage = ParentMessage;

    fn route(&self) -> Route {
        Route::ProjectDetail {
            project_id: self.detail.project_id(),
        }
    }

    async fn update(
        &mut self,
        message: ProjectDetailMessage,
        _state: &mut AppState,
    ) -> Option<ParentMessage> {
        self.input_error = None;
        let outcome = match message {
            ProjectDetailMessage::Back => return Some(ParentMessage::Back),
            ProjectDetailMessage::Reload => {
                self.detail.load().await;
                Ok(())
            }
            ProjectDetailMessage::SelectTable(table_id) => {
                self.detail.select_table(table_id).await;
                Ok(())
            }
            ProjectDetailMessage::CreateTable(name) => {
                self.detail.create_table(&name).await.map(drop)
            }
            ProjectDetailMessage::RenameTable(table_id, name) => {
                self.detail.rename_table(table_id, &name).await.map(drop)
            }
            ProjectDetailMessage::DeleteTable(table_id) => {
                self.detail.delete_table(table_id).await;
                Ok(())
            }
        };
        if let Err(e) = outcome {
            self.input_error = Some(e.to_string());
        }
        None
    }
}
