pub mod dashboard;
pub mod edit_profile;
pub mod loading_page;
pub mod login;
pub mod project_detail;
pub mod register;

use std::future::Future;

use crate::{
    core::{FooterScope, ProjectId},
    gui::{AppState, Message},
};

/// Pages the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    ProjectDetail { project_id: ProjectId },
    EditProfile,
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug;
    type ParentMessage: std::fmt::Debug;

    /// Viewport height at or below which this page wants a compact footer.
    const FOOTER_THRESHOLD: Option<u32> = None;

    fn route(&self) -> Route;
    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> impl Future<Output = Option<Self::ParentMessage>>;
}

/// Claims the footer for a screen. Must be called before any other footer change
/// the screen makes, so the scope's reset on drop covers them all.
pub(crate) fn enter_footer<S: Screen>(state: &AppState) -> FooterScope {
    state.footer.acquire(S::FOOTER_THRESHOLD)
}

#[derive(Debug)]
pub enum ScreenData {
    Loading(loading_page::LoadingPageScreen),
    Login(login::LoginScreen),
    Register(register::RegisterScreen),
    Dashboard(dashboard::DashboardScreen),
    ProjectDetail(project_detail::ProjectDetailScreen),
    EditProfile(edit_profile::EditProfileScreen),
}

impl ScreenData {
    /// Builds the screen for `route`, acquiring its footer settings.
    pub async fn enter(route: Route, state: &mut AppState, viewport_height: u32) -> Self {
        match route {
            Route::Login => ScreenData::Login(login::LoginScreen::new(state)),
            Route::Register => ScreenData::Register(register::RegisterScreen::new(state)),
            Route::Dashboard => {
                ScreenData::Dashboard(dashboard::DashboardScreen::new(state, viewport_height))
            }
            Route::ProjectDetail { project_id } => ScreenData::ProjectDetail(
                project_detail::ProjectDetailScreen::load(state, project_id).await,
            ),
            Route::EditProfile => {
                ScreenData::EditProfile(edit_profile::EditProfileScreen::new(state))
            }
        }
    }

    pub fn route(&self) -> Option<Route> {
        match self {
            ScreenData::Loading(_) => None,
            ScreenData::Login(screen) => Some(screen.route()),
            ScreenData::Register(screen) => Some(screen.route()),
            ScreenData::Dashboard(screen) => Some(screen.route()),
            ScreenData::ProjectDetail(screen) => Some(screen.route()),
            ScreenData::EditProfile(screen) => Some(screen.route()),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScreenData::Loading(_) => "Loading",
            ScreenData::Login(_) => "Sign in",
            ScreenData::Register(_) => "Create account",
            ScreenData::Dashboard(_) => "Projects",
            ScreenData::ProjectDetail(_) => "Project",
            ScreenData::EditProfile(_) => "Edit profile",
        }
    }

    pub fn resize(&mut self, viewport_height: u32) {
        if let ScreenData::Dashboard(screen) = self {
            screen.resize(viewport_height);
        }
    }

    /// Routes a message to the active screen. Returns where to navigate next, if anywhere.
    pub async fn update(&mut self, message: Message, state: &mut AppState) -> Option<Route> {
        match (self, message) {
            (ScreenData::Login(page), Message::Login(msg)) => {
                page.update(msg, state).await.map(|parent| match parent {
                    login::ParentMessage::SignedIn => Route::Dashboard,
                    login::ParentMessage::OpenRegister => Route::Register,
                })
            }
            (ScreenData::Register(page), Message::Register(msg)) => {
                page.update(msg, state).await.map(|parent| match parent {
                    register::ParentMessage::Registered | register::ParentMessage::OpenLogin => {
                        Route::Login
                    }
                })
            }
            (ScreenData::Dashboard(page), Message::Dashboard(msg)) => {
                page.update(msg, state).await.map(|parent| match parent {
                    dashboard::ParentMessage::OpenProject(project_id) => {
                        Route::ProjectDetail { project_id }
                    }
                    dashboard::ParentMessage::EditProfile => Route::EditProfile,
                    dashboard::ParentMessage::SignedOut => Route::Login,
                })
            }
            (ScreenData::ProjectDetail(page), Message::ProjectDetail(msg)) => {
                page.update(msg, state).await.map(|parent| match parent {
                    project_detail::ParentMessage::Back => Route::Dashboard,
                })
            }
            (ScreenData::EditProfile(page), Message::EditProfile(msg)) => {
                page.update(msg, state).await.map(|parent| match parent {
                    edit_profile::ParentMessage::Back => Route::Dashboard,
                })
            }
            _ => None,
        }
    }
}
