use tracing::info;

use super::{
    AppState, Message,
    screens::{Route, ScreenData, loading_page::LoadingPageScreen},
};
use crate::core::{FooterController, Trigger};

/// The dashboard application: shared state, the active screen, and the footer.
#[derive(Debug)]
pub struct ProjdashApp {
    state: AppState,
    screen: ScreenData,
    footer: FooterController,
}

impl ProjdashApp {
    /// Starts on the login screen.
    pub fn new(state: AppState, viewport_height: u32) -> Self {
        let mut footer = FooterController::new(state.footer.clone(), viewport_height);
        let screen = ScreenData::Login(super::screens::login::LoginScreen::new(&state));
        footer.navigated();
        Self {
            state,
            screen,
            footer,
        }
    }

    pub fn title(&self) -> String {
        format!("Projdash - {}", self.screen.title())
    }

    pub fn route(&self) -> Option<Route> {
        self.screen.route()
    }

    pub fn screen(&self) -> &ScreenData {
        &self.screen
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn footer(&self) -> &FooterController {
        &self.footer
    }

    pub fn is_footer_compact(&self) -> bool {
        self.footer.is_compact()
    }

    pub async fn update(&mut self, message: Message) {
        match message {
            Message::Navigate(route) => self.navigate(route).await,
            Message::Resize {
                viewport_height,
                layout,
            } => {
                self.screen.resize(viewport_height);
                self.footer.resize(viewport_height);
                if matches!(self.screen, ScreenData::Dashboard(_)) {
                    self.footer.detect_pager_overlap(&layout);
                }
            }
            Message::Scroll(layout) => {
                if matches!(self.screen, ScreenData::Dashboard(_)) {
                    self.footer.detect_pager_overlap(&layout);
                } else {
                    self.footer.recompute(Trigger::Scroll);
                }
            }
            message => {
                if let Some(route) = self.screen.update(message, &mut self.state).await {
                    self.navigate(route).await;
                } else {
                    self.footer.refresh();
                }
            }
        }
    }

    /// Tears down the current screen, then builds the next one.
    ///
    /// The old screen is dropped before the new one is built so its footer
    /// scope resets the shared settings before the next page applies its own.
    pub async fn navigate(&mut self, route: Route) {
        info!(from = ?self.screen.route(), to = ?route, "navigating");
        let previous = std::mem::replace(&mut self.screen, ScreenData::Loading(LoadingPageScreen));
        drop(previous);
        self.screen =
            ScreenData::enter(route, &mut self.state, self.footer.viewport_height()).await;
        self.footer.navigated();
    }
}
