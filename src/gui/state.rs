use crate::core::{
    Config, FooterState, MockBackend, MockProfileService, ProfileForm, ProjectStore,
};

/// Everything the screens share, handed to them explicitly on every update.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub store: ProjectStore,
    pub footer: FooterState,
    pub backend: MockBackend,
    pub profile_service: MockProfileService,
    /// Last saved profile of the signed-in user.
    pub profile: ProfileForm,
    /// Email of the signed-in user, if any.
    pub session: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = ProjectStore::seeded();
        Self {
            backend: MockBackend::seeded(store.clone(), config.mock_latency),
            store,
            footer: FooterState::new(),
            profile_service: MockProfileService::new(config.save_delay),
            profile: ProfileForm::new("Demo User", "demo.user@example.com"),
            session: None,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
