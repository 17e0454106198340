/// Placeholder shown while the next screen is being built.
#[derive(Debug, Clone, Default)]
pub struct LoadingPageScreen;
