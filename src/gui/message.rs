use crate::{
    core::LayoutSnapshot,
    gui::screens::{
        Route, dashboard::DashboardMessage, edit_profile::EditProfileMessage,
        login::LoginMessage, project_detail::ProjectDetailMessage, register::RegisterMessage,
    },
};

#[derive(Debug, Clone)]
pub enum Message {
    Login(LoginMessage),
    Register(RegisterMessage),
    Dashboard(DashboardMessage),
    ProjectDetail(ProjectDetailMessage),
    EditProfile(EditProfileMessage),
    Navigate(Route),
    /// The viewport now has this height in pixels; `layout` is measured after the reflow.
    Resize {
        viewport_height: u32,
        layout: LayoutSnapshot,
    },
    /// The page scrolled; carries fresh pager and footer measurements.
    Scroll(LayoutSnapshot),
}
