//! Headless screens of the dashboard app.
//!
//! Each screen owns its page state and holds the footer settings for as long
//! as it is shown. A frontend renders from these types and feeds user input
//! back as [`Message`]s.

mod app;
mod message;
pub mod screens;
mod state;

pub use app::ProjdashApp;
pub use message::Message;
pub use screens::{Route, Screen, ScreenData};
pub use state::AppState;
