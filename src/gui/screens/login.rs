use tracing::info;

use crate::{
    core::{FooterScope, profile::is_valid_email},
    gui::{
        AppState,
        screens::{Route, Screen, enter_footer},
    },
};

#[derive(Debug)]
pub struct LoginScreen {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    _footer: FooterScope,
}

#[derive(Debug, Clone)]
pub enum LoginMessage {
    EmailChanged(String),
    PasswordChanged(String),
    Submit,
    OpenRegister,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    SignedIn,
    OpenRegister,
}

impl LoginScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            error: None,
            _footer: enter_footer::<Self>(state),
        }
    }
}

impl Screen for LoginScreen {
    type Message = LoginMessage;
    type ParentMessage = ParentMessage;

    fn route(&self) -> Route {
        Route::Login
    }

    async fn update(&mut self, message: LoginMessage, state: &mut AppState) -> Option<ParentMessage> {
        match message {
            LoginMessage::EmailChanged(email) => self.email = email,
            LoginMessage::PasswordChanged(password) => self.password = password,
            LoginMessage::OpenRegister => return Some(ParentMessage::OpenRegister),
            LoginMessage::Submit => {
                let email = self.email.trim();
                if !is_valid_email(email) {
                    self.error = Some("Invalid email.".to_string());
                    return None;
                }
                if self.password.is_empty() {
                    self.error = Some("Please enter your password.".to_string());
                    return None;
                }
                info!(email, "signed in");
                state.session = Some(email.to_string());
                self.error = None;
                return Some(ParentMessage::SignedIn);
            }
        }
        None
    }
}
