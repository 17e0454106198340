use tracing::info;

use crate::{
    core::{
        FooterScope, ProfileError, ProfileForm,
        profile::{MIN_PASSWORD_STRENGTH, is_valid_email, password_strength},
    },
    gui::{
        AppState,
        screens::{Route, Screen, enter_footer},
    },
};

#[derive(Debug)]
pub struct RegisterScreen {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    _footer: FooterScope,
}

#[derive(Debug, Clone)]
pub enum RegisterMessage {
    DisplayNameChanged(String),
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    Submit,
    OpenLogin,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    Registered,
    OpenLogin,
}

impl RegisterScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            display_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            error: None,
            _footer: enter_footer::<Self>(state),
        }
    }

    fn validate(&self) -> Result<(), ProfileError> {
        if self.display_name.trim().is_empty() {
            return Err(ProfileError::BlankName);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ProfileError::InvalidEmail);
        }
        if self.password != self.confirm_password {
            return Err(ProfileError::PasswordMismatch);
        }
        if password_strength(&self.password) < MIN_PASSWORD_STRENGTH {
            return Err(ProfileError::WeakPassword);
        }
        Ok(())
    }
}

impl Screen for RegisterScreen {
    type Message = RegisterMessage;
    type ParentMessage = ParentMessage;

    const FOOTER_THRESHOLD: Option<u32> = Some(675);

    fn route(&self) -> Route {
        Route::Register
    }

    async fn update(
        &mut self,
        message: RegisterMessage,
        state: &mut AppState,
    ) -> Option<ParentMessage> {
        match message {
            RegisterMessage::DisplayNameChanged(name) => self.display_name = name,
            RegisterMessage::EmailChanged(email) => self.email = email,
            RegisterMessage::PasswordChanged(password) => self.password = password,
            RegisterMessage::ConfirmPasswordChanged(confirm) => self.confirm_password = confirm,
            RegisterMessage::OpenLogin => return Some(ParentMessage::OpenLogin),
            RegisterMessage::Submit => {
                if let Err(e) = self.validate() {
                    self.error = Some(e.to_string());
                    return None;
                }
                info!(email = self.email.trim(), "account registered");
                state.profile = ProfileForm::new(self.display_name.trim(), self.email.trim());
                self.error = None;
                return Some(ParentMessage::Registered);
            }
        }
        None
    }
}
