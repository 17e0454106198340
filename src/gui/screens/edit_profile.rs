use crate::{
    core::{Avatar, FooterScope, MockProfileService, ProfileEditor},
    gui::{
        AppState,
        screens::{Route, Screen, enter_footer},
    },
};

#[derive(Debug)]
pub struct EditProfileScreen {
    editor: ProfileEditor<MockProfileService>,
    _footer: FooterScope,
}

#[derive(Debug, Clone)]
pub enum EditProfileMessage {
    DisplayNameChanged(String),
    EmailChanged(String),
    CurrentPasswordChanged(String),
    NewPasswordChanged(String),
    ConfirmNewPasswordChanged(String),
    PickAvatar(Avatar),
    RemoveAvatar,
    ToggleShowCurrent,
    ToggleShowNew,
    Save,
    Back,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    Back,
}

impl EditProfileScreen {
    pub fn new(state: &AppState) -> Self {
        let footer = enter_footer::<Self>(state);
        Self {
            editor: ProfileEditor::new(
                state.profile_service.clone(),
                state.profile.clone(),
                state.config.status_clear_after,
            ),
            _footer: footer,
        }
    }

    pub fn editor(&self) -> &ProfileEditor<MockProfileService> {
        &self.editor
    }
}

impl Screen for EditProfileScreen {
    type Message = EditProfileMessage;
    type ParentMessage = ParentMessage;

    const FOOTER_THRESHOLD: Option<u32> = Some(735);

    fn route(&self) -> Route {
        Route::EditProfile
    }

    async fn update(
        &mut self,
        message: EditProfileMessage,
        state: &mut AppState,
    ) -> Option<ParentMessage> {
        match message {
            EditProfileMessage::DisplayNameChanged(value) => {
                self.editor.model_mut().display_name = value
            }
            EditProfileMessage::EmailChanged(value) => self.editor.model_mut().email = value,
            EditProfileMessage::CurrentPasswordChanged(value) => {
                self.editor.model_mut().current_password = value
            }
            EditProfileMessage::NewPasswordChanged(value) => {
                self.editor.model_mut().new_password = value
            }
            EditProfileMessage::ConfirmNewPasswordChanged(value) => {
                self.editor.model_mut().confirm_new_password = value
            }
            // A rejected file is reported through the editor's status line.
            EditProfileMessage::PickAvatar(avatar) => {
                let _ = self.editor.pick_avatar(avatar);
            }
            EditProfileMessage::RemoveAvatar => self.editor.remove_avatar(),
            EditProfileMessage::ToggleShowCurrent => self.editor.toggle_show_current(),
            EditProfileMessage::ToggleShowNew => self.editor.toggle_show_new(),
            EditProfileMessage::Save => {
                if self.editor.save().await.is_ok() {
                    state.profile = self.editor.model().clone();
                }
            }
            EditProfileMessage::Back => return Some(ParentMessage::Back),
        }
        None
    }
}
