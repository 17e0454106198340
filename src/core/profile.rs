//! Edit-profile form: field state, validation rules, and the save flow.

use std::{
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use anyhow::anyhow;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

/// Largest avatar upload accepted, in bytes.
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;
/// Weakest new password accepted on save.
pub const MIN_PASSWORD_STRENGTH: u8 = 3;

const STRENGTH_LABELS: [&str; 6] = ["Too weak", "Weak", "Fair", "Good", "Strong", "Very strong"];
const SAVE_FAILED_FALLBACK: &str = "Update failed. Please try again.";
const SAVE_SUCCEEDED: &str = "Updated successfully";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Please enter your name.")]
    BlankName,
    #[error("Invalid email.")]
    InvalidEmail,
    #[error("New password and confirm password do not match.")]
    PasswordMismatch,
    #[error("Please choose a stronger password (min 8 chars, mixed case, numbers, symbol).")]
    WeakPassword,
    #[error("Please enter your current password to change password.")]
    MissingCurrentPassword,
    #[error("{0}")]
    SaveFailed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AvatarError {
    #[error("Please choose an image file (PNG, JPG, WEBP, GIF).")]
    UnsupportedType,
    #[error("Image is too large. Max 2 MB.")]
    TooLarge,
}

/// An uploaded avatar image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

pub fn validate_avatar(avatar: &Avatar) -> Result<(), AvatarError> {
    static IMAGE_MIME: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)^image/(png|jpe?g|webp|gif)$").expect("valid regex")
    });
    if !IMAGE_MIME.is_match(&avatar.mime_type) {
        return Err(AvatarError::UnsupportedType);
    }
    if avatar.bytes.len() > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
    EMAIL.is_match(email)
}

/// Scores a password from 0 to 5: one point each for 8+ characters, an
/// uppercase letter, a lowercase letter, a digit, and a symbol.
pub fn password_strength(password: &str) -> u8 {
    [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ]
    .into_iter()
    .filter(|&met| met)
    .count() as u8
}

pub fn strength_label(strength: u8) -> &'static str {
    STRENGTH_LABELS[usize::from(strength.min(5))]
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub avatar: Option<Avatar>,
    pub display_name: String,
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

impl ProfileForm {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn wants_password_change(&self) -> bool {
        !self.new_password.is_empty() || !self.confirm_new_password.is_empty()
    }

    /// Checks the form in the order the page reports problems; the first failure wins.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.display_name.trim().is_empty() {
            return Err(ProfileError::BlankName);
        }
        if !is_valid_email(&self.email) {
            return Err(ProfileError::InvalidEmail);
        }
        if self.wants_password_change() {
            if self.new_password != self.confirm_new_password {
                return Err(ProfileError::PasswordMismatch);
            }
            if password_strength(&self.new_password) < MIN_PASSWORD_STRENGTH {
                return Err(ProfileError::WeakPassword);
            }
            if self.current_password.is_empty() {
                return Err(ProfileError::MissingCurrentPassword);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarChange {
    Set(Avatar),
    Remove,
}

/// Fields that differ from the last saved profile. `None` means unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<PasswordChange>,
    pub avatar: Option<AvatarChange>,
}

impl ProfileUpdate {
    pub fn between(saved: &ProfileForm, edited: &ProfileForm) -> Self {
        let display_name = edited.display_name.trim();
        Self {
            display_name: (display_name != saved.display_name.trim())
                .then(|| display_name.to_string()),
            email: (edited.email != saved.email).then(|| edited.email.clone()),
            password: edited.wants_password_change().then(|| PasswordChange {
                current: edited.current_password.clone(),
                new: edited.new_password.clone(),
            }),
            avatar: match (&saved.avatar, &edited.avatar) {
                (Some(before), Some(after)) if before == after => None,
                (None, None) => None,
                (_, Some(after)) => Some(AvatarChange::Set(after.clone())),
                (Some(_), None) => Some(AvatarChange::Remove),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Account backend used by the save flow.
pub trait ProfileService {
    fn update(&self, update: ProfileUpdate) -> impl Future<Output = anyhow::Result<()>>;
}

/// Accepts every update after a fixed delay and remembers what it received.
#[derive(Debug, Clone)]
pub struct MockProfileService {
    delay: Duration,
    received: Arc<Mutex<Vec<ProfileUpdate>>>,
    fail_next: Arc<AtomicBool>,
}

impl MockProfileService {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            received: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn fail_next_call(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn received(&self) -> Vec<ProfileUpdate> {
        self.received
            .lock()
            .map(|updates| updates.clone())
            .unwrap_or_default()
    }
}

impl Default for MockProfileService {
    fn default() -> Self {
        Self::new(Duration::from_millis(900))
    }
}

impl ProfileService for MockProfileService {
    async fn update(&self, update: ProfileUpdate) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(anyhow!("Profile service unavailable"));
        }
        if let Ok(mut received) = self.received.lock() {
            received.push(update);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Message shown next to the save button. Expires back to idle after a delay.
#[derive(Debug, Clone, Default)]
struct StatusLine {
    kind: UpdateStatus,
    message: String,
    expires_at: Option<Instant>,
}

impl StatusLine {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Holds `saving` up while a save is in flight, including when the save is dropped midway.
struct SavingFlag<'a>(&'a mut bool);

impl<'a> SavingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for SavingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// The edit-profile page state.
#[derive(Debug)]
pub struct ProfileEditor<S> {
    service: S,
    saved: ProfileForm,
    model: ProfileForm,
    saving: bool,
    status: StatusLine,
    status_clear_after: Duration,
    show_current: bool,
    show_new: bool,
}

impl<S: ProfileService> ProfileEditor<S> {
    pub fn new(service: S, profile: ProfileForm, status_clear_after: Duration) -> Self {
        Self {
            service,
            saved: profile.clone(),
            model: profile,
            saving: false,
            status: StatusLine::default(),
            status_clear_after,
            show_current: false,
            show_new: false,
        }
    }

    pub fn model(&self) -> &ProfileForm {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ProfileForm {
        &mut self.model
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn status(&self) -> UpdateStatus {
        if self.status.is_expired() {
            UpdateStatus::Idle
        } else {
            self.status.kind
        }
    }

    pub fn status_message(&self) -> &str {
        if self.status.is_expired() {
            ""
        } else {
            &self.status.message
        }
    }

    pub fn strength(&self) -> u8 {
        password_strength(&self.model.new_password)
    }

    pub fn strength_label(&self) -> &'static str {
        strength_label(self.strength())
    }

    pub fn show_current(&self) -> bool {
        self.show_current
    }

    pub fn show_new(&self) -> bool {
        self.show_new
    }

    pub fn toggle_show_current(&mut self) {
        self.show_current = !self.show_current;
    }

    pub fn toggle_show_new(&mut self) {
        self.show_new = !self.show_new;
    }

    fn set_status(&mut self, kind: UpdateStatus, message: impl Into<String>) {
        self.status = StatusLine {
            kind,
            message: message.into(),
            expires_at: (!self.status_clear_after.is_zero())
                .then(|| Instant::now() + self.status_clear_after),
        };
    }

    /// Replaces the avatar if the file passes validation; otherwise keeps the old one.
    pub fn pick_avatar(&mut self, avatar: Avatar) -> Result<(), AvatarError> {
        if let Err(e) = validate_avatar(&avatar) {
            self.set_status(UpdateStatus::Error, e.to_string());
            return Err(e);
        }
        self.model.avatar = Some(avatar);
        Ok(())
    }

    pub fn remove_avatar(&mut self) {
        self.model.avatar = None;
    }

    /// Validates the form and sends the changed fields to the profile service.
    pub async fn save(&mut self) -> Result<(), ProfileError> {
        self.set_status(UpdateStatus::Idle, "");
        if let Err(e) = self.model.validate() {
            self.set_status(UpdateStatus::Error, e.to_string());
            return Err(e);
        }

        let update = ProfileUpdate::between(&self.saved, &self.model);
        let result = if update.is_empty() {
            Ok(())
        } else {
            let _saving = SavingFlag::raise(&mut self.saving);
            self.service.update(update).await
        };

        match result {
            Ok(()) => {
                info!("profile updated");
                self.model.current_password.clear();
                self.model.new_password.clear();
                self.model.confirm_new_password.clear();
                self.saved = self.model.clone();
                self.set_status(UpdateStatus::Success, SAVE_SUCCEEDED);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "profile update failed");
                let message = match e.to_string() {
                    m if m.trim().is_empty() => SAVE_FAILED_FALLBACK.to_string(),
                    m => m,
                };
                self.set_status(UpdateStatus::Error, message.clone());
                Err(ProfileError::SaveFailed(message))
            }
        }
    }
}
