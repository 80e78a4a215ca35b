//! Tokens and identifiers threaded between stages.

use std::fmt;
use tracing::debug;

/// Named slot in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    AdminToken,
    AdminRefreshToken,
    UserToken,
    UserRefreshToken,
    UserId,
    CategoryId,
    CompetitionId,
    RegistrationId,
    TestUserEmail,
    SupportUserEmail,
}

impl Slot {
    pub const ALL: [Slot; 10] = [
        Slot::AdminToken,
        Slot::AdminRefreshToken,
        Slot::UserToken,
        Slot::UserRefreshToken,
        Slot::UserId,
        Slot::CategoryId,
        Slot::CompetitionId,
        Slot::RegistrationId,
        Slot::TestUserEmail,
        Slot::SupportUserEmail,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Slot::AdminToken => "admin_token",
            Slot::AdminRefreshToken => "admin_refresh_token",
            Slot::UserToken => "user_token",
            Slot::UserRefreshToken => "user_refresh_token",
            Slot::UserId => "user_id",
            Slot::CategoryId => "category_id",
            Slot::CompetitionId => "competition_id",
            Slot::RegistrationId => "registration_id",
            Slot::TestUserEmail => "test_user_email",
            Slot::SupportUserEmail => "support_user_email",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Session state for one run. Lives only in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub admin_token: Option<String>,
    pub admin_refresh_token: Option<String>,
    pub user_token: Option<String>,
    pub user_refresh_token: Option<String>,
    pub user_id: Option<String>,
    pub category_id: Option<String>,
    pub competition_id: Option<String>,
    pub registration_id: Option<String>,
    pub test_user_email: Option<String>,
    pub support_user_email: Option<String>,
}

impl Session {
    fn slot_mut(&mut self, slot: Slot) -> &mut Option<String> {
        match slot {
            Slot::AdminToken => &mut self.admin_token,
            Slot::AdminRefreshToken => &mut self.admin_refresh_token,
            Slot::UserToken => &mut self.user_token,
            Slot::UserRefreshToken => &mut self.user_refresh_token,
            Slot::UserId => &mut self.user_id,
            Slot::CategoryId => &mut self.category_id,
            Slot::CompetitionId => &mut self.competition_id,
            Slot::RegistrationId => &mut self.registration_id,
            Slot::TestUserEmail => &mut self.test_user_email,
            Slot::SupportUserEmail => &mut self.support_user_email,
        }
    }

    /// Current value of a slot, owned so callers can keep borrowing the harness.
    pub fn get(&self, slot: Slot) -> Option<String> {
        let value = match slot {
            Slot::AdminToken => &self.admin_token,
            Slot::AdminRefreshToken => &self.admin_refresh_token,
            Slot::UserToken => &self.user_token,
            Slot::UserRefreshToken => &self.user_refresh_token,
            Slot::UserId => &self.user_id,
            Slot::CategoryId => &self.category_id,
            Slot::CompetitionId => &self.competition_id,
            Slot::RegistrationId => &self.registration_id,
            Slot::TestUserEmail => &self.test_user_email,
            Slot::SupportUserEmail => &self.support_user_email,
        };
        value.clone()
    }

    pub fn is_set(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    /// Overwrite a slot. A `None` value clears it.
    pub fn set(&mut self, slot: Slot, value: Option<String>) {
        debug!(slot = %slot, present = value.is_some(), "session slot updated");
        *self.slot_mut(slot) = value;
    }
}
