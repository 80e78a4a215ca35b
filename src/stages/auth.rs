//! Login, signup, "who am I" and token refresh.

use serde_json::json;
use std::io::Write;

use super::unix_timestamp;
use crate::error::HarnessError;
use crate::harness::{Check, Harness};
use crate::session::Slot;

/// Password for the throwaway account created by each run.
const TEST_USER_PASSWORD: &str = "TestPass123!";

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    let admin_email = h.config().admin_email.clone();
    let admin_password = h.config().admin_password.clone();

    let response = h.check(
        Check::post("/api/auth/login", "Admin Login").json(json!({
            "email": admin_email,
            "password": admin_password,
        })),
    )?;
    if let Some(body) = response.captured(200) {
        let session = h.session_mut();
        session.set(Slot::AdminToken, body.str_at("data.accessToken"));
        session.set(Slot::AdminRefreshToken, body.str_at("data.refreshToken"));
    }

    let timestamp = unix_timestamp();
    let test_email = format!("testuser_{timestamp}@test.com");
    h.session_mut()
        .set(Slot::TestUserEmail, Some(test_email.clone()));

    let response = h.check(
        Check::post("/api/auth/signup", "User Signup")
            .json(json!({
                "name": format!("Test User {timestamp}"),
                "email": test_email,
                "password": TEST_USER_PASSWORD,
                "phone": signup_phone(timestamp),
            }))
            .expect(201),
    )?;
    if let Some(body) = response.captured(201) {
        let session = h.session_mut();
        session.set(Slot::UserToken, body.str_at("data.accessToken"));
        session.set(Slot::UserRefreshToken, body.str_at("data.refreshToken"));
        session.set(Slot::UserId, body.str_at("data.user._id"));
    }

    let response = h.check(
        Check::post("/api/auth/login", "User Login").json(json!({
            "email": test_email,
            "password": TEST_USER_PASSWORD,
        })),
    )?;
    if let Some(body) = response.captured(200) {
        let session = h.session_mut();
        session.set(Slot::UserToken, body.str_at("data.accessToken"));
        session.set(Slot::UserRefreshToken, body.str_at("data.refreshToken"));
    }

    match h.slot(Slot::UserToken) {
        Some(token) => {
            h.check(Check::get("/api/auth/me", "Get Current User (Me)").bearer(token))?;
        }
        None => h.skip("Skipping Get Current User (Me) - no user token available")?,
    }

    match h.slot(Slot::UserRefreshToken) {
        Some(refresh_token) => {
            let response = h.check(
                Check::post("/api/auth/refresh", "Refresh Token")
                    .json(json!({ "refreshToken": refresh_token })),
            )?;
            if let Some(body) = response.captured(200) {
                h.session_mut()
                    .set(Slot::UserToken, body.str_at("data.accessToken"));
            }
        }
        None => h.skip("Skipping Refresh Token - no refresh token available")?,
    }

    Ok(())
}

/// `+1234567` followed by the last four digits of the timestamp, zero-padded.
fn signup_phone(timestamp: i64) -> String {
    format!("+1234567{:04}", timestamp.rem_euclid(10_000))
}
