//! Admin-only endpoints, including promoting a fresh account to support.

use serde_json::json;
use std::io::Write;

use super::unix_timestamp;
use crate::error::HarnessError;
use crate::harness::{Check, Harness};
use crate::session::Slot;

/// Password for the account promoted to the support role.
const SUPPORT_USER_PASSWORD: &str = "123456";

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    let Some(token) = h.slot(Slot::AdminToken) else {
        return h.skip("Skipping admin tests - no admin token available");
    };

    h.check(Check::get("/api/admin/stats", "Get Admin Stats").bearer(token.clone()))?;
    h.check(Check::get("/api/admin/users", "Get All Users").bearer(token.clone()))?;

    let timestamp = unix_timestamp();
    let support_email = format!("support_{timestamp}@test.com");
    h.session_mut()
        .set(Slot::SupportUserEmail, Some(support_email.clone()));

    h.check(
        Check::post("/api/auth/signup", "Create User for Support Role")
            .json(json!({
                "name": format!("Support User {timestamp}"),
                "email": support_email,
                "password": SUPPORT_USER_PASSWORD,
            }))
            .expect(201),
    )?;

    h.check(
        Check::post("/api/admin/support", "Add Support Member")
            .bearer(token)
            .json(json!({ "email": support_email })),
    )?;

    Ok(())
}
