//! Registration lifecycle: create, list own, list all, approve.

use serde_json::{json, Value};
use std::io::Write;

use crate::error::HarnessError;
use crate::harness::{Check, Harness};
use crate::session::Slot;

fn team_members() -> Value {
    json!([
        {"name": "Member 1", "email": "member1@test.com", "phone": "+1234567890"},
        {"name": "Member 2", "email": "member2@test.com", "phone": "+1234567891"},
    ])
}

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    match (h.slot(Slot::UserToken), h.slot(Slot::CompetitionId)) {
        (Some(token), Some(competition_id)) => {
            let response = h.check(
                Check::post("/api/registrations", "Create Registration")
                    .bearer(token)
                    .json(json!({
                        "competition": competition_id,
                        "teamName": "Test Team",
                        "members": team_members(),
                    }))
                    .expect(201),
            )?;
            if let Some(body) = response.captured(201) {
                h.session_mut()
                    .set(Slot::RegistrationId, body.str_at("data._id"));
            }
        }
        _ => h.skip("Skipping Create Registration - requires user token and competition id")?,
    }

    match h.slot(Slot::UserToken) {
        Some(token) => {
            h.check(Check::get("/api/registrations/my", "Get My Registrations").bearer(token))?;
        }
        None => h.skip("Skipping Get My Registrations - no user token available")?,
    }

    let Some(admin_token) = h.slot(Slot::AdminToken) else {
        return h.skip("Skipping admin registration checks - no admin token available");
    };

    h.check(
        Check::get("/api/registrations", "Get All Registrations (Admin)")
            .bearer(admin_token.clone()),
    )?;

    match h.slot(Slot::RegistrationId) {
        Some(registration_id) => {
            h.check(
                Check::put(
                    format!("/api/registrations/{registration_id}/approve"),
                    "Approve Registration",
                )
                .bearer(admin_token),
            )?;
        }
        None => h.skip("Skipping Approve Registration - no registration id available")?,
    }

    Ok(())
}
