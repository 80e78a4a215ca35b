//! A regular user must be refused on admin-only endpoints.

use serde_json::json;
use std::io::Write;

use crate::error::HarnessError;
use crate::harness::{Check, Harness};
use crate::session::Slot;

const FORBIDDEN: u16 = 403;

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    let Some(token) = h.slot(Slot::UserToken) else {
        return h.skip("Skipping authorization tests - no user token available");
    };

    h.check(
        Check::post("/api/categories", "User Creating Category (Should Fail)")
            .bearer(token.clone())
            .json(json!({
                "name": "Unauthorized Category",
                "description": "This should fail",
                "icon": "fail-icon",
            }))
            .expect(FORBIDDEN)
            .expect_failure(),
    )?;

    h.check(
        Check::get("/api/admin/stats", "User Accessing Admin Stats (Should Fail)")
            .bearer(token)
            .expect(FORBIDDEN)
            .expect_failure(),
    )?;

    Ok(())
}
