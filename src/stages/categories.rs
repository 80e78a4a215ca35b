//! Category lifecycle: list, create, get, update. Deletion happens in cleanup.

use serde_json::json;
use std::io::Write;

use super::unix_timestamp;
use crate::error::HarnessError;
use crate::harness::{Check, Harness};
use crate::session::Slot;

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    h.check(Check::get("/api/categories", "Get All Categories"))?;

    match h.slot(Slot::AdminToken) {
        Some(token) => {
            let response = h.check(
                Check::post("/api/categories", "Create Category")
                    .bearer(token)
                    .json(json!({
                        "name": format!("Test Category {}", unix_timestamp()),
                        "description": "A test category for API testing",
                        "icon": "test-icon",
                    }))
                    .expect(201),
            )?;
            if let Some(body) = response.captured(201) {
                h.session_mut()
                    .set(Slot::CategoryId, body.str_at("data._id"));
            }
        }
        None => h.skip("Skipping Create Category - no admin token available")?,
    }

    let Some(category_id) = h.slot(Slot::CategoryId) else {
        return h.skip("Skipping category lookups - no category id available");
    };

    h.check(Check::get(
        format!("/api/categories/{category_id}"),
        "Get Single Category",
    ))?;

    if let Some(token) = h.slot(Slot::AdminToken) {
        h.check(
            Check::put(format!("/api/categories/{category_id}"), "Update Category")
                .bearer(token)
                .json(json!({
                    "name": format!("Updated Category {}", unix_timestamp()),
                    "description": "Updated description",
                    "icon": "updated-icon",
                })),
        )?;
    }

    Ok(())
}
