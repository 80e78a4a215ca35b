//! Competition lifecycle: listing variants, calendar, create, get, update.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::io::Write;

use super::unix_timestamp;
use crate::error::HarnessError;
use crate::harness::{Check, Harness};
use crate::session::Slot;

/// Start and end timestamps (RFC 3339) for an event `days` ahead of `now`
/// lasting `hours`.
fn schedule(now: DateTime<Utc>, days: i64, hours: i64) -> (String, String) {
    let start = now + Duration::days(days);
    let end = start + Duration::hours(hours);
    (start.to_rfc3339(), end.to_rfc3339())
}

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    h.check(Check::get("/api/competitions", "Get All Competitions"))?;
    h.check(
        Check::get("/api/competitions", "Get Competitions (Paginated)")
            .query("page", 1)
            .query("limit", 10),
    )?;
    h.check(
        Check::get("/api/competitions", "Get Competitions (Sorted by Deadline)")
            .query("sort", "-registrationDeadline"),
    )?;
    h.check(Check::get("/api/competitions", "Search Competitions").query("search", "test"))?;

    match h.slot(Slot::CategoryId) {
        Some(category_id) => {
            h.check(
                Check::get("/api/competitions", "Filter Competitions by Category")
                    .query("category", category_id),
            )?;
        }
        None => h.skip("Skipping category filter - no category id available")?,
    }

    h.check(Check::get(
        "/api/competitions/calendar",
        "Get Competitions Calendar",
    ))?;

    match (h.slot(Slot::AdminToken), h.slot(Slot::CategoryId)) {
        (Some(token), Some(category_id)) => {
            let (start, end) = schedule(Utc::now(), 10, 3);
            let response = h.check(
                Check::post("/api/competitions", "Create Competition")
                    .bearer(token)
                    .json(json!({
                        "title": format!("Test Competition {}", unix_timestamp()),
                        "description": "A comprehensive test competition",
                        "category": category_id,
                        "venue": "Test Venue",
                        "building": "Test Building",
                        "startDate": start,
                        "endDate": end,
                        "dayNumber": 1,
                    }))
                    .expect(201),
            )?;
            if let Some(body) = response.captured(201) {
                h.session_mut()
                    .set(Slot::CompetitionId, body.str_at("data._id"));
            }
        }
        _ => h.skip("Skipping Create Competition - requires admin token and category id")?,
    }

    let Some(competition_id) = h.slot(Slot::CompetitionId) else {
        return h.skip("Skipping competition lookups - no competition id available");
    };

    h.check(Check::get(
        format!("/api/competitions/{competition_id}"),
        "Get Single Competition",
    ))?;

    if let Some(token) = h.slot(Slot::AdminToken) {
        let (start, end) = schedule(Utc::now(), 15, 4);
        let category_id = h.slot(Slot::CategoryId);
        h.check(
            Check::put(
                format!("/api/competitions/{competition_id}"),
                "Update Competition",
            )
            .bearer(token)
            .json(json!({
                "title": format!("Updated Competition {}", unix_timestamp()),
                "description": "Updated description",
                "category": category_id,
                "venue": "Updated Venue",
                "building": "Updated Building",
                "startDate": start,
                "endDate": end,
                "dayNumber": 2,
            })),
        )?;
    }

    Ok(())
}
