//! Delete what the run created: registration, then competition, then category.
//!
//! Test user accounts are left in place.

use std::io::Write;

use crate::error::HarnessError;
use crate::harness::{Check, Harness};
use crate::session::Slot;

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    let Some(token) = h.slot(Slot::AdminToken) else {
        return h.skip("Skipping cleanup - no admin token available");
    };

    let targets = [
        (Slot::RegistrationId, "/api/registrations", "Delete Test Registration"),
        (Slot::CompetitionId, "/api/competitions", "Delete Test Competition"),
        (Slot::CategoryId, "/api/categories", "Delete Test Category"),
    ];

    for (slot, collection, name) in targets {
        if let Some(id) = h.slot(slot) {
            h.check(Check::delete(format!("{collection}/{id}"), name).bearer(token.clone()))?;
        }
    }

    h.note("\nNote: Test users (testuser_* and support_*) remain in database.")?;
    h.note("They can be manually removed from the database if needed.")?;

    Ok(())
}
