use std::io::Write;

use crate::error::HarnessError;
use crate::harness::{Check, Harness};
use crate::session::Slot;

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    let Some(token) = h.slot(Slot::UserToken) else {
        return h.skip("Skipping chat tests - no user token available");
    };

    h.check(Check::get("/api/chat/conversations", "Get Conversations").bearer(token.clone()))?;

    // History with the test user's own id; the endpoint only needs a valid user id.
    match h.slot(Slot::UserId) {
        Some(user_id) => {
            h.check(Check::get(format!("/api/chat/{user_id}"), "Get Chat History").bearer(token))?;
        }
        None => h.skip("Skipping Get Chat History - no user id available")?,
    }

    Ok(())
}
