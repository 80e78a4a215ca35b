use serde_json::json;
use std::io::Write;

use crate::error::HarnessError;
use crate::harness::{Check, Harness};
use crate::session::Slot;

/// The chatbot is disabled server-side; it must answer 503.
const CHATBOT_DISABLED_STATUS: u16 = 503;

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    let Some(token) = h.slot(Slot::UserToken) else {
        return h.skip("Skipping chatbot test - no user token available");
    };

    h.check(
        Check::post("/api/chatbot", "Chatbot Query (Disabled - Expect 503)")
            .bearer(token)
            .json(json!({ "message": "Hello chatbot!" }))
            .expect(CHATBOT_DISABLED_STATUS)
            .expect_failure(),
    )?;

    Ok(())
}
