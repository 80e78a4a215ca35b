use std::io::Write;

use crate::error::HarnessError;
use crate::harness::{Check, Harness};

pub(super) fn run<W: Write>(h: &mut Harness<'_, W>) -> Result<(), HarnessError> {
    h.check(Check::get("/health", "Health Check"))?;
    Ok(())
}
