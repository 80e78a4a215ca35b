pub mod config;
pub mod error;
pub mod exit;
pub mod harness;
pub mod interrupt;
pub mod session;
pub mod stages;
pub mod utils;
