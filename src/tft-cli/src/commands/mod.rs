//! Command handlers for tft CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod hash;
pub mod refine;
pub mod store;
