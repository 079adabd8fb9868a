//! `pwclient` process wrapper for patchwork-triage
//!
//! Lists the `New` patch queue and applies bulk state updates by running the
//! Patchwork command-line client as a child process.

mod client;
mod config;
mod error;

pub use client::{LIST_FORMAT, LIST_STATE, Pwclient};
pub use config::PwclientConfig;
pub use error::{PwclientError, Result};
