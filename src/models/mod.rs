//! Data models for aula.
//!
//! This module contains the core data structures used throughout the crate.

mod filter;
mod record;

pub use filter::RosterFilter;
pub use record::{Record, Role, Row};
