//! Route handlers organized by access level.

pub mod api;
pub mod public;
