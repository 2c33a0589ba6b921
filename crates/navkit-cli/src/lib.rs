//! Library components for the navkit CLI.

pub mod logging;
pub mod script;
pub mod summary;
