//! status application: the global status reference table.
//!
//! An open enumeration, not a workflow state machine; any status can
//! follow any other.

pub mod models;
pub mod queries;
pub mod views;
