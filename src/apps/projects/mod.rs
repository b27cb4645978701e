//! projects application: projects and their memberships.

pub mod commands;
pub mod hypermedia;
pub mod models;
pub mod queries;
pub mod views;
