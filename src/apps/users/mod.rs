//! users application: self-service accounts and login.

pub mod commands;
pub mod hypermedia;
pub mod models;
pub mod queries;
pub mod views;
