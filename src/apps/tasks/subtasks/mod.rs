//! subtasks: checklist items owned by a task, scoped through it.

pub mod commands;
pub mod models;
pub mod queries;
