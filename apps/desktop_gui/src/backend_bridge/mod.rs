//! Bridge between the egui thread and the tokio worker that talks to the bookapi.

pub mod commands;
pub mod runtime;
