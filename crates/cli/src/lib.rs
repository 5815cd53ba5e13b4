//! `notes-cli` library crate.
//!
//! Argument parsing, command execution against the store, and text
//! rendering. The binary entrypoint lives in `main.rs`.

pub mod cli;
pub mod commands;
pub mod render;
