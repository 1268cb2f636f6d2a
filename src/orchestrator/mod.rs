//! Application-level orchestration.
//!
//! This module owns the command/event loop between presentation layers and
//! the remote service: it issues the three request kinds, keeps busy
//! accounting honest on every exit path, and suppresses stale responses.
//! UI/CLI layers call into this module to keep responsibilities separated.

mod controller;

pub(crate) use controller::{run_controller, UiCommand};
