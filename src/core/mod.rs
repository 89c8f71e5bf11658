//! Core - grid storage, errors, logging and the hot-path macros

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;

pub mod error;
pub mod grid;
pub mod logging;
