//! Core of a top-down homing shooter.
//!
//! Everything in here is terminal-agnostic except for the key mapping in
//! [`input`], which speaks `crossterm` key codes.  State transitions are pure
//! functions from one [`entities::GameState`] snapshot to the next.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod scheduler;
