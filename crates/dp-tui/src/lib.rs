//! Terminal UI for the Dicepick dice game.
//!
//! A ratatui front-end with a title screen for seed entry, the board with
//! cursor-driven picking and targeting, and a game-over screen. Every rule
//! decision is made by `dp-core`; this crate only draws and routes keys.

pub mod app;
pub mod screen;
pub mod shared;
pub mod terminal;
