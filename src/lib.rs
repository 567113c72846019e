//! Star Shooter — a small arcade shooter for the terminal.
//!
//! The library holds everything that does not need a live terminal: the
//! entity model, the starfield, the enemy spawner, the physics step, the
//! game state machine and the renderer (which writes to any `io::Write`).

pub mod audio;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod game;
pub mod spawner;
pub mod starfield;
