//! Core of a terminal Space Invaders clone.
//!
//! The library holds everything that can be exercised without a terminal:
//! entity motion, the enemy formation sweep, per-tick collision resolution,
//! the game state machine and the asset catalogue. The binary adds the
//! crossterm rendering layer and the frame loop on top.

pub mod assets;
pub mod collision;
pub mod config;
pub mod entities;
pub mod formation;
pub mod game;
