//! Chicken Chop: a single-screen arcade shooter.
//!
//! The library is the headless core: entities, the stage that tracks them,
//! the camera, and the `Game` context that routes input and frames.  The
//! binary adds the terminal frontend.

pub mod camera;
pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod level;
pub mod menu;
pub mod name_store;
pub mod pickup;
pub mod projectile;
pub mod stage;
pub mod store;
pub mod target;
pub mod telemetry;
