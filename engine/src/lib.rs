//! Random room graphs and a small text adventure played on them.
//!
//! The `buildrooms` binary generates a connected set of rooms and stores it as one text file per room
//! in a fresh run directory. The `adventure` binary loads the newest run directory and lets a player
//! walk from the start room to the end room.

#[macro_use]
pub mod report;

pub mod algo;
pub mod cli;
pub mod datastr;
pub mod error;
pub mod game;
pub mod io;
pub mod rooms;
pub mod run_dir;
pub mod time_request;

#[allow(dead_code)]
mod built_info {
    // The file has been placed there by the build script.
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub use error::{Error, Result};
