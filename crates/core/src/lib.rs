//! Domain rules for the tugas penyuluhan API.
//!
//! Pure functions and constants shared by the DB and API layers. Nothing in
//! this crate performs I/O.

pub mod error;
pub mod roles;
pub mod tugas;
pub mod types;
pub mod wilayah;
