//! Quarry engine library.
//!
//! Exposes the board and token catalog, annotation engine, turn
//! controller, presentation, setup, snapshot, and self-play modules for
//! use by integration tests and the binary entry point.

pub mod annotate;
pub mod board;
pub mod game;
pub mod setup;
pub mod sim;
pub mod snapshot;
pub mod view;
