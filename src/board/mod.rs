//! Board representation and the token catalog.
//!
//! Contains the grid arena, coordinates and offsets, and the six token
//! kinds with their movement / influence / tick capabilities.

pub mod coord;
pub mod grid;
pub mod token;

pub use coord::{deltas_within, Coord, Delta, ORTHOGONAL, SELF_ONLY};
pub use grid::Board;
pub use token::{Faction, InfluenceRange, MoveRange, PlacementKind, Token, TOWER_RADIUS};
