//! Proximity queries over the result graph.

pub mod index;

pub use index::ProximityIndex;
