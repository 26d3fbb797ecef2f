// Pokemon Encounter Schema - Shared type definitions
// This crate contains the plain data shapes that the battle core and its
// data files (RON tables, JSON saves) agree on. No game logic lives here.

// Re-export the main types
pub use element::*;
pub use equipment_data::*;
pub use species_data::*;

pub mod element;
pub mod equipment_data;
pub mod species_data;
