//! Core types, styling and description model for the placemat engine.
//!
//! This crate provides the foundational types used across the other
//! placemat crates:
//! - Geometry and color value types
//! - The theme (palette and named box styles) and its resolution
//! - The declarative placemat description (layout tree)
//! - Error types

pub mod document;
pub mod errors;
pub mod theme;
pub mod types;

pub use document::*;
pub use errors::*;
pub use theme::*;
pub use types::*;
