//! Layout computation for placemat slides.
//!
//! # Architecture
//!
//! 1. **Grid layout**: tiles an ordered list of labels into a rectangle
//! 2. **Track splitting**: divides a region into fixed and weighted tracks
//! 3. **Layout tree**: interprets a placemat description into placed boxes
//!
//! # Example
//!
//! ```
//! use placemat_core::Rect;
//! use placemat_layout::grid;
//!
//! let cells = grid::layout(Rect::new(0.0, 0.0, 10.0, 4.0), &["A", "B", "C", "D"], 2, 0.0, 100.0)?;
//! assert_eq!(cells.len(), 4);
//! assert_eq!(cells[3].rect, Rect::new(5.0, 2.0, 5.0, 2.0));
//! # Ok::<(), placemat_core::LayoutError>(())
//! ```

pub mod grid;
pub mod tracks;
mod tree;

pub use grid::{GridLayout, GridMetrics, Placement};
pub use tree::{compute_layout, compute_layout_with_options, BoxKind, Layout, LayoutOptions, PlacedBox};
