//! **cellgrid-core** — dense 2D cell grids and the geometry around them.
//!
//! This crate provides the foundational types used by the *cellgrid*
//! crates: integer points that double as direction vectors, half-open
//! rectangles, and a generic row-major [`Grid`] that can be parsed from text,
//! printed back, and walked along rays, rows and columns.

pub mod geom;
pub mod grid;
pub mod math;

pub use geom::{DirectionError, Point, Point3, Range, RangeIter};
pub use grid::{Grid, GridError, GridIter, Lines, Ray};
pub use math::positive_mod;
