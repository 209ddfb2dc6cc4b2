//! Shortest paths over [`cellgrid_core::Grid`]s.
//!
//! [`PathFinder`] runs a uniform-cost search on a 4-connected grid where
//! every step costs 1 and cells that are not [`Passable`] (by default the
//! `#` wall marker) block movement. A search either stops as soon as the
//! target's cost is known or, with [`Expansion::All`], fills in the cost of
//! every reachable cell. [`PathFinder::cheapest_path`] then walks the cost
//! map back from the target.
//!
//! ```
//! use cellgrid_core::{Grid, Point};
//! use cellgrid_paths::{Expansion, PathFinder};
//!
//! let grid: Grid<char> = "..#\n#..\n...".parse().unwrap();
//! let mut pf = PathFinder::new(&grid);
//! assert_eq!(pf.find_path(Point::new(0, 0), Point::new(2, 1), Expansion::StopAtTarget), Some(3));
//! assert_eq!(pf.cheapest_path().len(), 4);
//! ```

mod finder;
mod search;
mod traits;

pub use finder::{Expansion, PathFinder, PathNode};
pub use traits::{Passable, WALL};
