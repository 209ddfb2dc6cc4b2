use cellgrid_core::{Grid, Point};

/// A position with its cost from the search source, as stored in the cost map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// How far a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Expansion {
    /// Return as soon as the target is finalized.
    #[default]
    StopAtTarget,
    /// Keep going until every reachable cell has a cost.
    All,
}

// ---------------------------------------------------------------------------
// Frontier entry
// ---------------------------------------------------------------------------

/// A discovered position waiting in the frontier, ordered for `BinaryHeap`.
///
/// Lowest cost pops first; equal costs pop in row-major position order so the
/// expansion order is deterministic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Entry {
    pub(crate) cost: i32,
    pub(crate) pos: Point,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Uniform-cost shortest paths over a borrowed [`Grid`].
///
/// Every cardinal step into a [`Passable`](crate::Passable) cell costs 1.
/// The finder keeps the cost map of its last search so that
/// [`cheapest_path`](Self::cheapest_path) and [`cost`](Self::cost) can be
/// queried afterwards. The grid stays immutably borrowed for the finder's
/// whole lifetime.
#[derive(Debug)]
pub struct PathFinder<'a, T> {
    pub(crate) grid: &'a Grid<T>,
    pub(crate) source: Point,
    pub(crate) target: Point,
    /// Cost per grid offset; `None` until the cell is finalized.
    pub(crate) costs: Vec<Option<i32>>,
    pub(crate) finalized: usize,
}

impl<'a, T> PathFinder<'a, T> {
    /// Create a finder with both endpoints at the origin.
    pub fn new(grid: &'a Grid<T>) -> Self {
        Self::with_endpoints(grid, Point::ZERO, Point::ZERO)
    }

    /// Create a finder for a later [`search`](Self::search) from `source`
    /// to `target`.
    pub fn with_endpoints(grid: &'a Grid<T>, source: Point, target: Point) -> Self {
        Self {
            grid,
            source,
            target,
            costs: vec![None; grid.len()],
            finalized: 0,
        }
    }

    /// The grid being searched.
    #[inline]
    pub fn grid(&self) -> &'a Grid<T> {
        self.grid
    }

    #[inline]
    pub fn source(&self) -> Point {
        self.source
    }

    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    /// Minimal cost from the source to `p` found by the last search, or
    /// `None` if `p` was not finalized.
    #[inline]
    pub fn cost(&self, p: Point) -> Option<i32> {
        if self.grid.contains(p) {
            self.costs[self.grid.to_offset(p)]
        } else {
            None
        }
    }

    /// Every finalized cell with its cost, in row-major order.
    pub fn cost_map(&self) -> impl Iterator<Item = PathNode> + '_ {
        self.costs.iter().enumerate().filter_map(|(i, c)| {
            c.map(|cost| PathNode {
                pos: self.grid.from_offset(i),
                cost,
            })
        })
    }

    /// Number of cells finalized by the last search.
    #[inline]
    pub fn finalized(&self) -> usize {
        self.finalized
    }

    /// Record `entry` in the cost map unless an equal or cheaper cost is
    /// already known. Returns whether the entry was recorded.
    pub(crate) fn update_cost(&mut self, entry: Entry) -> bool {
        let i = self.grid.to_offset(entry.pos);
        let slot = &mut self.costs[i];
        match *slot {
            Some(known) if known <= entry.cost => false,
            Some(_) => {
                *slot = Some(entry.cost);
                true
            }
            None => {
                *slot = Some(entry.cost);
                self.finalized += 1;
                true
            }
        }
    }
}
