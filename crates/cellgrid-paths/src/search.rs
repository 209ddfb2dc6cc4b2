use std::collections::BinaryHeap;

use cellgrid_core::Point;

use crate::finder::{Entry, Expansion, PathFinder};
use crate::traits::Passable;

impl<T: Passable> PathFinder<'_, T> {
    /// Set new endpoints and run [`search`](Self::search).
    pub fn find_path(&mut self, source: Point, target: Point, mode: Expansion) -> Option<i32> {
        self.source = source;
        self.target = target;
        self.search(mode)
    }

    /// Compute the minimal number of steps from the source to the target.
    ///
    /// Returns `None` if the target cannot be reached or the source lies
    /// outside the grid. The cost map is rebuilt from scratch on every call.
    /// With [`Expansion::All`] the search continues past the target until
    /// every reachable cell has a cost.
    pub fn search(&mut self, mode: Expansion) -> Option<i32> {
        self.costs.fill(None);
        self.finalized = 0;

        if !self.grid.contains(self.source) {
            log::debug!("search source {} outside grid", self.source);
            return None;
        }

        let mut frontier = BinaryHeap::new();
        frontier.push(Entry {
            cost: 0,
            pos: self.source,
        });
        let mut found = None;

        while let Some(entry) = frontier.pop() {
            if !self.update_cost(entry) {
                log::trace!("skip {} at cost {}", entry.pos, entry.cost);
                continue;
            }

            if entry.pos == self.target {
                found = Some(entry.cost);
                if mode == Expansion::StopAtTarget {
                    break;
                }
            }

            for next in entry.pos.neighbors_4() {
                if self.grid.get(next).is_some_and(|c| c.is_passable()) {
                    frontier.push(Entry {
                        cost: entry.cost + 1,
                        pos: next,
                    });
                }
            }
        }

        log::debug!(
            "search {} -> {} ({:?}): cost {:?}, {} cells finalized",
            self.source,
            self.target,
            mode,
            found,
            self.finalized
        );
        found
    }
}

impl<T> PathFinder<'_, T> {
    /// One minimal path from source to target, both included, after a
    /// successful search. Empty if the target was not reached.
    ///
    /// Walks back from the target, each time stepping to the first neighbour
    /// in [`Point::DIRECTIONS`] order (up, right, down, left) with a lower
    /// cost. Among several equally short paths this always picks the same
    /// one.
    pub fn cheapest_path(&self) -> Vec<Point> {
        let Some(mut cost) = self.cost(self.target) else {
            return Vec::new();
        };
        let mut pos = self.target;
        let mut path = vec![pos];
        while pos != self.source {
            let step = pos
                .neighbors_4()
                .into_iter()
                .find_map(|n| self.cost(n).filter(|&c| c < cost).map(|c| (n, c)));
            let Some((prev, prev_cost)) = step else {
                return Vec::new();
            };
            pos = prev;
            cost = prev_cost;
            path.push(pos);
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid_core::Grid;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    const MAZE: &str = "\
.....
.###.
.#...
.#.#.
.....
";

    fn maze() -> Grid<char> {
        MAZE.parse().unwrap()
    }

    /// Plain BFS distances for comparison.
    fn bfs(grid: &Grid<char>, source: Point) -> Grid<Option<i32>> {
        let mut dist = Grid::new(grid.width(), grid.height(), None);
        dist[source] = Some(0);
        let mut queue = VecDeque::from([source]);
        while let Some(p) = queue.pop_front() {
            let d = dist[p].unwrap();
            for n in p.neighbors_4() {
                if grid.get(n).is_some_and(|c| *c != '#') && dist[n].is_none() {
                    dist[n] = Some(d + 1);
                    queue.push_back(n);
                }
            }
        }
        dist
    }

    fn assert_valid_path(grid: &Grid<char>, path: &[Point], source: Point, target: Point) {
        assert_eq!(path.first(), Some(&source));
        assert_eq!(path.last(), Some(&target));
        for w in path.windows(2) {
            assert_eq!(w[0].step_distance(w[1]), 1);
        }
        assert!(path[1..].iter().all(|&p| grid[p] != '#'));
    }

    #[test]
    fn shortest_path_around_walls() {
        let grid = maze();
        let mut pf = PathFinder::new(&grid);
        let (from, to) = (Point::new(0, 0), Point::new(4, 4));
        assert_eq!(pf.find_path(from, to, Expansion::StopAtTarget), Some(8));
        let path = pf.cheapest_path();
        assert_eq!(path.len(), 9);
        assert_valid_path(&grid, &path, from, to);
    }

    #[test]
    fn reconstruction_prefers_up_right_down_left() {
        let grid = maze();
        let mut pf = PathFinder::with_endpoints(&grid, Point::new(0, 0), Point::new(4, 4));
        pf.search(Expansion::StopAtTarget);
        let expected: Vec<Point> = [
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
            (4, 1),
            (4, 2),
            (4, 3),
            (4, 4),
        ]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
        assert_eq!(pf.cheapest_path(), expected);
    }

    #[test]
    fn sealed_target_is_unreachable() {
        let mut grid = maze();
        grid[Point::new(4, 3)] = '#';
        grid[Point::new(3, 4)] = '#';
        let mut pf = PathFinder::new(&grid);
        let (from, to) = (Point::new(0, 0), Point::new(4, 4));
        assert_eq!(pf.find_path(from, to, Expansion::StopAtTarget), None);
        assert!(pf.cheapest_path().is_empty());
        assert_eq!(pf.find_path(from, to, Expansion::All), None);
        assert!(pf.cheapest_path().is_empty());
        assert_eq!(pf.cost(Point::new(2, 2)), Some(8));
    }

    #[test]
    fn wall_target_is_unreachable() {
        let grid = maze();
        let mut pf = PathFinder::new(&grid);
        assert_eq!(pf.find_path(Point::new(0, 0), Point::new(2, 1), Expansion::All), None);
    }

    #[test]
    fn source_equals_target() {
        let grid = maze();
        let mut pf = PathFinder::new(&grid);
        let p = Point::new(2, 2);
        assert_eq!(pf.find_path(p, p, Expansion::StopAtTarget), Some(0));
        assert_eq!(pf.cheapest_path(), vec![Point::new(2, 2)]);
    }

    #[test]
    fn source_outside_grid() {
        let grid = maze();
        let mut pf = PathFinder::new(&grid);
        assert_eq!(pf.find_path(Point::new(-1, 0), Point::new(4, 4), Expansion::All), None);
        assert_eq!(pf.cost_map().count(), 0);
        assert!(pf.cheapest_path().is_empty());
    }

    #[test]
    fn source_on_wall_still_expands() {
        let grid = maze();
        let mut pf = PathFinder::new(&grid);
        let (wall, above) = (Point::new(2, 1), Point::new(2, 0));
        assert_eq!(pf.find_path(wall, above, Expansion::StopAtTarget), Some(1));
    }

    #[test]
    fn expand_all_matches_bfs() {
        let grid = maze();
        let source = Point::new(0, 0);
        let mut pf = PathFinder::new(&grid);
        assert_eq!(pf.find_path(source, Point::new(4, 4), Expansion::All), Some(8));
        let expected = bfs(&grid, source);
        for p in grid.positions() {
            assert_eq!(pf.cost(p), expected[p], "cost at {p}");
        }
        assert_eq!(pf.finalized(), grid.count(&'.'));
        assert_eq!(pf.cost_map().count(), pf.finalized());
    }

    #[test]
    fn stop_at_target_finalizes_less() {
        let grid = maze();
        let mut pf = PathFinder::new(&grid);
        pf.find_path(Point::new(0, 0), Point::new(1, 0), Expansion::StopAtTarget);
        let partial = pf.finalized();
        pf.find_path(Point::new(0, 0), Point::new(1, 0), Expansion::All);
        assert!(partial < pf.finalized());
    }

    #[test]
    fn reuse_clears_previous_costs() {
        let grid = maze();
        let mut pf = PathFinder::new(&grid);
        pf.find_path(Point::new(0, 0), Point::new(4, 4), Expansion::All);
        assert_eq!(pf.cost(Point::new(4, 4)), Some(8));
        let (from, to) = (Point::new(4, 4), Point::new(4, 2));
        assert_eq!(pf.find_path(from, to, Expansion::StopAtTarget), Some(2));
        assert_eq!(pf.cost(Point::new(4, 4)), Some(0));
        assert_eq!(pf.cost(Point::new(0, 0)), None);
        assert_eq!(pf.source(), from);
        assert_eq!(pf.target(), to);
        assert_valid_path(&grid, &pf.cheapest_path(), from, to);
    }

    #[test]
    fn byte_grids_use_the_same_wall_marker() {
        let grid = Grid::from_fn(3, 3, |p| if p == Point::new(1, 1) { b'#' } else { b'.' });
        let mut pf = PathFinder::new(&grid);
        let (from, to) = (Point::new(1, 0), Point::new(1, 2));
        assert_eq!(pf.find_path(from, to, Expansion::StopAtTarget), Some(4));
    }

    #[test]
    fn concurrent_searches_share_one_grid() {
        let grid = maze();
        let costs: Vec<Option<i32>> = std::thread::scope(|s| {
            let handles: Vec<_> = [Point::new(4, 4), Point::new(2, 2), Point::new(0, 4)]
                .into_iter()
                .map(|target| {
                    let grid = &grid;
                    s.spawn(move || {
                        PathFinder::new(grid).find_path(
                            Point::new(0, 0),
                            target,
                            Expansion::StopAtTarget,
                        )
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(costs, vec![Some(8), Some(8), Some(4)]);
    }

    fn arb_case() -> impl Strategy<Value = (Grid<char>, Point, Point)> {
        (1i32..8, 1i32..8).prop_flat_map(|(w, h)| {
            (
                proptest::collection::vec(proptest::bool::weighted(0.3), (w * h) as usize),
                0..w,
                0..h,
                0..w,
                0..h,
            )
                .prop_map(move |(walls, sx, sy, tx, ty)| {
                    let grid = Grid::from_fn(w, h, |p| {
                        if walls[(p.y * w + p.x) as usize] { '#' } else { '.' }
                    });
                    (grid, Point::new(sx, sy), Point::new(tx, ty))
                })
        })
    }

    proptest! {
        #[test]
        fn search_agrees_with_bfs((grid, source, target) in arb_case()) {
            let mut grid = grid;
            grid[source] = '.';
            let expected = bfs(&grid, source);
            let mut pf = PathFinder::new(&grid);

            let cost = pf.find_path(source, target, Expansion::StopAtTarget);
            prop_assert_eq!(cost, expected[target]);
            let path = pf.cheapest_path();
            match cost {
                Some(c) => {
                    prop_assert_eq!(path.len(), c as usize + 1);
                    assert_valid_path(&grid, &path, source, target);
                }
                None => prop_assert!(path.is_empty()),
            }

            prop_assert_eq!(pf.find_path(source, target, Expansion::All), expected[target]);
            for p in grid.positions() {
                prop_assert_eq!(pf.cost(p), expected[p]);
            }
        }
    }
}
