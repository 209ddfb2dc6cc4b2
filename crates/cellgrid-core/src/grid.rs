//! The [`Grid`] type — a dense, row-major 2D container of cells.
//!
//! A `Grid<T>` owns its cells outright. Readers borrow it (`&Grid<T>`) and
//! walk it through [`Ray`]s: a lazy run of cells that starts at a position,
//! advances by a fixed direction and stops at the edge. Rows and columns are
//! just rays from the left and top edges; [`Grid::rows`] and
//! [`Grid::columns`] yield them one after another.

use std::fmt;
use std::io::{self, BufRead};
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::geom::{Point, Range, RangeIter};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size 2D grid of `T`, stored row-major (`offset = y * width + x`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid<T> {
    size: Point,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a `width` × `height` grid with every cell set to `fill`.
    /// Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let size = Point::new(width.max(0), height.max(0));
        Self {
            size,
            cells: vec![fill; (size.x as usize) * (size.y as usize)],
        }
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// The cell at `p` by value, or `None` outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Option<T> {
        self.get(p).cloned()
    }

    /// The cell at `p` by value, or `default` outside the grid.
    #[inline]
    pub fn at_or(&self, p: Point, default: T) -> T {
        self.at(p).unwrap_or(default)
    }
}

impl<T> Grid<T> {
    /// Create a grid by calling `f` for every position in row-major order.
    pub fn from_fn(width: i32, height: i32, f: impl FnMut(Point) -> T) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            size: bounds.size(),
            cells: bounds.iter().map(f).collect(),
        }
    }

    /// Assemble a grid from its size and row-major cells.
    ///
    /// Fails if a dimension is negative or `cells` does not hold exactly
    /// `width * height` values.
    pub fn from_parts(size: Point, cells: Vec<T>) -> Result<Self, GridError> {
        let bounds = Range {
            min: Point::ZERO,
            max: size,
        };
        if size.x < 0 || size.y < 0 || bounds.len() != cells.len() {
            return Err(GridError::SizeMismatch {
                size,
                cells: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Size of the grid as a `Point` (x = width, y = height).
    #[inline]
    pub fn size(&self) -> Point {
        self.size
    }

    /// Width.
    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    /// Height.
    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The grid rectangle, `[(0, 0), size)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.size.x, self.size.y)
    }

    /// Whether `p` is a valid position: `0 <= x < width && 0 <= y < height`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Flat storage offset of `p`. Only meaningful for valid positions.
    #[inline]
    pub fn to_offset(&self, p: Point) -> usize {
        (p.y as usize) * (self.size.x as usize) + (p.x as usize)
    }

    /// Position of a flat storage offset. `offset` must be below
    /// [`len`](Self::len).
    #[inline]
    pub fn from_offset(&self, offset: usize) -> Point {
        let w = self.size.x as usize;
        Point::new((offset % w) as i32, (offset / w) as i32)
    }

    /// Reference to the cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        if self.contains(p) {
            Some(&self.cells[self.to_offset(p)])
        } else {
            None
        }
    }

    /// Mutable reference to the cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        if self.contains(p) {
            let i = self.to_offset(p);
            Some(&mut self.cells[i])
        } else {
            None
        }
    }

    /// Set the cell at `p`. Returns `false` (and does nothing) outside the
    /// grid.
    pub fn set(&mut self, p: Point, value: T) -> bool {
        match self.get_mut(p) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Whether `p` is valid and holds `value`.
    #[inline]
    pub fn is_at(&self, value: &T, p: Point) -> bool
    where
        T: PartialEq,
    {
        self.get(p) == Some(value)
    }

    /// Offset of the first cell equal to `value`, scanning from `start`.
    pub fn find_offset(&self, value: &T, start: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        self.cells
            .get(start..)?
            .iter()
            .position(|c| c == value)
            .map(|i| i + start)
    }

    /// Position of the first cell equal to `value` in row-major order.
    pub fn find(&self, value: &T) -> Option<Point>
    where
        T: PartialEq,
    {
        self.find_offset(value, 0).map(|i| self.from_offset(i))
    }

    /// Count how many cells equal `value`.
    pub fn count(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.cells.iter().filter(|&c| c == value).count()
    }

    /// `(0, 0)`.
    #[inline]
    pub fn top_left(&self) -> Point {
        Point::ZERO
    }

    /// `(width - 1, 0)`.
    #[inline]
    pub fn top_right(&self) -> Point {
        Point::new(self.size.x - 1, 0)
    }

    /// `(0, height - 1)`.
    #[inline]
    pub fn bottom_left(&self) -> Point {
        Point::new(0, self.size.y - 1)
    }

    /// `(width - 1, height - 1)`.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        self.size - Point::new(1, 1)
    }

    /// The flat row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Row-major iterator over every valid position.
    #[inline]
    pub fn positions(&self) -> RangeIter {
        self.bounds().iter()
    }

    /// Row-major iterator over `(Point, &T)` pairs.
    #[inline]
    pub fn iter(&self) -> GridIter<'_, T> {
        self.positions().zip(self.cells.iter())
    }

    /// The cells from `start` stepping by `direction` until leaving the grid.
    ///
    /// Empty if `start` is outside the grid. A zero `direction` yields the
    /// start cell once.
    pub fn ray(&self, start: Point, direction: Point) -> Ray<'_, T> {
        let len = if self.contains(start) {
            let sx = steps_within(self.size.x, start.x, direction.x);
            let sy = steps_within(self.size.y, start.y, direction.y);
            match (sx, sy) {
                (Some(a), Some(b)) => a.min(b),
                (Some(n), None) | (None, Some(n)) => n,
                (None, None) => 1,
            }
        } else {
            0
        };
        Ray {
            grid: self,
            start,
            direction,
            len,
        }
    }

    /// Row `y`, left to right. Empty if `y` is out of range.
    #[inline]
    pub fn row(&self, y: i32) -> Ray<'_, T> {
        self.ray(Point::new(0, y), Point::RIGHT)
    }

    /// Column `x`, top to bottom. Empty if `x` is out of range.
    #[inline]
    pub fn column(&self, x: i32) -> Ray<'_, T> {
        self.ray(Point::new(x, 0), Point::DOWN)
    }

    /// Every row, top to bottom.
    pub fn rows(&self) -> Lines<'_, T> {
        Lines {
            grid: self,
            front: 0,
            back: self.size.y,
            line: Grid::row,
        }
    }

    /// Every column, left to right.
    pub fn columns(&self) -> Lines<'_, T> {
        Lines {
            grid: self,
            front: 0,
            back: self.size.x,
            line: Grid::column,
        }
    }
}

/// Number of steps of size `step` that keep a coordinate starting at `pos`
/// inside `[0, extent)`, counting the start. `None` for a zero step.
///
/// `pos` must already be inside `[0, extent)`.
fn steps_within(extent: i32, pos: i32, step: i32) -> Option<usize> {
    let remaining = match step.signum() {
        0 => return None,
        1 => extent - pos,
        _ => pos + 1,
    };
    Some((remaining as u32).div_ceil(step.unsigned_abs()) as usize)
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    /// Unchecked access: `p` must be a valid position. An invalid `x` with a
    /// valid offset silently aliases another cell in release builds.
    #[inline]
    fn index(&self, p: Point) -> &T {
        debug_assert!(self.contains(p), "{p} outside grid {}", self.bounds());
        &self.cells[self.to_offset(p)]
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, p: Point) -> &mut T {
        debug_assert!(self.contains(p), "{p} outside grid {}", self.bounds());
        let i = self.to_offset(p);
        &mut self.cells[i]
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = (Point, &'a T);
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> GridIter<'a, T> {
        self.iter()
    }
}

/// Deserializes through [`Grid::from_parts`] so that a size that does not
/// match the cell count is rejected.
#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Grid<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(rename = "Grid")]
        struct Raw<T> {
            size: Point,
            cells: Vec<T>,
        }

        let raw = Raw::<T>::deserialize(deserializer)?;
        Grid::from_parts(raw.size, raw.cells).map_err(serde::de::Error::custom)
    }
}

/// Iterator over `(Point, &T)` pairs in a [`Grid`].
pub type GridIter<'a, T> = std::iter::Zip<RangeIter, std::slice::Iter<'a, T>>;

/// Writes one line per row with every cell's `Display` form concatenated.
/// This is the exact text [`Grid::from_str`] reads back.
impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Text ingestion
// ---------------------------------------------------------------------------

impl<T: From<char>> Grid<T> {
    /// Build a grid from lines of text, one row per line and one cell per
    /// character.
    ///
    /// Stops at the first empty line, which is consumed but not turned into a
    /// row. Pass `lines.by_ref()` to keep reading whatever follows it.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GridBuilder::default();
        for line in lines {
            if !builder.push_line(line.as_ref())? {
                break;
            }
        }
        Ok(builder.finish())
    }

    /// Read a grid from `reader` up to the first empty line or end of input.
    ///
    /// Everything after the empty line stays unread in `reader`.
    pub fn read_from<R: BufRead + ?Sized>(reader: &mut R) -> Result<Self, GridError> {
        let mut builder = GridBuilder::default();
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 || !builder.push_line(&line)? {
                break;
            }
        }
        Ok(builder.finish())
    }
}

impl<T: From<char>> FromStr for Grid<T> {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, GridError> {
        Self::from_lines(s.lines())
    }
}

/// Accumulates rows while checking that they all have the same width.
struct GridBuilder<T> {
    cells: Vec<T>,
    width: Option<usize>,
    height: usize,
}

impl<T> Default for GridBuilder<T> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            width: None,
            height: 0,
        }
    }
}

impl<T: From<char>> GridBuilder<T> {
    /// Append one row. Returns `Ok(false)` on the terminating empty line.
    fn push_line(&mut self, line: &str) -> Result<bool, GridError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return Ok(false);
        }
        let before = self.cells.len();
        self.cells.extend(line.chars().map(T::from));
        let found = self.cells.len() - before;
        let expected = *self.width.get_or_insert(found);
        if found != expected {
            return Err(GridError::MalformedInput {
                row: self.height,
                expected,
                found,
            });
        }
        self.height += 1;
        Ok(true)
    }

    fn finish(self) -> Grid<T> {
        let width = self.width.unwrap_or(0);
        log::debug!("parsed {}x{} grid", width, self.height);
        Grid {
            size: Point::new(width as i32, self.height as i32),
            cells: self.cells,
        }
    }
}

/// Errors that can occur when building a grid from text or raw parts.
#[derive(Debug)]
pub enum GridError {
    /// A row's length differs from the first row's.
    MalformedInput {
        /// Zero-based index of the offending row.
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The size is negative or does not match the number of cells.
    SizeMismatch { size: Point, cells: usize },
    /// The line source failed.
    Io(io::Error),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput {
                row,
                expected,
                found,
            } => write!(f, "grid row {row} has {found} cells, expected {expected}"),
            Self::SizeMismatch { size, cells } => {
                write!(f, "grid of size {size} cannot hold {cells} cells")
            }
            Self::Io(e) => write!(f, "reading grid: {e}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::MalformedInput { .. } | Self::SizeMismatch { .. } => None,
        }
    }
}

impl From<io::Error> for GridError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Ray
// ---------------------------------------------------------------------------

/// A lazy run of cells from a start position, advancing by a fixed
/// direction until the next step would leave the grid.
///
/// The length is computed up front, so a `Ray` is an [`ExactSizeIterator`]
/// and can be walked from both ends.
#[derive(Debug)]
pub struct Ray<'a, T> {
    grid: &'a Grid<T>,
    start: Point,
    direction: Point,
    len: usize,
}

impl<T> Clone for Ray<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Ray<'a, T> {
    /// Position of the next cell [`next`](Iterator::next) would yield.
    /// Stays on the last cell once the ray is exhausted.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The step between consecutive cells.
    #[inline]
    pub fn direction(&self) -> Point {
        self.direction
    }

    /// Position `k` steps past [`start`](Self::start). Not bounds-checked.
    #[inline]
    pub fn point_at(&self, k: usize) -> Point {
        self.start + self.direction * k as i32
    }

    /// The cell `k` steps past the start, or `None` past the end of the ray.
    #[inline]
    pub fn get(&self, k: usize) -> Option<&'a T> {
        (k < self.len).then(|| &self.grid[self.point_at(k)])
    }

    /// Number of steps from [`start`](Self::start) to `p`, negative if `p`
    /// lies behind it. `p` must lie on the ray's line.
    pub fn steps_to(&self, p: Point) -> i32 {
        let delta = p - self.start;
        if self.direction.x != 0 {
            delta.x / self.direction.x
        } else if self.direction.y != 0 {
            delta.y / self.direction.y
        } else {
            0
        }
    }

    /// Positions of the remaining cells, front to back.
    pub fn points(&self) -> impl DoubleEndedIterator<Item = Point> + use<'a, T> {
        let (start, direction) = (self.start, self.direction);
        (0..self.len as i32).map(move |k| start + direction * k)
    }
}

impl<'a, T> Iterator for Ray<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let cell = &self.grid[self.start];
        self.len -= 1;
        // Stepping past the last cell could overflow for large directions.
        if self.len > 0 {
            self.start += self.direction;
        }
        Some(cell)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.len {
            self.len = 0;
            return None;
        }
        self.start = self.point_at(n);
        self.len -= n;
        self.next()
    }
}

impl<T> DoubleEndedIterator for Ray<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(&self.grid[self.point_at(self.len)])
    }
}

impl<T> ExactSizeIterator for Ray<'_, T> {}

impl<T> FusedIterator for Ray<'_, T> {}

// ---------------------------------------------------------------------------
// Lines
// ---------------------------------------------------------------------------

/// A lazy sequence of [`Ray`]s produced from consecutive indices, such as
/// every row or every column of a grid.
#[derive(Debug)]
pub struct Lines<'a, T> {
    grid: &'a Grid<T>,
    front: i32,
    back: i32,
    line: fn(&'a Grid<T>, i32) -> Ray<'a, T>,
}

impl<'a, T> Iterator for Lines<'a, T> {
    type Item = Ray<'a, T>;

    fn next(&mut self) -> Option<Ray<'a, T>> {
        if self.front >= self.back {
            return None;
        }
        let ray = (self.line)(self.grid, self.front);
        self.front += 1;
        Some(ray)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.back - self.front).max(0) as usize;
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for Lines<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some((self.line)(self.grid, self.back))
    }
}

impl<T> ExactSizeIterator for Lines<'_, T> {}
