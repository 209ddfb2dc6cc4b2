//! Geometry primitives: [`Point`], [`Point3`] and [`Range`].
//!
//! A [`Point`] doubles as a grid position and as a direction vector. Y grows
//! downward so that [`Point::UP`] is `(0, -1)` and row-major storage order
//! matches the [`Ord`] implementation.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{
    Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use crate::math::positive_mod;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point. X grows right, Y grows down (screen coordinates).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0). Also the "no direction" vector.
    pub const ZERO: Self = Self { x: 0, y: 0 };
    /// One row up.
    pub const UP: Self = Self { x: 0, y: -1 };
    /// One column right.
    pub const RIGHT: Self = Self { x: 1, y: 0 };
    /// One row down.
    pub const DOWN: Self = Self { x: 0, y: 1 };
    /// One column left.
    pub const LEFT: Self = Self { x: -1, y: 0 };

    /// The four cardinal unit directions in clockwise order starting at
    /// [`UP`](Self::UP).
    pub const DIRECTIONS: [Self; 4] = [Self::UP, Self::RIGHT, Self::DOWN, Self::LEFT];

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four cardinal neighbours in [`DIRECTIONS`](Self::DIRECTIONS)
    /// order (up, right, down, left).
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        Self::DIRECTIONS.map(|d| self + d)
    }

    /// Component-wise modulo with a result in `[0, divisor)`.
    #[inline]
    pub const fn positive_mod(self, divisor: i32) -> Self {
        Self::new(positive_mod(self.x, divisor), positive_mod(self.y, divisor))
    }

    /// Element-wise positive modulo: `x` wraps by `other.x`, `y` by `other.y`.
    ///
    /// Wrapping a position onto a grid of size `s` is `p.positive_mod_elem(s)`.
    #[inline]
    pub const fn positive_mod_elem(self, other: Self) -> Self {
        Self::new(positive_mod(self.x, other.x), positive_mod(self.y, other.y))
    }

    /// Rotate by 90° clockwise (with y growing downward).
    #[inline]
    pub const fn rotate_cw(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Rotate by 90° counter-clockwise (with y growing downward).
    #[inline]
    pub const fn rotate_ccw(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Number of single cardinal steps needed to reach `other` (Manhattan
    /// distance).
    #[inline]
    pub const fn step_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Component-wise comparison, each axis clamped to `-1`, `0` or `1`.
    ///
    /// `a.compare(b)` is the unit step (possibly diagonal) that moves `b`
    /// toward `a`.
    #[inline]
    pub const fn compare(self, other: Self) -> Self {
        Self::new((self.x - other.x).signum(), (self.y - other.y).signum())
    }

    /// The glyph for a direction vector: `^`, `>`, `v`, `<`, or `0` for
    /// [`ZERO`](Self::ZERO).
    pub fn to_glyph(self) -> Result<char, DirectionError> {
        match self {
            Self::ZERO => Ok('0'),
            Self::UP => Ok('^'),
            Self::RIGHT => Ok('>'),
            Self::DOWN => Ok('v'),
            Self::LEFT => Ok('<'),
            other => Err(DirectionError::NotADirection(other)),
        }
    }

    /// Inverse of [`to_glyph`](Self::to_glyph).
    pub fn from_glyph(ch: char) -> Result<Self, DirectionError> {
        match ch {
            '0' => Ok(Self::ZERO),
            '^' => Ok(Self::UP),
            '>' => Ok(Self::RIGHT),
            'v' => Ok(Self::DOWN),
            '<' => Ok(Self::LEFT),
            other => Err(DirectionError::InvalidGlyph(other)),
        }
    }
}

// --- trait impls for Point ---

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order: `y` first, then `x`. Only meant for sorted containers
/// and deterministic tie-breaking.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl TryFrom<char> for Point {
    type Error = DirectionError;

    fn try_from(ch: char) -> Result<Self, DirectionError> {
        Self::from_glyph(ch)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Point> for i32 {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: Point) -> Point {
        rhs * self
    }
}

impl MulAssign<i32> for Point {
    #[inline]
    fn mul_assign(&mut self, rhs: i32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

/// Truncating integer division.
impl Div<i32> for Point {
    type Output = Self;
    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Truncating modulo; see [`Point::positive_mod`] for the wrapping variant.
impl Rem<i32> for Point {
    type Output = Self;
    #[inline]
    fn rem(self, rhs: i32) -> Self {
        Self::new(self.x % rhs, self.y % rhs)
    }
}

impl RemAssign<i32> for Point {
    #[inline]
    fn rem_assign(&mut self, rhs: i32) {
        self.x %= rhs;
        self.y %= rhs;
    }
}

/// Element-wise truncating modulo.
impl Rem for Point {
    type Output = Self;
    #[inline]
    fn rem(self, rhs: Self) -> Self {
        Self::new(self.x % rhs.x, self.y % rhs.y)
    }
}

impl RemAssign for Point {
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        self.x %= rhs.x;
        self.y %= rhs.y;
    }
}

// ---------------------------------------------------------------------------
// DirectionError
// ---------------------------------------------------------------------------

/// Errors from converting between direction vectors and glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionError {
    /// The character is not one of `^ > v < 0`.
    InvalidGlyph(char),
    /// The vector is not one of the four unit directions or zero.
    NotADirection(Point),
}

impl fmt::Display for DirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGlyph(ch) => write!(f, "not a valid direction glyph: {ch:?}"),
            Self::NotADirection(p) => write!(f, "not a direction vector: {p}"),
        }
    }
}

impl std::error::Error for DirectionError {}

// ---------------------------------------------------------------------------
// Point3
// ---------------------------------------------------------------------------

/// A 3D integer vector with the same arithmetic as [`Point`].
///
/// Ordered by `z`, then `y`, then `x`, matching the storage order of a
/// layered row-major volume.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise modulo with a result in `[0, divisor)`.
    #[inline]
    pub const fn positive_mod(self, divisor: i32) -> Self {
        Self::new(
            positive_mod(self.x, divisor),
            positive_mod(self.y, divisor),
            positive_mod(self.z, divisor),
        )
    }

    /// Element-wise positive modulo.
    #[inline]
    pub const fn positive_mod_elem(self, other: Self) -> Self {
        Self::new(
            positive_mod(self.x, other.x),
            positive_mod(self.y, other.y),
            positive_mod(self.z, other.z),
        )
    }

    /// Manhattan distance.
    #[inline]
    pub const fn step_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }

    /// Component-wise comparison, each axis clamped to `-1`, `0` or `1`.
    #[inline]
    pub const fn compare(self, other: Self) -> Self {
        Self::new(
            (self.x - other.x).signum(),
            (self.y - other.y).signum(),
            (self.z - other.z).signum(),
        )
    }
}

impl PartialOrd for Point3 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point3 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.z
            .cmp(&other.z)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Point3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Point3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Point3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Point3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<i32> for Point3 {
    #[inline]
    fn mul_assign(&mut self, rhs: i32) {
        *self = *self * rhs;
    }
}

impl Mul<Point3> for i32 {
    type Output = Point3;
    #[inline]
    fn mul(self, rhs: Point3) -> Point3 {
        rhs * self
    }
}

impl Neg for Point3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Div<i32> for Point3 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: i32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Rem<i32> for Point3 {
    type Output = Self;
    #[inline]
    fn rem(self, rhs: i32) -> Self {
        Self::new(self.x % rhs, self.y % rhs, self.z % rhs)
    }
}

impl RemAssign<i32> for Point3 {
    #[inline]
    fn rem_assign(&mut self, rhs: i32) {
        *self = *self % rhs;
    }
}

impl Rem for Point3 {
    type Output = Self;
    #[inline]
    fn rem(self, rhs: Self) -> Self {
        Self::new(self.x % rhs.x, self.y % rhs.y, self.z % rhs.z)
    }
}

impl RemAssign for Point3 {
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a new range from two corners and auto-canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Size as a `Point` (width = max.x - min.x, height = max.y - min.y).
    #[inline]
    pub fn size(self) -> Point {
        self.max - self.min
    }

    /// Width of the range.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height of the range.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Row-major iterator over every point in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the points in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Point,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.cur.y >= self.range.max.y || self.range.is_empty() {
            return None;
        }
        let p = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.range.max.x {
            self.cur.x = self.range.min.x;
            self.cur.y += 1;
        }
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.y >= self.range.max.y {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let remaining_in_row = (self.range.max.x - self.cur.x) as usize;
        let remaining_rows = (self.range.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}
