//! Integer helpers shared by [`Point`](crate::Point) and [`Point3`](crate::Point3).

/// Modulo whose result lies in `[0, divisor)` for a positive `divisor`.
///
/// The `%` operator truncates toward zero, so `-1 % 5 == -1`. Wrapping a
/// coordinate around a toroidal grid needs `4` instead.
#[inline]
pub const fn positive_mod(value: i32, divisor: i32) -> i32 {
    ((value % divisor) + divisor) % divisor
}
