/// The wall marker in text maps.
pub const WALL: char = '#';

/// Cell types a [`PathFinder`](crate::PathFinder) can walk over.
pub trait Passable {
    /// Whether a step may enter this cell.
    fn is_passable(&self) -> bool;
}

impl Passable for char {
    #[inline]
    fn is_passable(&self) -> bool {
        *self != WALL
    }
}

impl Passable for u8 {
    #[inline]
    fn is_passable(&self) -> bool {
        *self != WALL as u8
    }
}
