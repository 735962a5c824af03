//! Grid coordinate value type shared by the queue, cost function and engine.

use serde::{Deserialize, Serialize};

/// A pixel position on the image grid.
///
/// Plain value type with structural equality so that coordinates can be
/// freely copied and compared; nothing in the engine relies on identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True when `other` touches `self` diagonally rather than along an axis.
    #[inline]
    pub fn is_diagonal_to(&self, other: &Point) -> bool {
        self.x != other.x && self.y != other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality() {
        assert_eq!(Point::new(3, 7), Point { x: 3, y: 7 });
        assert_ne!(Point::new(3, 7), Point::new(7, 3));
    }

    #[test]
    fn diagonal_detection() {
        let p = Point::new(2, 2);
        assert!(p.is_diagonal_to(&Point::new(3, 3)));
        assert!(p.is_diagonal_to(&Point::new(1, 3)));
        assert!(!p.is_diagonal_to(&Point::new(3, 2)));
        assert!(!p.is_diagonal_to(&Point::new(2, 1)));
    }
}
