//! Grid geometry: cell positions, directions, and the playfield rectangle.

use serde::{Deserialize, Serialize};

/// A single grid cell. One unit equals one cell; hosts multiply by their
/// own cell size when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: the larger of the two axis deltas.
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dx > dy { dx } else { dy }
    }
}

/// Axis-aligned movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Unit-vector cell delta for one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// A steer is rejected when it would reverse straight into the body.
    #[must_use]
    pub const fn is_reversal_of(self, current: Self) -> bool {
        matches!(
            (self, current),
            (Self::Up, Self::Down)
                | (Self::Down, Self::Up)
                | (Self::Left, Self::Right)
                | (Self::Right, Self::Left)
        )
    }
}

/// The movement rectangle plus the playable band reserved for spawning.
///
/// Movement and wrap-around use the full `width` x `height` grid; spawn
/// searches and food placement are confined to the horizontal band between
/// `band_top` (inclusive) and `band_bottom` (exclusive), which keeps
/// entities clear of the host's score/status chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
    pub band_top: i32,
    pub band_bottom: i32,
}

impl Playfield {
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Wrap a position modulo the full grid. Output is always in bounds.
    #[must_use]
    pub const fn wrap(&self, pos: Position) -> Position {
        Position {
            x: pos.x.rem_euclid(self.width),
            y: pos.y.rem_euclid(self.height),
        }
    }

    /// Center of the playable band, used as the deterministic spawn fallback.
    #[must_use]
    pub const fn band_center(&self) -> Position {
        Position {
            x: self.width / 2,
            y: (self.band_top + self.band_bottom) / 2,
        }
    }

    #[must_use]
    pub const fn in_band(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= self.band_top && pos.y < self.band_bottom
    }
}

impl Default for Playfield {
    fn default() -> Self {
        crate::config::default_playfield()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_stays_in_bounds() {
        let field = Playfield {
            width: 30,
            height: 40,
            band_top: 8,
            band_bottom: 32,
        };
        for (x, y) in [(-1, 0), (30, 39), (0, -1), (29, 40), (-30, -40)] {
            let wrapped = field.wrap(Position::new(x, y));
            assert!(field.contains(wrapped), "({x},{y}) wrapped to {wrapped:?}");
        }
        assert_eq!(field.wrap(Position::new(-1, 5)), Position::new(29, 5));
        assert_eq!(field.wrap(Position::new(30, 5)), Position::new(0, 5));
    }

    #[test]
    fn reversal_detection_is_symmetric() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert!(dir.is_reversal_of(dir.opposite()));
            assert!(dir.opposite().is_reversal_of(dir));
            assert!(!dir.is_reversal_of(dir));
        }
    }

    #[test]
    fn chebyshev_distance_takes_larger_axis() {
        let a = Position::new(2, 3);
        assert_eq!(a.chebyshev_distance(Position::new(7, 4)), 5);
        assert_eq!(a.chebyshev_distance(Position::new(3, -4)), 7);
        assert_eq!(a.chebyshev_distance(a), 0);
    }
}
