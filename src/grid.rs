use crate::Coords;

pub const GRID_SIZE: u8 = 8;

/// Wraps a coordinate onto the 8x8 torus. Total over any i16 input, so
/// callers can add signed unit deltas without bounds checks.
pub fn wrap(coordinate: i16) -> u8 {
    coordinate.rem_euclid(GRID_SIZE as i16) as u8
}

pub fn occupied(position: Coords, body: &[Coords]) -> bool {
    body.contains(&position)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// True iff `other` is the 180-degree turn along the same axis.
    /// Perpendicular turns are never reversals.
    pub fn is_reverse_of(self, other: Direction) -> bool {
        use Direction::*;
        matches!(
            (self, other),
            (Up, Down) | (Down, Up) | (Left, Right) | (Right, Left)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Direction::*;

    #[test]
    fn wrap_stays_on_the_grid() {
        for c in -16..24i16 {
            let w = wrap(c);
            assert!(w < GRID_SIZE, "wrap({}) = {} escapes the grid", c, w);
        }
    }

    #[test]
    fn wrap_is_idempotent() {
        for c in -16..24i16 {
            let once = wrap(c);
            assert_eq!(wrap(once as i16), once);
        }
    }

    #[test]
    fn wrap_reenters_from_the_opposite_side() {
        assert_eq!(wrap(-1), 7);
        assert_eq!(wrap(8), 0);
        assert_eq!(wrap(3), 3);
    }

    #[test]
    fn occupied_scans_the_whole_body() {
        let body = [(4, 4), (4, 3), (4, 2)];
        assert!(occupied((4, 4), &body));
        assert!(occupied((4, 2), &body));
        assert!(!occupied((5, 4), &body));
        assert!(!occupied((4, 1), &[]));
    }

    #[test]
    fn deltas_are_unit_steps() {
        assert_eq!(Up.delta(), (0, -1));
        assert_eq!(Down.delta(), (0, 1));
        assert_eq!(Left.delta(), (-1, 0));
        assert_eq!(Right.delta(), (1, 0));
    }

    #[test]
    fn reversals_are_per_axis() {
        assert!(Up.is_reverse_of(Down));
        assert!(Down.is_reverse_of(Up));
        assert!(Left.is_reverse_of(Right));
        assert!(Right.is_reverse_of(Left));

        assert!(!Up.is_reverse_of(Up));
        assert!(!Up.is_reverse_of(Left));
        assert!(!Right.is_reverse_of(Down));
    }
}
