//! Food singleton: one long-lived pellet repositioned on capture.

use rand::Rng;

use crate::grid::{Playfield, Position};

/// How many random attempts to make before scanning for the first free cell.
const PLACEMENT_TRIES: u32 = 128;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    position: Position,
    /// When the pellet was placed; hosts on timeout difficulties use this
    /// to drive the "food disappearing" warning.
    spawn_time: f64,
}

impl Food {
    /// Place the initial pellet clear of the given occupied cells.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        field: &Playfield,
        occupied: &[Position],
        now: f64,
    ) -> Self {
        Self {
            position: pick_free_cell(rng, field, occupied),
            spawn_time: now,
        }
    }

    /// Reposition after a capture, avoiding the full snake body.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        field: &Playfield,
        occupied: &[Position],
        now: f64,
    ) {
        self.position = pick_free_cell(rng, field, occupied);
        self.spawn_time = now;
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn spawn_time(&self) -> f64 {
        self.spawn_time
    }
}

/// Random grid-aligned cell inside the playable band, never on an occupied
/// cell. Falls back to a linear scan when the random attempts all land on
/// the snake, so placement still terminates on a crowded board.
fn pick_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    field: &Playfield,
    occupied: &[Position],
) -> Position {
    for _ in 0..PLACEMENT_TRIES {
        let candidate = Position::new(
            rng.gen_range(0..field.width),
            rng.gen_range(field.band_top..field.band_bottom),
        );
        if !occupied.contains(&candidate) {
            return candidate;
        }
    }
    for y in field.band_top..field.band_bottom {
        for x in 0..field.width {
            let candidate = Position::new(x, y);
            if !occupied.contains(&candidate) {
                return candidate;
            }
        }
    }
    field.band_center()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn food_spawns_inside_band_and_off_the_snake() {
        let field = crate::config::default_playfield();
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let occupied: Vec<Position> = (0..10).map(|x| Position::new(x, field.band_top)).collect();
        for _ in 0..50 {
            let food = Food::new(&mut rng, &field, &occupied, 0.0);
            assert!(field.in_band(food.position()));
            assert!(!occupied.contains(&food.position()));
        }
    }

    #[test]
    fn crowded_board_falls_back_to_first_free_cell() {
        let field = Playfield {
            width: 4,
            height: 8,
            band_top: 2,
            band_bottom: 4,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        // Occupy everything except one cell.
        let free = Position::new(3, 3);
        let occupied: Vec<Position> = (0..field.width)
            .flat_map(|x| (field.band_top..field.band_bottom).map(move |y| Position::new(x, y)))
            .filter(|p| *p != free)
            .collect();
        let food = Food::new(&mut rng, &field, &occupied, 1.0);
        assert_eq!(food.position(), free);
    }

    #[test]
    fn respawn_moves_stamp_forward() {
        let field = crate::config::default_playfield();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut food = Food::new(&mut rng, &field, &[], 1.0);
        food.respawn(&mut rng, &field, &[], 2.5);
        assert!((food.spawn_time() - 2.5).abs() < f64::EPSILON);
    }
}
