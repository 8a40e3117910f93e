use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::grid::{self, Direction, GRID_SIZE};
use crate::{Coords, Rgb};

// Starting-state template. A fresh game is always re-seeded from these,
// never patched up incrementally.
pub const INITIAL_HEAD: Coords = (4, 4);
pub const INITIAL_FOOD: Coords = (2, 7);
pub const INITIAL_DIRECTION: Direction = Direction::Up;

const BODY_RGB: Rgb = (255, 255, 0);
const HEAD_RGB: Rgb = (255, 0, 0);
const FOOD_RGB: Rgb = (0, 255, 50);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepResult {
    Alive,
    Crashed,
}

/// The whole game in one owned aggregate: body, food, score and colors.
/// `level` doubles as both the score and the snake's body length.
pub struct GameState {
    snake: Vec<Coords>, // index 0 = tail, last index = head
    food: Coords,
    food_rgb: Rgb,
    body_rgb: Rgb,
    head_rgb: Rgb,
    level: u16,
    last_direction: Direction,
    rng: StdRng,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        GameState {
            snake: vec![INITIAL_HEAD],
            food: INITIAL_FOOD,
            food_rgb: FOOD_RGB,
            body_rgb: BODY_RGB,
            head_rgb: HEAD_RGB,
            level: 1,
            last_direction: INITIAL_DIRECTION,
            rng,
        }
    }

    pub fn body(&self) -> &[Coords] {
        &self.snake
    }

    pub fn head(&self) -> Coords {
        *self.snake.last().unwrap()
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn food_rgb(&self) -> Rgb {
        self.food_rgb
    }

    pub fn body_rgb(&self) -> Rgb {
        self.body_rgb
    }

    pub fn head_rgb(&self) -> Rgb {
        self.head_rgb
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Applies a direction request. The autonomous timer step always goes
    /// through with the stored direction; a joystick request is dropped as a
    /// complete no-op when it would reverse straight into the neck.
    /// A `Crashed` result is only reported, never acted on here; restarting
    /// is the caller's call.
    pub fn steer(&mut self, direction: Direction, autonomous: bool) -> StepResult {
        if !autonomous && direction.is_reverse_of(self.last_direction) {
            return StepResult::Alive;
        }

        self.last_direction = direction;
        self.advance(direction)
    }

    /// Moves the head one cell, wrapping at the edges. Collision is judged
    /// against the pre-move body (current head and tail included); the new
    /// head is appended either way, and the tail trimmed only afterwards.
    fn advance(&mut self, direction: Direction) -> StepResult {
        let (hx, hy) = self.head();
        let (dx, dy) = direction.delta();
        let new_head = (grid::wrap(hx as i16 + dx), grid::wrap(hy as i16 + dy));

        let collided = grid::occupied(new_head, &self.snake);
        self.push_head(new_head);

        if collided {
            StepResult::Crashed
        } else {
            StepResult::Alive
        }
    }

    /// One primitive for both movement and growth: append the new head,
    /// drop the oldest tail segment only once the body outgrows `level`.
    fn push_head(&mut self, position: Coords) {
        self.snake.push(position);

        if self.snake.len() > self.level as usize {
            self.snake.remove(0);
        }
    }

    /// Eats the food under the head, if any: one more level, one more
    /// segment (the head is duplicated, so the next trim cancels out), and
    /// a fresh food cell somewhere off the body.
    pub fn check_food(&mut self) {
        if self.head() != self.food {
            return;
        }

        self.level += 1;
        let head = self.head();
        self.push_head(head);
        self.place_food();
    }

    fn place_food(&mut self) {
        // Rejection sampling. The board never actually fills up, so this
        // terminates quickly in practice.
        loop {
            let candidate = (
                self.rng.gen_range(0..GRID_SIZE),
                self.rng.gen_range(0..GRID_SIZE),
            );

            if !grid::occupied(candidate, &self.snake) {
                self.food = candidate;
                return;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = GameState::new();
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, body: Vec<Coords>, direction: Direction) {
        self.level = body.len() as u16;
        self.snake = body;
        self.last_direction = direction;
    }
}
