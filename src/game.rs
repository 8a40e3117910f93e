use std::io;
use std::{cmp::max, thread::sleep, time::{Duration, Instant}};

use crate::display::{Action, InputSource, PixelDisplay};
use crate::state::{
    GameState,
    StepResult::{self, *},
};
use crate::Rgb;

const BACKGROUND_RGB: Rgb = (50, 100, 150);

// The scheduler counts whole tenth-of-a-second ticks off a monotonic
// clock; the poll sleep only keeps the loop from spinning between them.
const TICK_UNIT_MS: u64 = 100;
const POLL_INTERVAL_MS: u64 = 5;

enum Phase {
    Running,
    GameOver,
}

pub struct SnakeGame<D: PixelDisplay, I: InputSource> {
    display: D,
    input: I,
    state: GameState,
    phase: Phase,
    next_move_tick: u64,
}

impl<D: PixelDisplay, I: InputSource> SnakeGame<D, I> {
    pub fn new(display: D, input: I) -> Self {
        SnakeGame {
            display,
            input,
            state: GameState::new(),
            phase: Phase::Running,
            next_move_tick: 0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.redraw()?;

        let started = Instant::now();
        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            let tick = started.elapsed().as_millis() as u64 / TICK_UNIT_MS;
            self.step(tick)?;
        }
    }

    // One loop iteration: the autonomous tick first, then every buffered
    // joystick event in arrival order, each with its own redraw. Factored
    // out of run() so the tick counter can be injected.
    fn step(&mut self, tick: u64) -> io::Result<()> {
        if let Phase::Running = self.phase {
            if tick >= self.next_move_tick {
                self.next_move_tick = tick + speed_interval(self.state.level());

                let direction = self.state.last_direction();
                let result = self.state.steer(direction, true);
                self.settle(result)?;
            }
        }

        for event in self.input.poll_events()? {
            match self.phase {
                Phase::GameOver => {
                    // Any fresh event reopens the game.
                    self.state.reset();
                    self.phase = Phase::Running;
                    self.next_move_tick = tick + speed_interval(self.state.level());
                    self.redraw()?;
                }
                Phase::Running => {
                    if event.action == Action::Released {
                        continue;
                    }

                    let result = self.state.steer(event.direction, false);
                    // A manual move postpones the next autonomous one, so a
                    // turn never doubles up within the same tick window.
                    self.next_move_tick = tick + speed_interval(self.state.level());
                    self.settle(result)?;

                    if let Phase::GameOver = self.phase {
                        // The rest of this batch predates the announcement
                        // and doesn't count as a restart press.
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    fn settle(&mut self, result: StepResult) -> io::Result<()> {
        match result {
            Crashed => self.game_over(),
            Alive => {
                self.state.check_food();
                self.redraw()
            }
        }
    }

    fn game_over(&mut self) -> io::Result<()> {
        self.display.show_message(&self.state.level().to_string())?;

        // Events buffered before the announcement don't count as a
        // restart press.
        self.input.poll_events()?;
        self.phase = Phase::GameOver;
        Ok(())
    }

    fn redraw(&mut self) -> io::Result<()> {
        self.display.clear(BACKGROUND_RGB)?;

        let (fx, fy) = self.state.food();
        self.display.set_pixel(fx, fy, self.state.food_rgb())?;

        let body = self.state.body();
        let body_rgb = self.state.body_rgb();
        for &(x, y) in &body[..body.len() - 1] {
            self.display.set_pixel(x, y, body_rgb)?;
        }

        let (hx, hy) = self.state.head();
        self.display.set_pixel(hx, hy, self.state.head_rgb())
    }
}

// Timer interval in tick units; the snake speeds up every five levels,
// clamped to a one-tick floor.
fn speed_interval(level: u16) -> u64 {
    match 5u64.checked_sub(level as u64 / 5) {
        Some(t) => max(t, 1),
        None => 1,
    }
}
