use std::io::{self, stdout, Stdout, Write};
use std::process::exit;
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style};

use crate::display::{Action, InputEvent, InputSource, PixelDisplay};
use crate::grid::{Direction, GRID_SIZE};
use crate::Rgb;

// Cells are two columns wide so they come out roughly square in a
// terminal font.
const CELL_WIDTH: u16 = 2;

const BOX_WIDTH: u16 = GRID_SIZE as u16 * CELL_WIDTH + 2;
const BOX_HEIGHT: u16 = GRID_SIZE as u16 + 2;

/// Terminal stand-in for the 8x8 RGB matrix: a bordered grid of colored
/// cells centered on the screen, with a message row underneath.
pub struct TermMatrix {
    stdout: Stdout,
    origin: (u16, u16), // top-left corner of the border box
}

impl TermMatrix {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let origin = (
            width.saturating_sub(BOX_WIDTH) / 2,
            height.saturating_sub(BOX_HEIGHT) / 2,
        );

        Ok(TermMatrix {
            stdout: stdout(),
            origin,
        })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        self.draw_border()
    }

    fn draw_border(&mut self) -> io::Result<()> {
        let (ox, oy) = self.origin;

        for x in 0..BOX_WIDTH {
            let ch = if x == 0 || x == BOX_WIDTH - 1 { '+' } else { '-' };
            queue!(self.stdout, cursor::MoveTo(ox + x, oy), style::Print(ch))?;
            queue!(
                self.stdout,
                cursor::MoveTo(ox + x, oy + BOX_HEIGHT - 1),
                style::Print(ch)
            )?;
        }

        for y in 1..BOX_HEIGHT - 1 {
            queue!(self.stdout, cursor::MoveTo(ox, oy + y), style::Print('|'))?;
            queue!(
                self.stdout,
                cursor::MoveTo(ox + BOX_WIDTH - 1, oy + y),
                style::Print('|')
            )?;
        }

        self.stdout.flush()
    }

    fn queue_cell(&mut self, x: u8, y: u8, rgb: Rgb) -> io::Result<()> {
        let (ox, oy) = self.origin;
        let col = ox + 1 + x as u16 * CELL_WIDTH;
        let row = oy + 1 + y as u16;

        queue!(
            self.stdout,
            cursor::MoveTo(col, row),
            style::SetBackgroundColor(color(rgb)),
            style::Print("  "),
            style::ResetColor
        )
    }

    fn queue_message_row(&mut self, text: &str) -> io::Result<()> {
        let (ox, oy) = self.origin;
        let line = format!("{: ^width$}", text, width = BOX_WIDTH as usize);

        queue!(
            self.stdout,
            cursor::MoveTo(ox, oy + BOX_HEIGHT),
            style::Print(line)
        )
    }
}

impl PixelDisplay for TermMatrix {
    fn clear(&mut self, rgb: Rgb) -> io::Result<()> {
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                self.queue_cell(x, y, rgb)?;
            }
        }

        // A fresh frame also drops any leftover announcement.
        self.queue_message_row("")?;
        self.stdout.flush()
    }

    fn set_pixel(&mut self, x: u8, y: u8, rgb: Rgb) -> io::Result<()> {
        self.queue_cell(x, y, rgb)?;
        self.stdout.flush()
    }

    fn show_message(&mut self, text: &str) -> io::Result<()> {
        self.queue_message_row(text)?;
        self.stdout.flush()
    }
}

/// Keyboard stand-in for the joystick: arrow keys or WASD.
pub struct TermStick;

impl InputSource for TermStick {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                if is_ctrl_c(&ev) || ev.code == KeyCode::Char('q') {
                    restore_terminal()?;
                    exit(0);
                }

                if let Some(direction) = direction_of(&ev) {
                    events.push(InputEvent {
                        direction,
                        action: action_of(&ev),
                    });
                }
            }
        }

        Ok(events)
    }
}

pub fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(stdout(), cursor::Show, LeaveAlternateScreen)
}

fn color(rgb: Rgb) -> style::Color {
    style::Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

fn direction_of(ev: &KeyEvent) -> Option<Direction> {
    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

// Most terminals only deliver the press edge; release events show up
// where the keyboard enhancement protocol is active.
fn action_of(ev: &KeyEvent) -> Action {
    match ev.kind {
        KeyEventKind::Release => Action::Released,
        KeyEventKind::Press | KeyEventKind::Repeat => Action::Pressed,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
