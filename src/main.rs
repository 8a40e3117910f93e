mod display;
mod game;
mod grid;
mod state;
mod term;

pub type Coords = (u8, u8);
pub type Rgb = (u8, u8, u8);

fn main() -> std::io::Result<()> {
    let mut matrix = term::TermMatrix::new()?;
    matrix.setup()?;

    let mut game = game::SnakeGame::new(matrix, term::TermStick);
    let res = game.run();

    // run() only ever returns on an I/O error; put the terminal back
    // together before surfacing it.
    term::restore_terminal().ok();
    res
}
