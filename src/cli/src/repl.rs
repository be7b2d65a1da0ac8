//! The interactive command loop.

use std::io::{self, BufRead, Write};

use cube_engine::{
    Axis, Color, Cube, Face, NotationError, Orientation,
    block::BlockType,
    notation::{format_moves, split_moves},
};
use log::debug;

use crate::{config::CliConfig, net};

const QUIT_STRINGS: &[&str] = &["quit", "q", "end", "stop", "exit", "quit!"];
const HELP_STRINGS: &[&str] = &["help", "h", "info", "information", "i"];
const SCRAMBLE_STRINGS: &[&str] = &["random", "randomize", "shuffle"];
const DISPLAY_STRINGS: &[&str] = &["print", "p"];
const MOVE_STRINGS: &[&str] = &["move", "moves"];
const CHANGE_STRINGS: &[&str] = &["change", "c", "manual", "set"];
const REVERSE_STRINGS: &[&str] = &["reverse", "rev"];
const RESET_STRINGS: &[&str] = &["reset"];
const CLEAR_STRINGS: &[&str] = &["clear"];

const HELP: &str = "\
Available commands:
F, R, U, L, D, B - Perform clockwise moves on the faces
F', R', U', L', D', B' - Perform counterclockwise moves on the faces
F2, R2, U2, L2, D2, B2 - Perform double moves on the faces
M, M', M2, E, E', E2, S, S', S2 - Perform slice turns
x, x', x2, y, y', y2, z, z', z2 - Reorient the cube
f, r, u, l, d, b - Perform double layer turns
random - Scramble the cube. Specify >50 moves to randomize the cube sufficiently.
print - Display the current cube state
move - Apply a series of moves to the cube
reverse - Reverse a series of moves
change - Change the colors of a specific block
reset - Reset the cube to the initial state
clear - Clear the console
quit - Close the program";

/// Applies each token of `line` to `cube` in order. With `reverse` the
/// tokens are applied last to first with each turn inverted, undoing the
/// sequence. Invalid tokens are skipped and returned.
pub fn apply_sequence(cube: &mut Cube, line: &str, reverse: bool) -> Vec<NotationError> {
    let mut tokens = split_moves(line).collect::<Vec<_>>();
    if reverse {
        tokens.reverse();
    }
    tokens
        .iter()
        .filter_map(|token| cube.rotate_from_input(token, reverse).err())
        .collect()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    Help,
    Scramble,
    Print,
    Moves,
    Change,
    Reverse,
    Reset,
    Clear,
    Single,
    Unknown,
}

impl Command {
    fn from_input(input: &str) -> Command {
        let lower = input.to_lowercase();
        let table = [
            (QUIT_STRINGS, Command::Quit),
            (HELP_STRINGS, Command::Help),
            (SCRAMBLE_STRINGS, Command::Scramble),
            (DISPLAY_STRINGS, Command::Print),
            (MOVE_STRINGS, Command::Moves),
            (CHANGE_STRINGS, Command::Change),
            (REVERSE_STRINGS, Command::Reverse),
            (RESET_STRINGS, Command::Reset),
            (CLEAR_STRINGS, Command::Clear),
        ];
        if let Some(&(_, command)) = table.iter().find(|(names, _)| names.contains(&lower.as_str())) {
            return command;
        }

        let Some(first) = input.chars().next() else {
            return Command::Unknown;
        };
        let is_move = Face::from_letter(first.to_ascii_uppercase()).is_some()
            || Axis::from_letter(first).is_some()
            || Orientation::from_letter(first).is_some();
        if is_move {
            Command::Single
        } else {
            Command::Unknown
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Reads commands from `input` and applies them to a cube, writing
/// responses to `output`.
pub struct Repl<R, W> {
    input: R,
    output: W,
    cube: Cube,
    config: CliConfig,
    rng: fastrand::Rng,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W, config: CliConfig, rng: fastrand::Rng) -> Self {
        Repl {
            input,
            output,
            cube: Cube::new(),
            config,
            rng,
        }
    }

    /// Runs until the user quits or the input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "New Rubik's Cube created. Type 'print' to view!")?;
        loop {
            let Some(line) = self.prompt("Enter a command (or 'quit' to exit): ")? else {
                return Ok(());
            };
            if let Flow::Quit = self.handle(&line)? {
                return Ok(());
            }
        }
    }

    /// Writes `message` and reads one trimmed line, or `None` at the end
    /// of the input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn handle(&mut self, line: &str) -> io::Result<Flow> {
        let command = Command::from_input(line);
        debug!("{line:?} -> {command:?}");
        match command {
            Command::Quit => {
                if line == "quit!" {
                    return Ok(Flow::Quit);
                }
                let answer = self.prompt("Are you sure? Type 'yes' to confirm: ")?;
                if answer.is_none_or(|answer| answer.eq_ignore_ascii_case("yes")) {
                    return Ok(Flow::Quit);
                }
            }
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Scramble => self.scramble()?,
            Command::Print => self.print()?,
            Command::Moves => self.apply_moves(false)?,
            Command::Reverse => self.apply_moves(true)?,
            Command::Change => self.change()?,
            Command::Reset => self.cube.reset(),
            Command::Clear => write!(self.output, "\x1b[2J\x1b[H")?,
            Command::Single => {
                if self.cube.rotate_from_input(line, false).is_err() {
                    writeln!(self.output, "Invalid move.")?;
                }
            }
            Command::Unknown => writeln!(
                self.output,
                "Invalid command. Type 'help' for available commands."
            )?,
        }
        Ok(Flow::Continue)
    }

    fn scramble(&mut self) -> io::Result<()> {
        let Some(answer) = self.prompt("Number of moves: ")? else {
            return Ok(());
        };
        let count = if answer.is_empty() {
            self.config.scramble_length
        } else if let Ok(count) = answer.parse() {
            count
        } else {
            return writeln!(self.output, "Invalid number.");
        };
        let moves = self.cube.randomize(count, &mut self.rng);
        writeln!(
            self.output,
            "{count} random moves have been applied:\n{}",
            format_moves(&moves)
        )
    }

    fn print(&mut self) -> io::Result<()> {
        let text = net::describe(&mut self.cube, self.config.colored);
        writeln!(self.output, "{text}")
    }

    fn apply_moves(&mut self, reverse: bool) -> io::Result<()> {
        let Some(line) = self.prompt("Enter one or more moves, separated by spaces: ")? else {
            return Ok(());
        };
        for _ in apply_sequence(&mut self.cube, &line, reverse) {
            writeln!(self.output, "Invalid move.")?;
        }
        Ok(())
    }

    fn read_component(&mut self, message: &str) -> io::Result<Option<i8>> {
        Ok(self.prompt(message)?.and_then(|answer| answer.parse().ok()))
    }

    fn change(&mut self) -> io::Result<()> {
        writeln!(self.output, "Enter the coordinates of the block you would like to change")?;
        let mut coordinate = [0; 3];
        for (component, name) in coordinate.iter_mut().zip(["x", "y", "z"]) {
            let Some(value) = self.read_component(&format!("{name}: "))? else {
                return writeln!(self.output, "Invalid coordinate.");
            };
            *component = value;
        }

        let [x, y, z] = coordinate;
        let Some(block) = self.cube.get_block(x, y, z) else {
            return writeln!(self.output, "There is no block at ({x}, {y}, {z}).");
        };
        if block.block_type() == BlockType::Center {
            return writeln!(self.output, "Sorry, that block can not be changed");
        }

        let faces = block.colors().faces().collect::<Vec<_>>();
        for face in faces {
            let message = format!("Set the color facing the {face} direction: ");
            let color = loop {
                let Some(answer) = self.prompt(&message)? else {
                    return Ok(());
                };
                match answer.parse::<Color>() {
                    Ok(color) => break color,
                    Err(_) => writeln!(
                        self.output,
                        "Invalid color! Please select one: GREEN, YELLOW, ORANGE, RED, WHITE, BLUE..."
                    )?,
                }
            };
            if let Err(e) = self.cube.set_block_color(coordinate, face, color) {
                writeln!(self.output, "{e}")?;
            }
        }
        Ok(())
    }
}
