//! Draws the cube as an unfolded net:
//!
//! ```text
//!       U
//!     L F R B
//!       D
//! ```

use cube_engine::{Color, Coordinate, Cube, Face};
use itertools::Itertools;
use owo_colors::{OwoColorize, XtermColors};

/// The directions of a face's columns and rows as seen from outside the
/// cube, arranged so that neighboring faces in the net share an edge.
fn axes(face: Face) -> (Coordinate, Coordinate) {
    match face {
        Face::U => ([1, 0, 0], [0, 0, -1]),
        Face::D => ([1, 0, 0], [0, 0, 1]),
        Face::F => ([1, 0, 0], [0, -1, 0]),
        Face::B => ([-1, 0, 0], [0, -1, 0]),
        Face::R => ([0, 0, 1], [0, -1, 0]),
        Face::L => ([0, 0, -1], [0, -1, 0]),
    }
}

/// The block shown at `row`, `col` of `face`, both in `0..3`.
fn cell(face: Face, row: i8, col: i8) -> Coordinate {
    let (right, down) = axes(face);
    let normal = face.normal();
    [0, 1, 2].map(|i| normal[i] + (col - 1) * right[i] + (row - 1) * down[i])
}

fn xterm_code(color: Color) -> u8 {
    match color {
        Color::Green => 46,
        Color::Yellow => 226,
        Color::Orange => 209,
        Color::Red => 196,
        Color::White => 231,
        Color::Blue => 33,
    }
}

fn sticker(color: Option<Color>, colored: bool) -> String {
    let Some(color) = color else {
        return " ? ".to_owned();
    };
    let label = format!(" {} ", &color.name()[..1]);
    if colored {
        label
            .black()
            .on_color(XtermColors::from(xterm_code(color)))
            .to_string()
    } else {
        label
    }
}

fn face_row(cube: &Cube, face: Face, row: i8, colored: bool) -> String {
    (0..3)
        .map(|col| sticker(cube.color_at(face, cell(face, row, col)), colored))
        .join("")
}

/// Renders every face of `cube`.
pub fn render(cube: &Cube, colored: bool) -> String {
    let pad = " ".repeat(9);
    let mut lines = Vec::new();
    for row in 0..3 {
        lines.push(format!("{pad}{}", face_row(cube, Face::U, row, colored)));
    }
    for row in 0..3 {
        lines.push(
            [Face::L, Face::F, Face::R, Face::B]
                .into_iter()
                .map(|face| face_row(cube, face, row, colored))
                .join(""),
        );
    }
    for row in 0..3 {
        lines.push(format!("{pad}{}", face_row(cube, Face::D, row, colored)));
    }
    lines.join("\n")
}

/// The net of `cube` followed by whether it is solved.
pub fn describe(cube: &mut Cube, colored: bool) -> String {
    let state = if cube.is_solved() { "solved" } else { "not solved" };
    format!("{}\nCurrently {state}.", render(cube, colored))
}
