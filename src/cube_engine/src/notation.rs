//! Standard cube notation: `R`, `U'`, `F2`, wide turns `r`, slices `M`,
//! and whole-cube rotations `x`.

use std::{fmt, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::geometry::{Axis, Face, Orientation, Rotation};

/// Which layers a move turns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    /// A single outer face, written in upper case.
    Face(Face),
    /// An outer face together with its parallel slice, written in lower case.
    Wide(Face),
    /// A middle slice.
    Slice(Axis),
    /// The entire cube.
    Whole(Orientation),
}

/// A single move in notation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub turn: Turn,
    pub rotation: Rotation,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotationError {
    #[error("Empty move")]
    Empty,
    #[error("Move `{0}` is too long, expected at most two characters")]
    TooLong(String),
    #[error("`{0}` is not a valid move")]
    UnknownMove(String),
}

impl Move {
    #[must_use]
    pub fn new(turn: Turn, rotation: Rotation) -> Move {
        Move { turn, rotation }
    }

    /// The move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Move {
        Move {
            turn: self.turn,
            rotation: self.rotation.inverse(),
        }
    }

    /// Parses a single token. A trailing `'` means counterclockwise, a
    /// trailing `2` a half turn and no suffix clockwise; `reverse` swaps
    /// clockwise and counterclockwise.
    ///
    /// # Errors
    ///
    /// If the token is longer than two characters or does not name a move.
    pub fn parse(token: &str, reverse: bool) -> Result<Move, NotationError> {
        let chars = token.chars().collect_vec();
        let (name, rotation) = match chars.as_slice() {
            [] => return Err(NotationError::Empty),
            [name, '\''] => (*name, Rotation::Ccw),
            [name, '2'] => (*name, Rotation::Double),
            [name] => (*name, Rotation::Cw),
            [_, _] => return Err(NotationError::UnknownMove(token.to_owned())),
            _ => return Err(NotationError::TooLong(token.to_owned())),
        };
        let rotation = match rotation {
            Rotation::Double => Rotation::Double,
            quarter if reverse => quarter.inverse(),
            quarter => quarter,
        };

        let turn = if let Some(face) = Face::from_letter(name) {
            Turn::Face(face)
        } else if let Some(face) = name
            .is_ascii_lowercase()
            .then(|| Face::from_letter(name.to_ascii_uppercase()))
            .flatten()
        {
            Turn::Wide(face)
        } else if let Some(axis) = Axis::from_letter(name) {
            Turn::Slice(axis)
        } else if let Some(orientation) = Orientation::from_letter(name) {
            Turn::Whole(orientation)
        } else {
            return Err(NotationError::UnknownMove(token.to_owned()));
        };

        Ok(Move { turn, rotation })
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::parse(s, false)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Face(face) => write!(f, "{face}"),
            Turn::Wide(face) => write!(f, "{}", face.letter().to_ascii_lowercase()),
            Turn::Slice(axis) => write!(f, "{axis}"),
            Turn::Whole(orientation) => write!(f, "{orientation}"),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.turn, self.rotation.suffix())
    }
}

/// Splits pasted move text into tokens, dropping grouping brackets so that
/// `(R U R' U')` reads as four moves.
pub fn split_moves(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| !"()[]{}".contains(*c))
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
}

/// Parses a whole sequence of moves.
///
/// # Errors
///
/// On the first token that is not a valid move.
pub fn parse_moves(text: &str) -> Result<Vec<Move>, NotationError> {
    split_moves(text).map(|token| token.parse()).collect()
}

/// Space separated notation for `moves`.
#[must_use]
pub fn format_moves(moves: &[Move]) -> String {
    moves.iter().join(" ")
}

/// The sequence that undoes `moves`.
#[must_use]
pub fn invert_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().copied().map(Move::inverse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suffixes() {
        assert_eq!("R".parse::<Move>(), Ok(Move::new(Turn::Face(Face::R), Rotation::Cw)));
        assert_eq!("U'".parse::<Move>(), Ok(Move::new(Turn::Face(Face::U), Rotation::Ccw)));
        assert_eq!("F2".parse::<Move>(), Ok(Move::new(Turn::Face(Face::F), Rotation::Double)));
        assert_eq!("r".parse::<Move>(), Ok(Move::new(Turn::Wide(Face::R), Rotation::Cw)));
        assert_eq!("M'".parse::<Move>(), Ok(Move::new(Turn::Slice(Axis::M), Rotation::Ccw)));
        assert_eq!("x2".parse::<Move>(), Ok(Move::new(Turn::Whole(Orientation::X), Rotation::Double)));
    }

    #[test]
    fn test_parse_reverse() {
        assert_eq!(Move::parse("R", true), Ok(Move::new(Turn::Face(Face::R), Rotation::Ccw)));
        assert_eq!(Move::parse("R'", true), Ok(Move::new(Turn::Face(Face::R), Rotation::Cw)));
        assert_eq!(Move::parse("R2", true), Ok(Move::new(Turn::Face(Face::R), Rotation::Double)));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!("".parse::<Move>(), Err(NotationError::Empty));
        assert_eq!("Q".parse::<Move>(), Err(NotationError::UnknownMove("Q".to_owned())));
        assert_eq!("RU".parse::<Move>(), Err(NotationError::UnknownMove("RU".to_owned())));
        assert_eq!("R2'".parse::<Move>(), Err(NotationError::TooLong("R2'".to_owned())));
        // Slices and rotations are case sensitive.
        assert!("m".parse::<Move>().is_err());
        assert!("X".parse::<Move>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for token in ["R", "L'", "U2", "d'", "b2", "E", "S'", "y", "z'"] {
            assert_eq!(token.parse::<Move>().unwrap().to_string(), token);
        }
    }

    #[test]
    fn test_sequences() {
        let moves = parse_moves("(R U R' U') [F2]").unwrap();
        assert_eq!(format_moves(&moves), "R U R' U' F2");
        assert_eq!(format_moves(&invert_moves(&moves)), "F2 U R U' R'");
        assert!(parse_moves("R Q").is_err());
        assert_eq!(split_moves("  ( ) R ").collect_vec(), vec!["R".to_owned()]);
    }
}
