//! A 3x3x3 Rubik's cube modeled as 27 fixed blocks whose stickers move
//! between them as layers turn.

#![warn(clippy::pedantic)]

pub mod block;
pub mod cube;
pub mod geometry;
pub mod notation;
mod scramble;

pub use block::{Block, BlockType, Color, ColorParseError, FaceColors};
pub use cube::{Cube, EditError};
pub use geometry::{Axis, Coordinate, Face, Orientation, Rotation};
pub use notation::{Move, NotationError, Turn};
