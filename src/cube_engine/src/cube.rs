//! The 3x3x3 cube and its turns.
//!
//! A turn never moves a [`Block`]. Instead every affected block computes its
//! new stickers from the pre-turn stickers of the block that rotates into
//! its place, and all of the new stickers are committed together.

use std::fmt;

use itertools::Itertools;
use log::{debug, trace, warn};
use thiserror::Error;

use crate::{
    block::{Block, BlockType, Color, FaceColors},
    geometry::{Axis, Coordinate, Face, Orientation, Rotation, new_xy},
    notation::{Move, NotationError, Turn, invert_moves},
};

/// A 3x3x3 cube made of 27 blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    blocks: Vec<Block>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditError {
    #[error("There is no block at {0:?}")]
    NoSuchBlock(Coordinate),
    #[error("The center block can not be changed")]
    CenterBlock,
    #[error("The block at {coordinate:?} has no sticker facing {face}")]
    FaceNotOnBlock { face: Face, coordinate: Coordinate },
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

impl Cube {
    /// A solved cube.
    #[must_use]
    pub fn new() -> Cube {
        let blocks = (-1..=1)
            .cartesian_product(-1..=1)
            .cartesian_product(-1..=1)
            .map(|((x, y), z)| Block::new([x, y, z]))
            .collect();
        Cube { blocks }
    }

    fn index_of(coordinate: Coordinate) -> Option<usize> {
        if coordinate.iter().any(|component| !(-1..=1).contains(component)) {
            return None;
        }
        let [x, y, z] = coordinate.map(|component| usize::from(component.abs_diff(-1)));
        Some(x * 9 + y * 3 + z)
    }

    /// Index of a coordinate produced by the turn geometry, which never
    /// leaves the cube.
    fn turn_index(coordinate: Coordinate) -> usize {
        Self::index_of(coordinate)
            .unwrap_or_else(|| unreachable!("turn geometry produced {coordinate:?}"))
    }

    /// The block whose pre-turn colors move into another position.
    fn donor(&self, coordinate: Coordinate) -> &Block {
        &self.blocks[Self::turn_index(coordinate)]
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    #[must_use]
    pub fn get_block(&self, x: i8, y: i8, z: i8) -> Option<&Block> {
        Self::index_of([x, y, z]).map(|index| &self.blocks[index])
    }

    pub fn blocks_on_face(&self, face: Face) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(move |block| block.is_on_face(face))
    }

    pub fn blocks_on_axis(&self, axis: Axis) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(move |block| axis.contains(block.coordinate()))
    }

    /// The color shown on `face` by the block at `coordinate`.
    #[must_use]
    pub fn color_at(&self, face: Face, coordinate: Coordinate) -> Option<Color> {
        let index = Self::index_of(coordinate)?;
        self.blocks[index].color(face)
    }

    /// The middle block currently showing `color`, if any.
    #[must_use]
    pub fn middle_with(&self, color: Color) -> Option<&Block> {
        self.blocks.iter().find(|block| {
            block.block_type() == BlockType::Middle
                && block.colors().iter().any(|(_, c)| c == color)
        })
    }

    /// Restores every block to its initial colors.
    pub fn reset(&mut self) {
        for block in &mut self.blocks {
            block.reset();
        }
    }

    /// Manually recolors one sticker.
    ///
    /// # Errors
    ///
    /// If there is no block at `coordinate`, the block is the center, or it
    /// has no sticker facing `face`.
    pub fn set_block_color(
        &mut self,
        coordinate: Coordinate,
        face: Face,
        color: Color,
    ) -> Result<(), EditError> {
        let index = Self::index_of(coordinate).ok_or(EditError::NoSuchBlock(coordinate))?;
        let block = &mut self.blocks[index];
        if block.block_type() == BlockType::Center {
            return Err(EditError::CenterBlock);
        }
        if block.set_color(face, color) {
            Ok(())
        } else {
            Err(EditError::FaceNotOnBlock { face, coordinate })
        }
    }

    /// Commits new colors computed against the pre-turn state.
    fn commit(&mut self, updates: Vec<(Coordinate, FaceColors)>, move_: Move) -> Move {
        trace!("{move_}: recolored {} blocks", updates.len());
        for (coordinate, colors) in updates {
            self.blocks[Self::turn_index(coordinate)].set_colors(colors);
        }
        move_
    }

    /// Turns an outer face.
    pub fn rotate(&mut self, face: Face, rotation: Rotation) -> Move {
        let updates = self
            .blocks_on_face(face)
            .filter(|block| block.block_type() != BlockType::Middle)
            .map(|block| {
                let relative = face.relative_coordinates(block.coordinate());
                let from = face.absolute_coordinates(new_xy(relative, rotation));
                (block.coordinate(), block.new_colors(face, self.donor(from).colors()))
            })
            .collect_vec();
        self.commit(updates, Move::new(Turn::Face(face), rotation))
    }

    /// Turns a middle slice.
    pub fn rotate_axis(&mut self, axis: Axis, rotation: Rotation) -> Move {
        let updates = self
            .blocks_on_axis(axis)
            .filter(|block| block.block_type() != BlockType::Center)
            .map(|block| {
                let relative = axis.relative_coordinates(block.coordinate());
                let from = axis.absolute_coordinates(new_xy(relative, rotation));
                (block.coordinate(), block.new_colors_axis(self.donor(from).colors()))
            })
            .collect_vec();
        self.commit(updates, Move::new(Turn::Slice(axis), rotation))
    }

    /// Turns the entire cube. The layers on the far side of each turning
    /// face move the opposite way from how their own face is labeled.
    pub fn view(&mut self, orientation: Orientation, rotation: Rotation) -> Move {
        let inverse = rotation.inverse();
        match orientation {
            Orientation::X => {
                self.rotate(Face::L, inverse);
                self.rotate_axis(Axis::M, inverse);
                self.rotate(Face::R, rotation);
            }
            Orientation::Y => {
                self.rotate(Face::U, rotation);
                self.rotate_axis(Axis::E, inverse);
                self.rotate(Face::D, inverse);
            }
            Orientation::Z => {
                self.rotate(Face::F, rotation);
                self.rotate_axis(Axis::S, rotation);
                self.rotate(Face::B, inverse);
            }
        }
        Move::new(Turn::Whole(orientation), rotation)
    }

    /// Turns an outer face together with the slice next to it.
    pub fn double_turn(&mut self, face: Face, rotation: Rotation) -> Move {
        self.rotate(face, rotation);
        let slice_rotation = if face.value() > 0 {
            rotation.inverse()
        } else {
            rotation
        };
        self.rotate_axis(face.parallel_axis(), slice_rotation);
        Move::new(Turn::Wide(face), rotation)
    }

    /// Applies a parsed move.
    pub fn apply(&mut self, move_: Move) -> Move {
        match move_.turn {
            Turn::Face(face) => self.rotate(face, move_.rotation),
            Turn::Wide(face) => self.double_turn(face, move_.rotation),
            Turn::Slice(axis) => self.rotate_axis(axis, move_.rotation),
            Turn::Whole(orientation) => self.view(orientation, move_.rotation),
        }
    }

    pub fn apply_all(&mut self, moves: &[Move]) {
        for &move_ in moves {
            self.apply(move_);
        }
    }

    /// Parses and applies one notation token, leaving the cube untouched if
    /// the token is invalid.
    ///
    /// # Errors
    ///
    /// If `token` is not a valid move.
    pub fn rotate_from_input(&mut self, token: &str, reverse: bool) -> Result<Move, NotationError> {
        let move_ = Move::parse(token, reverse)?;
        Ok(self.apply(move_))
    }

    fn shows_home_color(&self, face: Face) -> bool {
        self.color_at(face, face.normal()) == Some(Color::home_of(face))
    }

    /// Turns the whole cube so that WHITE is on U and GREEN is on F,
    /// returning the rotations applied.
    pub fn reorient(&mut self) -> Vec<Move> {
        let mut moves = Vec::new();

        if !self.shows_home_color(Face::U) {
            let white_face = self
                .middle_with(Color::White)
                .and_then(|block| block.colors().faces().next());
            let step = match white_face {
                Some(Face::F) => Some((Orientation::X, Rotation::Cw)),
                Some(Face::B) => Some((Orientation::X, Rotation::Ccw)),
                Some(Face::R) => Some((Orientation::Z, Rotation::Ccw)),
                Some(Face::L) => Some((Orientation::Z, Rotation::Cw)),
                Some(Face::D | Face::U) => Some((Orientation::X, Rotation::Double)),
                None => {
                    warn!("No white middle, can not orient the cube");
                    None
                }
            };
            if let Some((orientation, rotation)) = step {
                moves.push(self.view(orientation, rotation));
            }
        }

        if !self.shows_home_color(Face::F) {
            let green_face = self
                .middle_with(Color::Green)
                .and_then(|block| block.colors().faces().next());
            let rotation = match green_face {
                Some(Face::L) => Some(Rotation::Ccw),
                Some(Face::R) => Some(Rotation::Cw),
                Some(_) => Some(Rotation::Double),
                None => {
                    warn!("No green middle, can not orient the cube");
                    None
                }
            };
            if let Some(rotation) = rotation {
                moves.push(self.view(Orientation::Y, rotation));
            }
        }

        if !moves.is_empty() {
            debug!("Reoriented with {}", moves.iter().join(" "));
        }
        moves
    }

    /// Is the cube solved in some orientation? The cube is reoriented for
    /// the check and then turned back, so its layout is unchanged.
    pub fn is_solved(&mut self) -> bool {
        let moves = self.reorient();
        let solved = self.blocks.iter().all(Block::is_solved);
        self.apply_all(&invert_moves(&moves));
        solved
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for layer in &self.blocks.iter().chunks(9) {
            for block in layer {
                write!(f, "{block}")?;
            }
            writeln!(f)?;
        }
        let solved = self.clone().is_solved();
        write!(f, "Currently {}.", if solved { "solved" } else { "not solved" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let cube = Cube::new();
        assert_eq!(cube.blocks().count(), 27);
        let count = |block_type| cube.blocks().filter(|b| b.block_type() == block_type).count();
        assert_eq!(count(BlockType::Corner), 8);
        assert_eq!(count(BlockType::Edge), 12);
        assert_eq!(count(BlockType::Middle), 6);
        assert_eq!(count(BlockType::Center), 1);
        for block in cube.blocks() {
            let [x, y, z] = block.coordinate();
            assert_eq!(cube.get_block(x, y, z), Some(block));
        }
        assert_eq!(cube.get_block(2, 0, 0), None);
    }

    #[test]
    fn test_derived_views() {
        let cube = Cube::new();
        for face in Face::ALL {
            assert_eq!(cube.blocks_on_face(face).count(), 9);
        }
        for axis in Axis::ALL {
            assert_eq!(cube.blocks_on_axis(axis).count(), 9);
        }
    }

    #[test]
    fn test_u_turn() {
        let mut cube = Cube::new();
        assert_eq!(cube.rotate(Face::U, Rotation::Cw).to_string(), "U");
        assert_eq!(cube.color_at(Face::F, [1, 1, -1]), Some(Color::Red));
        assert_eq!(cube.color_at(Face::R, [1, 1, -1]), Some(Color::Blue));
        assert_eq!(cube.color_at(Face::U, [1, 1, -1]), Some(Color::White));
        assert_eq!(cube.color_at(Face::F, [0, 1, -1]), Some(Color::Red));
        // The layer below is untouched.
        assert_eq!(cube.color_at(Face::F, [1, 0, -1]), Some(Color::Green));
    }

    #[test]
    fn test_r_turn() {
        let mut cube = Cube::new();
        cube.rotate(Face::R, Rotation::Cw);
        assert_eq!(cube.color_at(Face::F, [1, 1, -1]), Some(Color::Yellow));
        assert_eq!(cube.color_at(Face::U, [1, 1, -1]), Some(Color::Green));
        assert_eq!(cube.color_at(Face::R, [1, 1, -1]), Some(Color::Red));
        assert_eq!(cube.color_at(Face::F, [1, 0, -1]), Some(Color::Yellow));
    }

    #[test]
    fn test_m_turn() {
        let mut cube = Cube::new();
        assert_eq!(cube.rotate_axis(Axis::M, Rotation::Cw).to_string(), "M");
        assert_eq!(cube.color_at(Face::U, [0, 1, -1]), Some(Color::Blue));
        assert_eq!(cube.color_at(Face::F, [0, 1, -1]), Some(Color::White));
        assert_eq!(cube.color_at(Face::F, [0, 0, -1]), Some(Color::White));
    }

    #[test]
    fn test_turns_touch_only_their_layer() {
        let solved = Cube::new();
        for face in Face::ALL {
            let mut cube = Cube::new();
            cube.rotate(face, Rotation::Cw);
            for (block, original) in cube.blocks().zip(solved.blocks()) {
                if !block.is_on_face(face) || block.block_type() == BlockType::Middle {
                    assert_eq!(block, original, "{face}");
                }
            }
            assert!(cube.blocks_on_face(face).any(|block| !block.is_solved()));
        }
        for axis in Axis::ALL {
            let mut cube = Cube::new();
            cube.rotate_axis(axis, Rotation::Cw);
            for (block, original) in cube.blocks().zip(solved.blocks()) {
                if !axis.contains(block.coordinate()) {
                    assert_eq!(block, original, "{axis}");
                }
            }
            assert!(cube.blocks_on_axis(axis).any(|block| !block.is_solved()));
        }
    }

    #[test]
    fn test_notation_returned() {
        let mut cube = Cube::new();
        assert_eq!(cube.rotate(Face::L, Rotation::Ccw).to_string(), "L'");
        assert_eq!(cube.rotate_axis(Axis::S, Rotation::Double).to_string(), "S2");
        assert_eq!(cube.view(Orientation::Z, Rotation::Ccw).to_string(), "z'");
        assert_eq!(cube.double_turn(Face::B, Rotation::Double).to_string(), "b2");
    }

    #[test]
    fn test_set_block_color() {
        let mut cube = Cube::new();
        assert_eq!(
            cube.set_block_color([0, 0, 0], Face::U, Color::Red),
            Err(EditError::CenterBlock)
        );
        assert_eq!(
            cube.set_block_color([0, 1, 0], Face::F, Color::Red),
            Err(EditError::FaceNotOnBlock { face: Face::F, coordinate: [0, 1, 0] })
        );
        assert_eq!(
            cube.set_block_color([3, 1, 0], Face::U, Color::Red),
            Err(EditError::NoSuchBlock([3, 1, 0]))
        );
        assert!(cube.is_solved());
        cube.set_block_color([1, 1, 1], Face::U, Color::Red).unwrap();
        assert_eq!(cube.color_at(Face::U, [1, 1, 1]), Some(Color::Red));
        assert!(!cube.is_solved());
        cube.reset();
        assert!(cube.is_solved());
    }

    #[test]
    fn test_reorient_finds_white_and_green() {
        let mut cube = Cube::new();
        cube.view(Orientation::X, Rotation::Cw);
        cube.view(Orientation::Y, Rotation::Double);
        assert_ne!(cube.color_at(Face::U, [0, 1, 0]), Some(Color::White));
        let moves = cube.reorient();
        assert!(!moves.is_empty());
        assert_eq!(cube.color_at(Face::U, [0, 1, 0]), Some(Color::White));
        assert_eq!(cube.color_at(Face::F, [0, 0, -1]), Some(Color::Green));
        assert!(cube.blocks().all(Block::is_solved));
    }

    #[test]
    fn test_display_mentions_state() {
        let mut cube = Cube::new();
        assert!(cube.to_string().ends_with("Currently solved."));
        cube.rotate(Face::F, Rotation::Cw);
        let text = cube.to_string();
        assert!(text.ends_with("Currently not solved."));
        assert!(text.contains("(-1, -1, -1)\tCORNER"));
    }
}
