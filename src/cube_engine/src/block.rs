//! Blocks: the 27 fixed cells of the cube and the stickers they show.

use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use itertools::Itertools;
use thiserror::Error;

use crate::geometry::{Coordinate, Face, corner_sides};

/// What kind of cell a block is, determined by how many coordinate
/// components are zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// No zero components; three stickers.
    Corner = 0,
    /// One zero component; two stickers.
    Edge = 1,
    /// The center of a face; one sticker.
    Middle = 2,
    /// The core of the cube; no stickers.
    Center = 3,
}

impl BlockType {
    #[must_use]
    pub fn of(coordinate: Coordinate) -> BlockType {
        match coordinate.iter().filter(|&&component| component == 0).count() {
            0 => BlockType::Corner,
            1 => BlockType::Edge,
            2 => BlockType::Middle,
            _ => BlockType::Center,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockType::Corner => "CORNER",
            BlockType::Edge => "EDGE",
            BlockType::Middle => "MIDDLE",
            BlockType::Center => "CENTER",
        })
    }
}

/// A sticker color. In the solved state each color shows on the face with
/// the same encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Color {
    Green = -3,
    Yellow = -2,
    Orange = -1,
    Red = 1,
    White = 2,
    Blue = 3,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid color `{0}`, expected one of GREEN, YELLOW, ORANGE, RED, WHITE, BLUE or an initial")]
pub struct ColorParseError(pub String);

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Red,
        Color::White,
        Color::Blue,
    ];

    #[must_use]
    pub fn value(self) -> i8 {
        self as i8
    }

    /// The color that starts out on `face`.
    #[must_use]
    pub fn home_of(face: Face) -> Color {
        match face {
            Face::F => Color::Green,
            Face::D => Color::Yellow,
            Face::L => Color::Orange,
            Face::R => Color::Red,
            Face::U => Color::White,
            Face::B => Color::Blue,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Orange => "ORANGE",
            Color::Red => "RED",
            Color::White => "WHITE",
            Color::Blue => "BLUE",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts a full color name or its initial, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Color::ALL
            .into_iter()
            .find(|color| {
                let name = color.name();
                upper == name || upper == name[..1]
            })
            .ok_or_else(|| ColorParseError(s.to_owned()))
    }
}

/// The stickers of one block: which color faces which direction.
///
/// The set of faces is decided when the block is created and never
/// changes; turns only move colors between the slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceColors(ArrayVec<(Face, Color), 3>);

impl FaceColors {
    /// The solved stickers of the block at `coordinate`.
    #[must_use]
    pub fn initial(coordinate: Coordinate) -> FaceColors {
        FaceColors(
            Face::ALL
                .into_iter()
                .filter(|face| face.contains(coordinate))
                .sorted_by_key(|face| face.axis_index())
                .map(|face| (face, Color::home_of(face)))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, face: Face) -> Option<Color> {
        self.0
            .iter()
            .find_map(|&(f, color)| (f == face).then_some(color))
    }

    /// Replaces the color facing `face`, returning whether the block has a
    /// sticker there.
    pub fn set(&mut self, face: Face, color: Color) -> bool {
        match self.0.iter_mut().find(|(f, _)| *f == face) {
            Some((_, slot)) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.0.iter().map(|&(face, _)| face)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Face, Color)> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, face: Face) -> bool {
        self.faces().any(|f| f == face)
    }

    /// Builds a mapping over the same faces as `self`, filling each slot
    /// from `color_for`.
    fn remap(&self, mut color_for: impl FnMut(Face, Color) -> Color) -> FaceColors {
        FaceColors(
            self.0
                .iter()
                .map(|&(face, color)| (face, color_for(face, color)))
                .collect(),
        )
    }

    fn corner_faces(&self) -> [Face; 3] {
        match self.0.as_slice() {
            &[(a, _), (b, _), (c, _)] => [a, b, c],
            other => unreachable!("a corner has three stickers, found {other:?}"),
        }
    }

    fn color_or_panic(&self, face: Face) -> Color {
        self.get(face)
            .unwrap_or_else(|| unreachable!("donor block has no sticker on {face}"))
    }
}

impl fmt::Display for FaceColors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter().map(|(face, color)| format!("{face}: {color}")).join(", ")
        )
    }
}

/// One cell of the cube. Blocks never move; turning the cube moves colors
/// from block to block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    coordinate: Coordinate,
    block_type: BlockType,
    initial_colors: FaceColors,
    colors: FaceColors,
}

impl Block {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Block {
        let initial_colors = FaceColors::initial(coordinate);
        Block {
            coordinate,
            block_type: BlockType::of(coordinate),
            colors: initial_colors.clone(),
            initial_colors,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[must_use]
    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    #[must_use]
    pub fn colors(&self) -> &FaceColors {
        &self.colors
    }

    #[must_use]
    pub fn initial_colors(&self) -> &FaceColors {
        &self.initial_colors
    }

    /// The color facing `face`, if this block has a sticker there.
    #[must_use]
    pub fn color(&self, face: Face) -> Option<Color> {
        self.colors.get(face)
    }

    pub fn set_color(&mut self, face: Face, color: Color) -> bool {
        self.colors.set(face, color)
    }

    /// Commits a mapping computed by one of the `new_colors` functions.
    pub(crate) fn set_colors(&mut self, colors: FaceColors) {
        debug_assert!(colors.faces().eq(self.colors.faces()));
        self.colors = colors;
    }

    pub(crate) fn reset(&mut self) {
        self.colors.clone_from(&self.initial_colors);
    }

    #[must_use]
    pub fn is_on_face(&self, face: Face) -> bool {
        face.contains(self.coordinate)
    }

    /// Does every sticker show the color that belongs on its face?
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.colors
            .iter()
            .all(|(face, color)| face.value() == color.value())
    }

    /// The colors of this block after `face` turns, given the pre-turn
    /// colors of the block that turns into this position.
    #[must_use]
    pub fn new_colors(&self, face: Face, donor: &FaceColors) -> FaceColors {
        match self.block_type {
            BlockType::Edge => {
                let other_color = donor
                    .iter()
                    .find_map(|(f, color)| (f != face).then_some(color))
                    .unwrap_or_else(|| unreachable!("an edge has a sticker off {face}"));
                self.colors.remap(|f, _| {
                    if f == face {
                        donor.color_or_panic(face)
                    } else {
                        other_color
                    }
                })
            }
            BlockType::Corner => {
                let (left, right) = corner_sides(self.colors.corner_faces(), face);
                let (donor_left, donor_right) = corner_sides(donor.corner_faces(), face);
                self.colors.remap(|f, _| {
                    if f == face {
                        donor.color_or_panic(face)
                    } else if f == left {
                        donor.color_or_panic(donor_left)
                    } else {
                        debug_assert_eq!(f, right);
                        donor.color_or_panic(donor_right)
                    }
                })
            }
            BlockType::Middle | BlockType::Center => self.colors.clone(),
        }
    }

    /// The colors of this block after the slice containing it turns, given
    /// the pre-turn colors of the block that turns into this position.
    #[must_use]
    pub fn new_colors_axis(&self, donor: &FaceColors) -> FaceColors {
        match self.block_type {
            BlockType::Middle => {
                let Some((_, color)) = donor.iter().next() else {
                    unreachable!("a middle block has one sticker");
                };
                self.colors.remap(|_, _| color)
            }
            BlockType::Edge => {
                let shared = self.colors.faces().find(|&face| donor.contains(face));
                match shared {
                    Some(shared) => {
                        let own_other = self.colors.faces().find(|&face| face != shared);
                        let donor_other = donor.faces().find(|&face| face != shared);
                        let (Some(own_other), Some(donor_other)) = (own_other, donor_other) else {
                            unreachable!("an edge has two stickers");
                        };
                        self.colors.remap(|f, _| {
                            if f == shared {
                                donor.color_or_panic(donor_other)
                            } else {
                                debug_assert_eq!(f, own_other);
                                donor.color_or_panic(shared)
                            }
                        })
                    }
                    // Half turn: the donor sits diagonally across the slice
                    // and each sticker comes from the opposite face.
                    None => self.colors.remap(|f, _| {
                        donor
                            .iter()
                            .find_map(|(donor_face, color)| {
                                (donor_face.value() == -f.value()).then_some(color)
                            })
                            .unwrap_or_else(|| unreachable!("donor has no sticker opposite {f}"))
                    }),
                }
            }
            BlockType::Corner | BlockType::Center => self.colors.clone(),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.coordinate;
        writeln!(f, "({x}, {y}, {z})\t{}\t\t{}", self.block_type, self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_types() {
        assert_eq!(BlockType::of([1, -1, 1]), BlockType::Corner);
        assert_eq!(BlockType::of([1, 0, 1]), BlockType::Edge);
        assert_eq!(BlockType::of([0, 0, -1]), BlockType::Middle);
        assert_eq!(BlockType::of([0, 0, 0]), BlockType::Center);
    }

    #[test]
    fn test_initial_colors() {
        let corner = Block::new([1, 1, -1]);
        assert_eq!(
            corner.colors().iter().collect::<Vec<_>>(),
            vec![(Face::R, Color::Red), (Face::U, Color::White), (Face::F, Color::Green)]
        );
        assert!(corner.is_solved());
        assert_eq!(Block::new([0, 0, 0]).colors().iter().next(), None);
        assert_eq!(Block::new([0, 1, 0]).colors().faces().count(), 1);
        assert_eq!(Block::new([0, -1, 0]).color(Face::D), Some(Color::Yellow));
        assert_eq!(Block::new([0, -1, 0]).color(Face::U), None);
    }

    #[test]
    fn test_parse_colors() {
        assert_eq!("green".parse::<Color>(), Ok(Color::Green));
        assert_eq!("W".parse::<Color>(), Ok(Color::White));
        assert_eq!(" Blue ".parse::<Color>(), Ok(Color::Blue));
        assert!("purple".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_edge_new_colors() {
        // U turn: the UF edge receives the UR edge's stickers.
        let uf = Block::new([0, 1, -1]);
        let ur = Block::new([1, 1, 0]);
        let colors = uf.new_colors(Face::U, ur.colors());
        assert_eq!(colors.get(Face::U), Some(Color::White));
        assert_eq!(colors.get(Face::F), Some(Color::Red));
    }

    #[test]
    fn test_corner_new_colors() {
        // U turn: the UFR corner receives the UBR corner's stickers, its B
        // sticker landing on R and its R sticker landing on F.
        let ufr = Block::new([1, 1, -1]);
        let ubr = Block::new([1, 1, 1]);
        let colors = ufr.new_colors(Face::U, ubr.colors());
        assert_eq!(colors.get(Face::U), Some(Color::White));
        assert_eq!(colors.get(Face::R), Some(Color::Blue));
        assert_eq!(colors.get(Face::F), Some(Color::Red));
        assert!(colors.faces().eq(ufr.colors().faces()));
    }

    #[test]
    fn test_axis_half_turn_edge() {
        let uf = Block::new([0, 1, -1]);
        let db = Block::new([0, -1, 1]);
        let colors = uf.new_colors_axis(db.colors());
        assert_eq!(colors.get(Face::U), Some(Color::Yellow));
        assert_eq!(colors.get(Face::F), Some(Color::Blue));
    }

    #[test]
    fn test_set_color_rejects_missing_face() {
        let mut middle = Block::new([0, 1, 0]);
        assert!(!middle.set_color(Face::F, Color::Red));
        assert!(middle.set_color(Face::U, Color::Red));
        assert!(!middle.is_solved());
        middle.reset();
        assert!(middle.is_solved());
    }
}
