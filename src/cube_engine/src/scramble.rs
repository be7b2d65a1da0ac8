use itertools::Itertools;
use log::debug;

use crate::{
    cube::Cube,
    geometry::{Face, Rotation},
    notation::Move,
};

impl Cube {
    /// Applies `count` random face turns drawn from `rng` and returns them.
    /// No face is turned twice in a row.
    pub fn randomize(&mut self, count: usize, rng: &mut fastrand::Rng) -> Vec<Move> {
        let mut previous = None;
        let moves = (0..count)
            .map(|_| {
                let faces = Face::ALL
                    .into_iter()
                    .filter(|&face| Some(face) != previous)
                    .collect_vec();
                let face = faces[rng.usize(..faces.len())];
                let rotation = Rotation::ALL[rng.usize(..Rotation::ALL.len())];
                previous = Some(face);
                self.rotate(face, rotation)
            })
            .collect_vec();
        debug!("Scrambled with {}", moves.iter().join(" "));
        moves
    }
}
