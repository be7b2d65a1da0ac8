//! Coordinate and face algebra for a 3x3x3 cube.
//!
//! Every block lives at a fixed integer coordinate with components in
//! `{-1, 0, 1}`. A face is encoded as a signed integer whose magnitude is
//! the axis (1 = x, 2 = y, 3 = z) and whose sign is the polarity. Turns are
//! computed by projecting blocks onto the 2D plane of the turning layer,
//! rotating that projection around the ring, and lifting it back to 3D.

use std::fmt;

/// A block position `[x, y, z]`, each component in `{-1, 0, 1}`.
pub type Coordinate = [i8; 3];

/// A block position projected onto the plane of a face or slice.
pub type RelativeCoordinate = [i8; 2];

/// One of the six sides of the cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum Face {
    F = -3,
    D = -2,
    L = -1,
    R = 1,
    U = 2,
    B = 3,
}

/// One of the three middle slices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Axis {
    /// Parallel to L/R, selects `x == 0`.
    M = 1,
    /// Parallel to U/D, selects `y == 0`.
    E = 2,
    /// Parallel to F/B, selects `z == 0`.
    S = 3,
}

/// A whole-cube reorientation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Orientation {
    /// Turn the entire cube as R.
    X = 1,
    /// Turn the entire cube as U.
    Y = 2,
    /// Turn the entire cube as F.
    Z = -3,
}

/// The amount a layer is turned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Rotation {
    Ccw = -1,
    Cw = 1,
    Double = 2,
}

impl Face {
    /// Faces in ascending order of their encoding.
    pub const ALL: [Face; 6] = [Face::F, Face::D, Face::L, Face::R, Face::U, Face::B];

    #[must_use]
    pub fn value(self) -> i8 {
        self as i8
    }

    #[must_use]
    pub fn from_value(value: i8) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.value() == value)
    }

    /// Index into a [`Coordinate`] of the axis this face is normal to.
    #[must_use]
    pub fn axis_index(self) -> usize {
        usize::from(self.value().unsigned_abs()) - 1
    }

    /// `1` for R, U and B; `-1` for L, D and F.
    #[must_use]
    pub fn sign(self) -> i8 {
        self.value().signum()
    }

    /// The coordinate of the middle block of this face.
    #[must_use]
    pub fn normal(self) -> Coordinate {
        let mut normal = [0; 3];
        normal[self.axis_index()] = self.sign();
        normal
    }

    /// The slice parallel to this face.
    #[must_use]
    pub fn parallel_axis(self) -> Axis {
        match self.value().unsigned_abs() {
            1 => Axis::M,
            2 => Axis::E,
            _ => Axis::S,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::U => 'U',
            Face::B => 'B',
        }
    }

    /// The face whose upper case letter is `letter`.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }

    /// Does a block at `coordinate` show a sticker on this face?
    #[must_use]
    pub fn contains(self, coordinate: Coordinate) -> bool {
        coordinate[self.axis_index()] == self.sign()
    }

    /// Projects `coordinate` onto the plane of this face so that a single
    /// ring order describes a clockwise turn of every face. Blocks not on
    /// the face project to the origin.
    #[must_use]
    pub fn relative_coordinates(self, coordinate: Coordinate) -> RelativeCoordinate {
        if !self.contains(coordinate) {
            return [0, 0];
        }
        let [x, y, z] = coordinate;
        let [first, second] = match self.axis_index() {
            0 => [y, z],
            1 => [x, z],
            _ => [x, y],
        };
        match self {
            Face::B | Face::D => [-first, second],
            Face::L => new_xy([first, second], Rotation::Cw),
            Face::R => [second, first],
            Face::F | Face::U => [first, second],
        }
    }

    /// Inverse of [`Face::relative_coordinates`] for blocks on this face.
    #[must_use]
    pub fn absolute_coordinates(self, relative: RelativeCoordinate) -> Coordinate {
        let [first, second] = match self {
            Face::B | Face::D => [-relative[0], relative[1]],
            Face::L => new_xy(relative, Rotation::Ccw),
            Face::R => [relative[1], relative[0]],
            Face::F | Face::U => relative,
        };
        match self.axis_index() {
            0 => [self.sign(), first, second],
            1 => [first, self.sign(), second],
            _ => [first, second, self.sign()],
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::M, Axis::E, Axis::S];

    #[must_use]
    pub fn value(self) -> i8 {
        self as i8
    }

    #[must_use]
    pub fn axis_index(self) -> usize {
        usize::from(self.value().unsigned_abs()) - 1
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Axis::M => 'M',
            Axis::E => 'E',
            Axis::S => 'S',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Axis> {
        Axis::ALL.into_iter().find(|axis| axis.letter() == letter)
    }

    /// Is a block at `coordinate` part of this slice?
    #[must_use]
    pub fn contains(self, coordinate: Coordinate) -> bool {
        coordinate[self.axis_index()] == 0
    }

    /// Projects `coordinate` onto the plane of this slice, or the origin if
    /// the block is not in the slice.
    #[must_use]
    pub fn relative_coordinates(self, coordinate: Coordinate) -> RelativeCoordinate {
        let [x, y, z] = coordinate;
        if !self.contains(coordinate) {
            return [0, 0];
        }
        match self {
            Axis::M => [-z, y],
            Axis::E => [-x, z],
            Axis::S => [x, y],
        }
    }

    /// Inverse of [`Axis::relative_coordinates`] for blocks in this slice.
    #[must_use]
    pub fn absolute_coordinates(self, relative: RelativeCoordinate) -> Coordinate {
        let [x, y] = relative;
        match self {
            Axis::M => [0, y, -x],
            Axis::E => [-x, 0, y],
            Axis::S => [x, y, 0],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [Orientation::X, Orientation::Y, Orientation::Z];

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Orientation::X => 'x',
            Orientation::Y => 'y',
            Orientation::Z => 'z',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Orientation> {
        Orientation::ALL
            .into_iter()
            .find(|orientation| orientation.letter() == letter)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Rotation {
    pub const ALL: [Rotation; 3] = [Rotation::Ccw, Rotation::Cw, Rotation::Double];

    #[must_use]
    pub fn value(self) -> i8 {
        self as i8
    }

    /// The rotation that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::Ccw => Rotation::Cw,
            Rotation::Cw => Rotation::Ccw,
            Rotation::Double => Rotation::Double,
        }
    }

    /// Notation suffix: `'` for counterclockwise, `2` for a half turn.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Rotation::Ccw => "'",
            Rotation::Cw => "",
            Rotation::Double => "2",
        }
    }
}

/// Advances a perimeter position around its ring.
///
/// Edge positions cycle through `(-1, 0), (0, 1), (1, 0), (0, -1)` and
/// corner positions through `(-1, -1), (-1, 1), (1, 1), (1, -1)`; a clockwise
/// turn steps one place backwards in that order, counterclockwise one place
/// forwards, and a double turn two places. Both rings are the orbits of a
/// quarter rotation of the plane, so stepping backwards once is the map
/// `(x, y) -> (-y, x)`. The origin is fixed.
#[must_use]
pub fn new_xy(old: RelativeCoordinate, rotation: Rotation) -> RelativeCoordinate {
    let steps = rotation.value().rem_euclid(4);
    (0..steps).fold(old, |[x, y], _| [-y, x])
}

/// Canonical handedness of each corner: the corner at faces `{a, b, c}`
/// listed so that, once rotated to start at a face, the next entry is the
/// left side and the one after it the right side as seen from that face.
pub const CORNER_FACE_ORDER: [[i8; 3]; 8] = [
    [2, 1, -3],
    [1, -2, -3],
    [-3, -2, -1],
    [-3, -1, 2],
    [1, 2, 3],
    [-2, 1, 3],
    [3, -1, -2],
    [3, 2, -1],
];

/// Given the three faces of a corner and one of them as the reference,
/// returns the `(left, right)` faces as seen from the reference face.
///
/// # Panics
///
/// Panics if `faces` is not the face set of a corner or does not contain
/// `reference`.
#[must_use]
pub fn corner_sides(faces: [Face; 3], reference: Face) -> (Face, Face) {
    let mut values = faces.map(Face::value);
    values.sort_unstable();

    let Some(row) = CORNER_FACE_ORDER.iter().find(|row| {
        let mut sorted = **row;
        sorted.sort_unstable();
        sorted == values
    }) else {
        unreachable!("{faces:?} is not the face set of a corner");
    };
    let Some(lead) = row.iter().position(|&value| value == reference.value()) else {
        unreachable!("{reference} is not a face of the corner {faces:?}");
    };

    let side = |offset: usize| {
        Face::from_value(row[(lead + offset) % 3])
            .unwrap_or_else(|| unreachable!("face order table only holds face values"))
    };
    (side(1), side(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDGE_RING: [RelativeCoordinate; 4] = [[-1, 0], [0, 1], [1, 0], [0, -1]];
    const CORNER_RING: [RelativeCoordinate; 4] = [[-1, -1], [-1, 1], [1, 1], [1, -1]];

    fn all_coordinates() -> impl Iterator<Item = Coordinate> {
        (-1..=1).flat_map(|x| (-1..=1).flat_map(move |y| (-1..=1).map(move |z| [x, y, z])))
    }

    #[test]
    fn test_normals() {
        assert_eq!(Face::R.normal(), [1, 0, 0]);
        assert_eq!(Face::L.normal(), [-1, 0, 0]);
        assert_eq!(Face::U.normal(), [0, 1, 0]);
        assert_eq!(Face::D.normal(), [0, -1, 0]);
        assert_eq!(Face::B.normal(), [0, 0, 1]);
        assert_eq!(Face::F.normal(), [0, 0, -1]);
        for face in Face::ALL {
            assert!(face.contains(face.normal()));
            assert_eq!(Face::from_value(face.value()), Some(face));
        }
    }

    #[test]
    fn test_new_xy_follows_rings() {
        for ring in [EDGE_RING, CORNER_RING] {
            for (i, &position) in ring.iter().enumerate() {
                assert_eq!(new_xy(position, Rotation::Cw), ring[(i + 3) % 4]);
                assert_eq!(new_xy(position, Rotation::Ccw), ring[(i + 1) % 4]);
                assert_eq!(new_xy(position, Rotation::Double), ring[(i + 2) % 4]);
            }
        }
        assert_eq!(new_xy([0, 0], Rotation::Cw), [0, 0]);
    }

    #[test]
    fn test_face_projection_round_trips() {
        for face in Face::ALL {
            for coordinate in all_coordinates().filter(|&c| face.contains(c)) {
                let relative = face.relative_coordinates(coordinate);
                assert_eq!(face.absolute_coordinates(relative), coordinate, "{face}");
            }
            assert_eq!(face.relative_coordinates([0, 0, 0]), [0, 0]);
        }
    }

    #[test]
    fn test_axis_projection_round_trips() {
        for axis in Axis::ALL {
            for coordinate in all_coordinates().filter(|&c| axis.contains(c)) {
                let relative = axis.relative_coordinates(coordinate);
                assert_eq!(axis.absolute_coordinates(relative), coordinate, "{axis}");
            }
        }
        assert_eq!(Axis::M.relative_coordinates([1, 1, 1]), [0, 0]);
    }

    #[test]
    fn test_projection_conventions() {
        assert_eq!(Face::B.relative_coordinates([1, 0, 1]), [-1, 0]);
        assert_eq!(Face::R.relative_coordinates([1, 1, -1]), [-1, 1]);
        assert_eq!(Face::L.relative_coordinates([-1, 1, 0]), [0, 1]);
        assert_eq!(Face::F.relative_coordinates([1, -1, -1]), [1, -1]);
    }

    #[test]
    fn test_corner_sides() {
        assert_eq!(corner_sides([Face::R, Face::U, Face::F], Face::U), (Face::R, Face::F));
        assert_eq!(corner_sides([Face::R, Face::U, Face::F], Face::F), (Face::U, Face::R));
        assert_eq!(corner_sides([Face::L, Face::D, Face::F], Face::L), (Face::F, Face::D));
        // Every corner resolves from every one of its faces.
        for x in [-1, 1] {
            for y in [-1, 1] {
                for z in [-1, 1] {
                    let faces = [
                        Face::from_value(x).unwrap(),
                        Face::from_value(2 * y).unwrap(),
                        Face::from_value(3 * z).unwrap(),
                    ];
                    for face in faces {
                        let (left, right) = corner_sides(faces, face);
                        assert!(left != right && left != face && right != face);
                    }
                }
            }
        }
    }

    #[test]
    fn test_rotation_inverse() {
        for rotation in Rotation::ALL {
            assert_eq!(rotation.inverse().inverse(), rotation);
        }
        assert_eq!(Rotation::Double.inverse(), Rotation::Double);
    }
}
