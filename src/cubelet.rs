//! Cubelet definitions and the fixed face coloring.
//!
//! Each of the 27 cubelets is identified by the lattice slot it occupies in
//! the solved cube. Its colors are assigned once from that slot and stay
//! attached to the cubelet's local faces as it moves around.

use std::fmt;

use crate::geometry::{
    snap_translation, Axis, Coord, LayerSign, Orientation, Transform, DRIFT_WARN_EPSILON,
};

/// Sticker color of one local face of a cubelet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Orange,
    Red,
    White,
    Yellow,
    Green,
    Blue,
    /// Interior face with no sticker.
    None,
}

impl Color {
    /// Single-character symbol used in text output.
    pub const fn symbol(self) -> char {
        match self {
            Color::Orange => 'O',
            Color::Red => 'R',
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::None => '.',
        }
    }

    /// Linear RGB components for rendering.
    pub const fn rgb(self) -> [f32; 3] {
        match self {
            Color::Orange => [1.0, 0.55, 0.0],
            Color::Red => [0.8, 0.05, 0.05],
            Color::White => [0.95, 0.95, 0.95],
            Color::Yellow => [1.0, 0.85, 0.0],
            Color::Green => [0.0, 0.6, 0.2],
            Color::Blue => [0.05, 0.2, 0.8],
            Color::None => [0.05, 0.05, 0.05],
        }
    }
}

/// One of the six face directions of a cube, in whatever frame is being discussed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Face {
    /// Faces in material order: +X, -X, +Y, -Y, +Z, -Z.
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    pub const fn new(axis: Axis, sign: LayerSign) -> Self {
        match (axis, sign) {
            (Axis::X, LayerSign::Positive) => Face::PosX,
            (Axis::X, LayerSign::Negative) => Face::NegX,
            (Axis::Y, LayerSign::Positive) => Face::PosY,
            (Axis::Y, LayerSign::Negative) => Face::NegY,
            (Axis::Z, LayerSign::Positive) => Face::PosZ,
            (Axis::Z, LayerSign::Negative) => Face::NegZ,
        }
    }

    /// Axis the face normal lies on.
    pub const fn axis(self) -> Axis {
        match self {
            Face::PosX | Face::NegX => Axis::X,
            Face::PosY | Face::NegY => Axis::Y,
            Face::PosZ | Face::NegZ => Axis::Z,
        }
    }

    pub const fn sign(self) -> LayerSign {
        match self {
            Face::PosX | Face::PosY | Face::PosZ => LayerSign::Positive,
            Face::NegX | Face::NegY | Face::NegZ => LayerSign::Negative,
        }
    }

    /// Outward unit normal as a lattice vector.
    pub const fn normal(self) -> Coord {
        let (x, y, z) = self.axis().unit_coord();
        let s = self.sign().value();
        (x * s, y * s, z * s)
    }

    /// Inverse of [`Face::normal`].
    pub fn from_normal(normal: Coord) -> Option<Self> {
        Face::ALL.into_iter().find(|face| face.normal() == normal)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// The six `(axis, sign, color)` rules: a local face gets the color if the
/// cubelet's initial lattice slot lies on that outer face.
pub const COLOR_RULES: [(Axis, LayerSign, Color); 6] = [
    (Axis::X, LayerSign::Positive, Color::Orange),
    (Axis::X, LayerSign::Negative, Color::Red),
    (Axis::Y, LayerSign::Positive, Color::White),
    (Axis::Y, LayerSign::Negative, Color::Yellow),
    (Axis::Z, LayerSign::Positive, Color::Green),
    (Axis::Z, LayerSign::Negative, Color::Blue),
];

/// Colors of a cubelet's six local faces, indexed by [`Face`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceColors([Color; 6]);

impl FaceColors {
    /// Assigns colors from the cubelet's initial lattice position.
    pub fn for_initial_slot(lattice: Coord) -> Self {
        let mut colors = [Color::None; 6];
        for (axis, sign, color) in COLOR_RULES {
            if axis.component(lattice) == sign.value() {
                colors[Face::new(axis, sign).index()] = color;
            }
        }
        Self(colors)
    }

    #[inline]
    pub const fn get(&self, face: Face) -> Color {
        self.0[face.index()]
    }

    /// Number of faces carrying a sticker.
    pub fn sticker_count(&self) -> usize {
        self.0.iter().filter(|&&color| color != Color::None).count()
    }
}

/// Index of a cubelet, stable for the lifetime of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeletId(pub usize);

impl fmt::Display for CubeletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the 27 unit sub-cubes.
#[derive(Debug, Clone)]
pub struct Cubelet {
    id: CubeletId,
    lattice: Coord,
    orientation: Orientation,
    transform: Transform,
    colors: FaceColors,
}

impl Cubelet {
    /// Creates a cubelet resting in its solved slot with the identity orientation.
    pub fn new(id: CubeletId, lattice: Coord) -> Self {
        Self {
            id,
            lattice,
            orientation: Orientation::IDENTITY,
            transform: Transform::at_rest(lattice, Orientation::IDENTITY),
            colors: FaceColors::for_initial_slot(lattice),
        }
    }

    /// Stable identity, assigned from the initial lattice slot.
    pub fn id(&self) -> CubeletId {
        self.id
    }

    /// Lattice slot the cubelet occupied when it last came to rest.
    pub fn lattice(&self) -> Coord {
        self.lattice
    }

    /// Orientation relative to the initial axis-aligned pose.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// World transform at rest. While the cubelet belongs to a pivot group,
    /// its live world transform comes from the group instead.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Sticker colors in the cubelet's local frame.
    pub fn colors(&self) -> &FaceColors {
        &self.colors
    }

    /// Color currently visible in the world direction `face`.
    pub fn world_color(&self, face: Face) -> Color {
        let local_normal = self.orientation.inverse().apply(face.normal());
        match Face::from_normal(local_normal) {
            Some(local) => self.colors.get(local),
            None => unreachable!("orientations map unit normals to unit normals"),
        }
    }

    /// Brings the cubelet to rest after a completed quarter turn.
    ///
    /// `baked` is the world transform with the pivot's final rotation folded
    /// in; `turn` is the exact rotation the pivot performed. The exact
    /// integer mapping is authoritative; `baked` only serves to detect drift.
    pub(crate) fn settle(&mut self, baked: Transform, turn: Orientation) {
        let lattice = turn.apply(self.lattice);
        let orientation = turn * self.orientation;

        let (snapped_lattice, translation_drift) = snap_translation(baked.translation);
        assert_eq!(
            snapped_lattice, lattice,
            "cubelet {} drifted to {snapped_lattice:?}, expected {lattice:?}",
            self.id
        );
        let Some((snapped_orientation, rotation_drift)) = Orientation::snap(baked.rotation) else {
            panic!("cubelet {} rotated off the cube's rotation group", self.id);
        };
        assert_eq!(
            snapped_orientation, orientation,
            "cubelet {} snapped to an unexpected orientation",
            self.id
        );

        let drift = translation_drift.max(rotation_drift);
        if drift > DRIFT_WARN_EPSILON {
            log::warn!("cubelet {} snapped after drifting by {drift:e}", self.id);
        }

        self.lattice = lattice;
        self.orientation = orientation;
        self.transform = Transform::at_rest(lattice, orientation);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn test_corner_edge_center_sticker_counts() {
        assert_eq!(FaceColors::for_initial_slot((1, 1, 1)).sticker_count(), 3);
        assert_eq!(FaceColors::for_initial_slot((1, 1, 0)).sticker_count(), 2);
        assert_eq!(FaceColors::for_initial_slot((0, 0, -1)).sticker_count(), 1);
        assert_eq!(FaceColors::for_initial_slot((0, 0, 0)).sticker_count(), 0);
    }

    #[test]
    fn test_colors_follow_color_rules() {
        let colors = FaceColors::for_initial_slot((1, -1, 0));
        assert_eq!(colors.get(Face::PosX), Color::Orange);
        assert_eq!(colors.get(Face::NegY), Color::Yellow);
        assert_eq!(colors.get(Face::NegX), Color::None);
        assert_eq!(colors.get(Face::PosZ), Color::None);
    }

    #[test]
    fn test_face_normal_roundtrip() {
        for face in Face::ALL {
            assert_eq!(Face::from_normal(face.normal()), Some(face));
            assert_eq!(Face::new(face.axis(), face.sign()), face);
        }
    }

    #[test]
    fn test_world_color_follows_orientation() {
        let mut cubelet = Cubelet::new(CubeletId(0), (1, 1, 1));
        assert_eq!(cubelet.world_color(Face::PosY), Color::White);

        // a quarter turn about +X carries the +Y sticker to +Z
        let turn = Orientation::quarter_turn(Axis::X, 1);
        let baked = Transform::about_axis(Axis::X, FRAC_PI_2).compose(cubelet.transform());
        cubelet.settle(baked, turn);

        assert_eq!(cubelet.lattice(), (1, -1, 1));
        assert_eq!(cubelet.world_color(Face::PosZ), Color::White);
        assert_eq!(cubelet.world_color(Face::PosX), Color::Orange);
        assert_eq!(*cubelet.colors(), FaceColors::for_initial_slot((1, 1, 1)));
    }

    #[test]
    #[should_panic(expected = "drifted")]
    fn test_settle_rejects_transform_from_wrong_turn() {
        let mut cubelet = Cubelet::new(CubeletId(0), (1, 1, 1));
        let baked = Transform::about_axis(Axis::X, -FRAC_PI_2).compose(cubelet.transform());
        cubelet.settle(baked, Orientation::quarter_turn(Axis::X, 1));
    }
}
