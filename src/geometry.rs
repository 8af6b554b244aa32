//! Lattice coordinates, quarter-turn orientations and float transforms.
//!
//! A cubelet at rest is described exactly by an integer lattice position and
//! one of the 24 orientations of a cube (the rotation group of a cube). While
//! a slice animates, the same cubelet is described by a float [`Transform`];
//! snapping converts the float description back to the exact one.

use std::fmt;
use std::ops::Mul;

use glam::{Mat3, Quat, Vec3};
use rustc_hash::FxHashSet;

/// A lattice position. Each component is in `-1..=1` for a 3x3x3 cube.
pub type Coord = (i32, i32, i32);

/// Maximum distance, in radians, between a pivot angle and the nearest
/// quarter turn for the pivot to be considered at a quarter turn.
pub const SNAP_EPSILON: f32 = 1e-4;

/// Snapping corrections larger than this are logged as probable upstream bugs.
pub const DRIFT_WARN_EPSILON: f32 = 1e-3;

/// One of the three principal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Parses the axis name used at the command boundary (`x`, `y` or `z`).
    pub fn from_char(name: char) -> Option<Self> {
        match name.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the component of `coord` along this axis.
    #[inline]
    pub const fn component(self, (x, y, z): Coord) -> i32 {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }

    /// Returns the unit lattice vector pointing along this axis.
    pub const fn unit_coord(self) -> Coord {
        match self {
            Axis::X => (1, 0, 0),
            Axis::Y => (0, 1, 0),
            Axis::Z => (0, 0, 1),
        }
    }

    /// Unit vector along the positive end of the axis.
    pub fn unit_vector(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Which half of the cube along an axis: the layer at `+1` or at `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerSign {
    Negative,
    Positive,
}

impl LayerSign {
    /// Parses `-1` or `+1`. Any other value is not a layer sign.
    pub const fn from_value(value: i32) -> Option<Self> {
        match value {
            -1 => Some(LayerSign::Negative),
            1 => Some(LayerSign::Positive),
            _ => None,
        }
    }

    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            LayerSign::Negative => -1,
            LayerSign::Positive => 1,
        }
    }
}

/// An exact rotation of the cube, stored as a signed permutation matrix.
///
/// Rows are applied to column vectors: `apply(v) = M * v`. Only the 24
/// proper rotations are ever constructed outside of [`Orientation::snap`],
/// which rejects everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation([[i32; 3]; 3]);

impl Orientation {
    pub const IDENTITY: Self = Self([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);

    /// Rotation by `turns` quarter turns about `axis`, counter-clockwise when
    /// looking from the positive end of the axis toward the origin.
    pub const fn quarter_turn(axis: Axis, turns: i32) -> Self {
        let (c, s) = match turns.rem_euclid(4) {
            0 => (1, 0),
            1 => (0, 1),
            2 => (-1, 0),
            _ => (0, -1),
        };
        match axis {
            Axis::X => Self([[1, 0, 0], [0, c, -s], [0, s, c]]),
            Axis::Y => Self([[c, 0, s], [0, 1, 0], [-s, 0, c]]),
            Axis::Z => Self([[c, -s, 0], [s, c, 0], [0, 0, 1]]),
        }
    }

    /// Rotates a lattice coordinate about the cube center.
    #[inline]
    pub const fn apply(self, (x, y, z): Coord) -> Coord {
        let m = self.0;
        (
            m[0][0] * x + m[0][1] * y + m[0][2] * z,
            m[1][0] * x + m[1][1] * y + m[1][2] * z,
            m[2][0] * x + m[2][1] * y + m[2][2] * z,
        )
    }

    /// Returns the inverse rotation. For a signed permutation this is the transpose.
    pub const fn inverse(self) -> Self {
        let m = self.0;
        Self([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// The same rotation as a float matrix.
    pub fn to_mat3(self) -> Mat3 {
        let m = self.0;
        let column = |j: usize| Vec3::new(m[0][j] as f32, m[1][j] as f32, m[2][j] as f32);
        Mat3::from_cols(column(0), column(1), column(2))
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_mat3(&self.to_mat3())
    }

    /// Rounds a float rotation to the nearest cube orientation.
    ///
    /// Returns the orientation and the largest per-entry correction applied,
    /// or `None` if the rounded matrix is not one of the 24 rotations.
    pub fn snap(rotation: Quat) -> Option<(Self, f32)> {
        let matrix = Mat3::from_quat(rotation.normalize());
        let mut rows = [[0i32; 3]; 3];
        let mut drift = 0.0f32;
        for (row, entries) in rows.iter_mut().enumerate() {
            for (col, entry) in entries.iter_mut().enumerate() {
                let value = matrix.col(col)[row];
                let rounded = value.round();
                drift = drift.max((value - rounded).abs());
                *entry = rounded as i32;
            }
        }
        let orientation = Self(rows);
        orientation.is_rotation().then_some((orientation, drift))
    }

    /// Checks that this is a signed permutation matrix with determinant +1.
    pub fn is_rotation(self) -> bool {
        let m = self.0;
        let unit_count = |values: [i32; 3]| {
            values.iter().all(|v| (-1..=1).contains(v))
                && values.iter().filter(|&&v| v != 0).count() == 1
        };
        let rows_ok = m.iter().all(|&row| unit_count(row));
        let cols_ok = (0..3).all(|j| unit_count([m[0][j], m[1][j], m[2][j]]));
        rows_ok && cols_ok && self.determinant() == 1
    }

    fn determinant(self) -> i32 {
        let m = self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// All 24 orientations of a cube, generated from quarter turns about the
    /// three principal axes.
    pub fn all() -> Vec<Self> {
        let mut seen: FxHashSet<Self> = FxHashSet::default();
        seen.insert(Self::IDENTITY);
        let mut frontier = vec![Self::IDENTITY];

        while let Some(orientation) = frontier.pop() {
            for axis in Axis::ALL {
                let next = Self::quarter_turn(axis, 1) * orientation;
                if seen.insert(next) {
                    frontier.push(next);
                }
            }
        }

        let mut all: Vec<Self> = seen.into_iter().collect();
        all.sort();
        all
    }
}

impl Mul for Orientation {
    type Output = Self;

    /// Composes two rotations: `(a * b).apply(v) == a.apply(b.apply(v))`.
    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.0, rhs.0);
        let mut out = [[0i32; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, entry) in row.iter_mut().enumerate() {
                *entry = (0..3).map(|k| a[i][k] * b[k][j]).sum();
            }
        }
        Self(out)
    }
}

/// A rigid transform: rotation followed by translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// The exact world transform of a cubelet resting at `lattice` with `orientation`.
    pub fn at_rest(lattice: Coord, orientation: Orientation) -> Self {
        Self {
            translation: coord_to_vec3(lattice),
            rotation: orientation.to_quat(),
        }
    }

    /// A pure rotation by `angle` radians about `axis` through the origin.
    pub fn about_axis(axis: Axis, angle: f32) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::from_axis_angle(axis.unit_vector(), angle),
        }
    }

    /// Returns `self * local`: `local` expressed in the frame described by `self`.
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            translation: self.translation + self.rotation * local.translation,
            rotation: self.rotation * local.rotation,
        }
    }

    /// The transform that undoes this one.
    pub fn inverse(&self) -> Transform {
        let rotation = self.rotation.inverse();
        Transform {
            translation: -(rotation * self.translation),
            rotation,
        }
    }

    /// Maps a point from the local frame into the parent frame.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * point
    }
}

/// Converts a lattice coordinate to world units (one unit per cell).
#[inline]
pub fn coord_to_vec3((x, y, z): Coord) -> Vec3 {
    Vec3::new(x as f32, y as f32, z as f32)
}

/// Rounds a world translation to the nearest lattice coordinate.
///
/// Returns the coordinate and the largest per-component correction applied.
pub fn snap_translation(translation: Vec3) -> (Coord, f32) {
    let rounded = translation.round();
    let drift = (translation - rounded).abs().max_element();
    (
        (rounded.x as i32, rounded.y as i32, rounded.z as i32),
        drift,
    )
}
