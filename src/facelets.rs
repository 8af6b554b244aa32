//! Text view of the six outer faces of a resting cube.
//!
//! Each face is shown as a 3x3 grid of sticker symbols, as seen from outside
//! the cube. Top is viewed with Back away from the viewer, Bottom with Front
//! away from the viewer, and the four side faces upright.

use crate::cubelet::{Color, Face};
use crate::geometry::Coord;
use crate::store::{CubeStore, DIM};

/// Display order and labels of the outer faces.
pub const FACE_LABELS: [(Face, &str); 6] = [
    (Face::PosY, "Top"),
    (Face::NegX, "Left"),
    (Face::PosZ, "Front"),
    (Face::PosX, "Right"),
    (Face::NegZ, "Back"),
    (Face::NegY, "Bottom"),
];

/// Lattice position of the sticker at `(row, col)` of a face grid.
fn face_cell(face: Face, row: usize, col: usize) -> Coord {
    let r = row as i32 - 1;
    let c = col as i32 - 1;
    match face {
        Face::PosY => (c, 1, r),
        Face::NegY => (c, -1, -r),
        Face::PosZ => (c, -r, 1),
        Face::NegZ => (-c, -r, -1),
        Face::PosX => (1, -r, -c),
        Face::NegX => (-1, -r, c),
    }
}

/// Sticker colors of one outer face, or `None` for slots whose cubelet is
/// currently held by a pivot group.
pub fn face_grid(store: &CubeStore, face: Face) -> [[Option<Color>; DIM]; DIM] {
    let cubelets = store.lattice_map();
    let mut grid = [[None; DIM]; DIM];
    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = cubelets
                .get(&face_cell(face, row, col))
                .map(|cubelet| cubelet.world_color(face));
        }
    }
    grid
}

/// Formats all six faces, one labelled 3x3 block per face.
///
/// Missing cubelets show as `?`.
pub fn format_faces(store: &CubeStore) -> String {
    let mut output = String::new();
    for (face, label) in FACE_LABELS {
        output.push_str(label);
        output.push('\n');
        for row in face_grid(store, face) {
            for cell in row {
                output.push(cell.map_or('?', Color::symbol));
            }
            output.push('\n');
        }
    }
    output
}

/// True if every outer face shows a single color.
pub fn is_solved(store: &CubeStore) -> bool {
    FACE_LABELS.iter().all(|&(face, _)| {
        let grid = face_grid(store, face);
        let first = grid[0][0];
        first.is_some() && grid.iter().flatten().all(|&cell| cell == first)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Axis, LayerSign};
    use crate::pivot::PivotGroup;

    fn turn(store: &mut CubeStore, axis: Axis, sign: LayerSign, quarter_turns: i32) {
        let mut pivot = PivotGroup::attach(store, axis, sign);
        pivot.set_angle(quarter_turns as f32 * std::f32::consts::FRAC_PI_2);
        pivot.disband(store);
    }

    #[test]
    fn test_face_cells_lie_on_their_face() {
        for face in crate::cubelet::Face::ALL {
            let mut seen = Vec::new();
            for row in 0..DIM {
                for col in 0..DIM {
                    let cell = face_cell(face, row, col);
                    assert_eq!(face.axis().component(cell), face.sign().value());
                    assert!(!seen.contains(&cell), "{face:?} repeats {cell:?}");
                    seen.push(cell);
                }
            }
        }
    }

    #[test]
    fn test_initial_cube_is_solved() {
        let store = CubeStore::initialize();
        assert!(is_solved(&store));
        insta::assert_snapshot!("solved_faces", format_faces(&store));
    }

    #[test]
    fn test_single_turn_is_not_solved() {
        let mut store = CubeStore::initialize();
        turn(&mut store, Axis::X, LayerSign::Positive, -1);
        assert!(!is_solved(&store));
        // the right face itself stays uniform
        let right = face_grid(&store, Face::PosX);
        assert!(right.iter().flatten().all(|&c| c == Some(Color::Orange)));
    }

    #[test]
    fn test_missing_cubelets_are_marked() {
        let mut store = CubeStore::initialize();
        let _pivot = PivotGroup::attach(&mut store, Axis::Y, LayerSign::Positive);
        assert!(!is_solved(&store));
        assert!(format_faces(&store).starts_with("Top\n???\n???\n???\n"));
    }

    #[test]
    fn test_turn_sequence_faces() {
        let mut store = CubeStore::initialize();
        // right cw, top ccw, front cw
        turn(&mut store, Axis::X, LayerSign::Positive, -1);
        turn(&mut store, Axis::Y, LayerSign::Positive, 1);
        turn(&mut store, Axis::Z, LayerSign::Positive, -1);
        insta::assert_snapshot!("right_top_front_faces", format_faces(&store));
    }
}
