//! Slice selection.

use crate::geometry::{Axis, Coord, LayerSign};

/// Returns the membership predicate for the outer layer on `sign`'s side of `axis`.
///
/// The middle layer (coordinate 0) is never selected.
pub fn select_slice(axis: Axis, sign: LayerSign) -> impl Fn(Coord) -> bool + Copy {
    move |coord| {
        let value = axis.component(coord);
        match sign {
            LayerSign::Positive => value > 0,
            LayerSign::Negative => value < 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{idx_to_coord, CUBELET_COUNT};

    #[test]
    fn test_each_slice_has_nine_members() {
        for axis in Axis::ALL {
            for sign in [LayerSign::Negative, LayerSign::Positive] {
                let in_slice = select_slice(axis, sign);
                let members: Vec<_> = (0..CUBELET_COUNT)
                    .map(idx_to_coord)
                    .filter(|&coord| in_slice(coord))
                    .collect();
                assert_eq!(members.len(), 9, "{axis} {sign:?} slice");
                assert!(members.iter().all(|&c| axis.component(c) == sign.value()));
            }
        }
    }

    #[test]
    fn test_center_layer_is_never_selected() {
        for axis in Axis::ALL {
            let positive = select_slice(axis, LayerSign::Positive);
            let negative = select_slice(axis, LayerSign::Negative);
            let (x, y, z) = axis.unit_coord();
            assert!(positive((x, y, z)));
            assert!(negative((-x, -y, -z)));
            assert!(!positive((0, 0, 0)) && !negative((0, 0, 0)));
        }
    }
}
