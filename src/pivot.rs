//! Rotation group manager: transient pivot groups for animating one slice.
//!
//! Attaching moves a slice's cubelets out of the store and expresses each
//! one relative to the pivot. Disbanding folds the pivot's rotation back
//! into each cubelet and returns it to the store, snapped to the lattice.

use std::f32::consts::FRAC_PI_2;

use crate::cubelet::Cubelet;
use crate::geometry::{Axis, LayerSign, Orientation, Transform, SNAP_EPSILON};
use crate::slice::select_slice;
use crate::store::CubeStore;

/// A cubelet owned by a pivot group, with its transform relative to the pivot.
#[derive(Debug, Clone)]
struct PivotMember {
    cubelet: Cubelet,
    local: Transform,
}

#[derive(Debug, Clone)]
pub struct PivotGroup {
    axis: Axis,
    sign: LayerSign,
    /// Accumulated rotation about `axis`, in radians.
    angle: f32,
    members: Vec<PivotMember>,
}

impl PivotGroup {
    /// Extracts the `(axis, sign)` slice from `store` into a new pivot group.
    ///
    /// Each member's local transform compensates for the pivot's own
    /// transform, so world transforms are unchanged by the reparenting.
    pub fn attach(store: &mut CubeStore, axis: Axis, sign: LayerSign) -> Self {
        let in_slice = select_slice(axis, sign);
        let parent_inverse = Transform::about_axis(axis, 0.0).inverse();

        let members: Vec<PivotMember> = store
            .extract(|cubelet| in_slice(cubelet.lattice()))
            .into_iter()
            .map(|cubelet| {
                let local = parent_inverse.compose(cubelet.transform());
                PivotMember { cubelet, local }
            })
            .collect();
        debug_assert_eq!(members.len(), 9, "a face slice holds 9 cubelets");

        log::debug!("attached {} cubelets to pivot {axis} {sign:?}", members.len());
        Self {
            axis,
            sign,
            angle: 0.0,
            members,
        }
    }

    /// Axis the slice turns about.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Which of the two outer slices is held.
    pub fn sign(&self) -> LayerSign {
        self.sign
    }

    /// Current rotation about the axis, in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Moves the pivot. Only the animation drives this.
    pub(crate) fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    /// Number of member cubelets, nine for any outer slice.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The pivot's own transform: a rotation by `angle` about `axis`.
    pub fn transform(&self) -> Transform {
        Transform::about_axis(self.axis, self.angle)
    }

    /// Members paired with their live world transforms.
    pub fn members(&self) -> impl Iterator<Item = (&Cubelet, Transform)> + '_ {
        let pivot = self.transform();
        self.members
            .iter()
            .map(move |member| (&member.cubelet, pivot.compose(&member.local)))
    }

    /// Bakes the completed rotation into every member and returns them to `store`.
    ///
    /// # Panics
    ///
    /// Panics if the pivot is not at a whole number of quarter turns, which
    /// means the animation has not completed.
    pub fn disband(self, store: &mut CubeStore) {
        let turns = (self.angle / FRAC_PI_2).round();
        let remainder = self.angle - turns * FRAC_PI_2;
        assert!(
            remainder.abs() <= SNAP_EPSILON,
            "pivot disbanded mid-rotation at {} rad",
            self.angle
        );

        let turn = Orientation::quarter_turn(self.axis, turns as i32);
        let pivot = self.transform();
        let members = self.members.into_iter().map(|member| {
            let mut cubelet = member.cubelet;
            cubelet.settle(pivot.compose(&member.local), turn);
            cubelet
        });
        store.reclaim(members);

        log::debug!("disbanded pivot {} {:?} after {turns} quarter turns", self.axis, self.sign);
    }
}
