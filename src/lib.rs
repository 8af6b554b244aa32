//! Rotation engine for an interactive 3x3x3 twisty cube.
//!
//! Tracks the 27 cubelets on an integer lattice, turns one outer slice at a
//! time through a transient pivot group, animates the quarter turn with a
//! tick-driven tween, and snaps every cubelet back onto the lattice when the
//! turn completes.

pub mod animation;
pub mod controller;
pub mod cubelet;
pub mod error;
pub mod facelets;
pub mod geometry;
pub mod pivot;
pub mod slice;
pub mod store;

use controller::{CubeletView, RotationController};

/// Read-only access for a renderer, refreshed every frame.
///
/// Hides the controller's mutating API so drawing code can only observe
/// cubelet transforms and colors.
pub trait CubeView {
    /// Every cubelet with its current world transform.
    fn cubelet_views(&self) -> Vec<CubeletView<'_>>;
    /// True while a quarter turn is animating.
    fn is_animating(&self) -> bool;
}

impl CubeView for RotationController {
    fn cubelet_views(&self) -> Vec<CubeletView<'_>> {
        let mut views: Vec<_> = self.cubelets().collect();
        views.sort_by_key(|view| view.cubelet.id());
        views
    }

    fn is_animating(&self) -> bool {
        self.is_active()
    }
}
