//! Interactive 3D view of the cube using kiss3d.

use std::time::Instant;

use kiss3d::prelude::*;

use twister::controller::{NamedMove, RotationController};
use twister::cubelet::{Color as StickerColor, Face};
use twister::CubeView;

/// Edge length of a cubelet body (slightly smaller than 1.0 for visible gaps).
const BODY_SIZE: f32 = 0.95;
/// Edge length of a sticker across the face.
const STICKER_SIZE: f32 = 0.82;
/// Sticker thickness along the face normal.
const STICKER_DEPTH: f32 = 0.02;

fn render_color(color: StickerColor) -> Color {
    let [r, g, b] = color.rgb();
    Color::new(r, g, b, 1.0)
}

/// Builds one scene node per cubelet, indexed by cubelet id.
///
/// Stickers are children placed in the cubelet's local frame, so only the
/// parent node needs moving when the cubelet turns.
fn build_scene(scene: &mut SceneNode3d, cube: &impl CubeView) -> Vec<SceneNode3d> {
    cube.cubelet_views()
        .into_iter()
        .map(|view| {
            let mut node = scene
                .add_cube(BODY_SIZE, BODY_SIZE, BODY_SIZE)
                .set_color(render_color(StickerColor::None));

            for face in Face::ALL {
                let color = view.cubelet.colors().get(face);
                if color == StickerColor::None {
                    continue;
                }
                let (nx, ny, nz) = face.normal();
                let normal = Vec3::new(nx as f32, ny as f32, nz as f32);
                let extent =
                    Vec3::splat(STICKER_SIZE) - normal.abs() * (STICKER_SIZE - STICKER_DEPTH);
                node.add_cube(extent.x, extent.y, extent.z)
                    .set_color(render_color(color))
                    .set_position(normal * (BODY_SIZE / 2.0));
            }
            node
        })
        .collect()
}

/// Moves every cubelet node to its current world transform.
fn sync_scene(nodes: &mut [SceneNode3d], cube: &impl CubeView) {
    for view in cube.cubelet_views() {
        let node = &mut nodes[view.cubelet.id().0];
        let [x, y, z] = view.transform.translation.to_array();
        let [qx, qy, qz, qw] = view.transform.rotation.to_array();
        node.set_position(Vec3::new(x, y, z));
        node.set_rotation(Quat::from_xyzw(qx, qy, qz, qw));
    }
}

/// Maps a key press to a face turn. Shift selects the counter-clockwise turn.
fn key_to_move(key: kiss3d::event::Key, shift: bool) -> Option<NamedMove> {
    use kiss3d::event::Key;

    let clockwise = match key {
        Key::R => NamedMove::RightCw,
        Key::L => NamedMove::LeftCw,
        Key::U => NamedMove::TopCw,
        Key::D => NamedMove::BottomCw,
        Key::F => NamedMove::FrontCw,
        Key::B => NamedMove::BackCw,
        _ => return None,
    };
    Some(if shift { clockwise.inverse() } else { clockwise })
}

/// Opens the viewer and runs until the window is closed.
pub fn display(controller: RotationController) {
    pollster::block_on(display_async(controller));
}

async fn display_async(mut controller: RotationController) {
    let mut window = Window::new("Twister - [R/L/U/D/F/B] turn, [Shift] reverse").await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(8.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut nodes = build_scene(&mut scene, &controller);
    let mut last_frame = Instant::now();

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, modifiers) = event.value {
                use kiss3d::event::{Action, Modifiers};
                if action == Action::Press {
                    let shift = modifiers.contains(Modifiers::Shift);
                    if let Some(named) = key_to_move(key, shift) {
                        controller.request_move(named);
                    }
                }
            }
        }

        let now = Instant::now();
        controller.tick(now - last_frame);
        last_frame = now;

        sync_scene(&mut nodes, &controller);

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_selects_inverse_turn() {
        use kiss3d::event::Key;
        assert_eq!(key_to_move(Key::R, false), Some(NamedMove::RightCw));
        assert_eq!(key_to_move(Key::R, true), Some(NamedMove::RightCcw));
        assert_eq!(key_to_move(Key::U, true), Some(NamedMove::TopCcw));
        assert_eq!(key_to_move(Key::Space, false), None);
    }
}
