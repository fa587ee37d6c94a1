use drawkit::{Backdrop, DrawCmd, Scene};
use eframe::egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};

use crate::model::{PathResult, Point};

pub const MAP_BACKGROUND: Color32 = Color32::from_rgb(0x20, 0x20, 0x20);
pub const PATH_COLOR: Color32 = Color32::from_rgb(0xFF, 0x00, 0xFF);
pub const PATH_WIDTH: f32 = 12.0;

/// Scene size used until the campus map has loaded.
pub const FALLBACK_MAP_SIZE: Vec2 = vec2(4330.0, 2964.0);

const START_MARKER_SCALE: f32 = 1.4;
const FLAG_SIZE: f32 = 150.0;

/// Marker images, each present once loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Markers {
    pub start: Option<Backdrop>,
    pub destination: Option<Backdrop>,
}

fn to_pos(p: Point) -> Pos2 {
    pos2(p.x as f32, p.y as f32)
}

/// Build the map canvas: background, campus map, then the path overlay.
pub fn render_path(map: Option<Backdrop>, markers: &Markers, path: Option<&PathResult>) -> Scene {
    let size = map.map_or(FALLBACK_MAP_SIZE, |m| m.size);
    let mut scene = Scene::new(size);

    scene.push(DrawCmd::Fill {
        color: MAP_BACKGROUND,
    });
    if let Some(map) = map {
        scene.push(DrawCmd::Image {
            texture: map.texture,
            rect: Rect::from_min_size(Pos2::ZERO, map.size),
        });
    }

    let Some(path) = path else {
        return scene;
    };

    let start = to_pos(path.start);
    if let Some(marker) = markers.start {
        // Anchored above and left of the start point.
        let scaled = marker.size * START_MARKER_SCALE;
        scene.push(DrawCmd::Image {
            texture: marker.texture,
            rect: Rect::from_min_size(start - scaled, scaled),
        });
    }

    scene.push(DrawCmd::Polyline {
        points: path.points().into_iter().map(to_pos).collect(),
        width: PATH_WIDTH,
        color: PATH_COLOR,
    });

    if let Some(flag) = markers.destination {
        let dest = to_pos(path.destination());
        scene.push(DrawCmd::Image {
            texture: flag.texture,
            rect: Rect::from_min_size(pos2(dest.x, dest.y - FLAG_SIZE), Vec2::splat(FLAG_SIZE)),
        });
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Segment;
    use eframe::egui::TextureId;

    fn backdrop(id: u64, w: f32, h: f32) -> Backdrop {
        Backdrop {
            texture: TextureId::Managed(id),
            size: vec2(w, h),
        }
    }

    fn markers() -> Markers {
        Markers {
            start: Some(backdrop(2, 50.0, 40.0)),
            destination: Some(backdrop(3, 300.0, 300.0)),
        }
    }

    fn two_legs() -> PathResult {
        let a = Point { x: 100.0, y: 200.0 };
        let b = Point { x: 300.0, y: 200.0 };
        let c = Point { x: 300.0, y: 500.0 };
        PathResult {
            start: a,
            path: vec![
                Segment {
                    start: a,
                    end: b,
                    cost: 200.0,
                },
                Segment {
                    start: b,
                    end: c,
                    cost: 300.0,
                },
            ],
        }
    }

    #[test]
    fn no_path_draws_only_the_map() {
        let scene = render_path(Some(backdrop(1, 800.0, 600.0)), &markers(), None);
        assert_eq!(scene.size(), vec2(800.0, 600.0));
        assert_eq!(scene.cmds().len(), 2);
        assert_eq!(scene.lines().count(), 0);
    }

    #[test]
    fn fallback_size_before_map_loads() {
        let scene = render_path(None, &Markers::default(), None);
        assert_eq!(scene.size(), FALLBACK_MAP_SIZE);
        assert_eq!(
            scene.cmds(),
            &[DrawCmd::Fill {
                color: MAP_BACKGROUND
            }]
        );
    }

    #[test]
    fn path_overlay_order_and_placement() {
        let path = two_legs();
        let scene = render_path(Some(backdrop(1, 800.0, 600.0)), &markers(), Some(&path));
        let cmds = scene.cmds();
        assert_eq!(cmds.len(), 5);

        assert_eq!(
            cmds[2],
            DrawCmd::Image {
                texture: TextureId::Managed(2),
                rect: Rect::from_min_size(pos2(30.0, 144.0), vec2(70.0, 56.0)),
            }
        );
        assert_eq!(
            cmds[3],
            DrawCmd::Polyline {
                points: vec![pos2(100.0, 200.0), pos2(300.0, 200.0), pos2(300.0, 500.0)],
                width: PATH_WIDTH,
                color: PATH_COLOR,
            }
        );
        assert_eq!(
            cmds[4],
            DrawCmd::Image {
                texture: TextureId::Managed(3),
                rect: Rect::from_min_size(pos2(300.0, 350.0), vec2(150.0, 150.0)),
            }
        );
    }

    #[test]
    fn unloaded_markers_are_skipped() {
        let path = two_legs();
        let scene = render_path(None, &Markers::default(), Some(&path));
        assert_eq!(scene.images().count(), 0);
        assert_eq!(scene.lines().count(), 1);
    }

    #[test]
    fn rendering_twice_gives_the_same_scene() {
        let path = two_legs();
        let map = Some(backdrop(1, 800.0, 600.0));
        assert_eq!(
            render_path(map, &markers(), Some(&path)),
            render_path(map, &markers(), Some(&path))
        );
    }
}
