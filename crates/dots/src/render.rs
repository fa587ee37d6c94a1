use drawkit::{Backdrop, DrawCmd, Scene};
use eframe::egui::{Color32, Rect, pos2};

use crate::color::parse_css_color;
use crate::edges::ParsedEdges;
use crate::geometry::GridSpec;

pub const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(0x1E, 0x1E, 0x1E);
pub const DOT_COLOR: Color32 = Color32::WHITE;

/// Build the canvas for one redraw: background, dots, then edges.
///
/// When the edge pass aborted the edge layer is left out as a whole.
pub fn render_grid(grid: &GridSpec, edges: &ParsedEdges, background: Option<Backdrop>) -> Scene {
    let mut scene = Scene::new(grid.canvas_size());

    scene.push(DrawCmd::Fill {
        color: CANVAS_BACKGROUND,
    });

    if let Some(bg) = background {
        scene.push(DrawCmd::Image {
            texture: bg.texture,
            rect: Rect::from_min_size(pos2(0.0, 0.0), bg.size),
        });
    }

    let radius = grid.dot_radius();
    for center in grid.dot_positions() {
        scene.push(DrawCmd::Dot {
            center,
            radius,
            color: DOT_COLOR,
        });
    }

    let width = grid.line_width();
    for edge in edges.drawable() {
        let Some(color) = parse_css_color(&edge.color) else {
            tracing::trace!("skipping edge with unknown color {:?}", edge.color);
            continue;
        };
        scene.push(DrawCmd::Line {
            from: grid.cell_position(edge.start_col, edge.start_row),
            to: grid.cell_position(edge.end_col, edge.end_row),
            width,
            color,
        });
    }

    scene
}
