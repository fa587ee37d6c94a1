use eframe::egui::{self, Color32, Pos2, Rect, Stroke, TextureId, Vec2};

/// A single draw call in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole canvas (the "clear" step).
    Fill { color: Color32 },
    /// Draw a loaded texture into `rect`.
    Image { texture: TextureId, rect: Rect },
    /// A filled circle.
    Dot {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    /// A straight stroke between two points.
    Line {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
    /// A connected stroke through every point in order.
    Polyline {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
    },
}

/// Ordered draw commands for a canvas of a fixed logical size.
///
/// Later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    size: Vec2,
    cmds: Vec<DrawCmd>,
}

impl Scene {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            cmds: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn dots(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Dot { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Line { .. } | DrawCmd::Polyline { .. }))
    }

    pub fn images(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Image { .. }))
    }
}

/// Largest rect with the scene's aspect ratio that fits centered in `available`.
pub fn fit_rect(scene_size: Vec2, available: Rect) -> Rect {
    if scene_size.x <= 0.0 || scene_size.y <= 0.0 {
        return Rect::from_min_size(available.min, Vec2::ZERO);
    }
    let scale = (available.width() / scene_size.x).min(available.height() / scene_size.y);
    let size = scene_size * scale;
    Rect::from_center_size(available.center(), size)
}

/// Paint `scene` scaled uniformly into `target`.
///
/// `target` should already have the scene's aspect ratio (see [`fit_rect`]).
pub fn paint(painter: &egui::Painter, scene: &Scene, target: Rect) {
    let size = scene.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let scale = target.width() / size.x;
    let to_screen = |p: Pos2| target.min + p.to_vec2() * scale;
    let painter = painter.with_clip_rect(target);
    let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

    for cmd in scene.cmds() {
        match cmd {
            DrawCmd::Fill { color } => {
                painter.rect_filled(target, 0.0, *color);
            }
            DrawCmd::Image { texture, rect } => {
                let screen = Rect::from_min_max(to_screen(rect.min), to_screen(rect.max));
                painter.image(*texture, screen, uv, Color32::WHITE);
            }
            DrawCmd::Dot {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(to_screen(*center), radius * scale, *color);
            }
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => {
                painter.line_segment(
                    [to_screen(*from), to_screen(*to)],
                    Stroke::new(width * scale, *color),
                );
            }
            DrawCmd::Polyline {
                points,
                width,
                color,
            } => {
                if points.len() < 2 {
                    continue;
                }
                let screen: Vec<Pos2> = points.iter().map(|p| to_screen(*p)).collect();
                painter.add(egui::Shape::line(
                    screen,
                    Stroke::new(width * scale, *color),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_rect_keeps_aspect_and_centers() {
        let available = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 200.0));
        let fitted = fit_rect(egui::vec2(100.0, 100.0), available);
        assert_eq!(fitted.size(), egui::vec2(200.0, 200.0));
        assert_eq!(fitted.center(), available.center());
    }

    #[test]
    fn fit_rect_scales_down_wide_scenes() {
        let available = Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(300.0, 300.0));
        let fitted = fit_rect(egui::vec2(600.0, 300.0), available);
        assert_eq!(fitted.size(), egui::vec2(300.0, 150.0));
    }

    #[test]
    fn fit_rect_of_empty_scene_is_empty() {
        let available = Rect::from_min_size(egui::pos2(5.0, 5.0), egui::vec2(300.0, 300.0));
        let fitted = fit_rect(Vec2::ZERO, available);
        assert_eq!(fitted.size(), Vec2::ZERO);
    }

    #[test]
    fn scene_filters_by_kind() {
        let mut scene = Scene::new(egui::vec2(10.0, 10.0));
        scene.push(DrawCmd::Fill {
            color: Color32::BLACK,
        });
        scene.push(DrawCmd::Dot {
            center: egui::pos2(1.0, 1.0),
            radius: 2.0,
            color: Color32::WHITE,
        });
        scene.push(DrawCmd::Line {
            from: egui::pos2(1.0, 1.0),
            to: egui::pos2(2.0, 2.0),
            width: 1.0,
            color: Color32::RED,
        });
        assert_eq!(scene.cmds().len(), 3);
        assert_eq!(scene.dots().count(), 1);
        assert_eq!(scene.lines().count(), 1);
        assert_eq!(scene.images().count(), 0);
    }
}
