use eframe::egui::{Pos2, Vec2, pos2, vec2};

/// Largest dot radius, used while the grid is sparse.
const MAX_DOT_RADIUS: f32 = 4.0;
/// Largest edge stroke width.
const MAX_LINE_WIDTH: f32 = 4.0;

/// Pixel position of grid `index` along an axis of `axis_length` pixels.
///
/// Dots are spaced `axis_length / (grid_size + 1)` apart, so the first and
/// last dot keep one spacing of margin from the canvas border.
pub fn map_to_pixel(index: usize, axis_length: f32, grid_size: usize) -> f32 {
    axis_length / (grid_size + 1) as f32 * (index + 1) as f32
}

/// Grid dimensions and the canvas it is drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub size: usize,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl GridSpec {
    pub fn new(size: usize, canvas: Vec2) -> Self {
        Self {
            size,
            canvas_width: canvas.x,
            canvas_height: canvas.y,
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        vec2(self.canvas_width, self.canvas_height)
    }

    pub fn cell_position(&self, col: usize, row: usize) -> Pos2 {
        pos2(
            map_to_pixel(col, self.canvas_width, self.size),
            map_to_pixel(row, self.canvas_height, self.size),
        )
    }

    /// Every dot, column by column.
    pub fn dot_positions(&self) -> Vec<Pos2> {
        let mut out = Vec::with_capacity(self.size * self.size);
        for col in 0..self.size {
            for row in 0..self.size {
                out.push(self.cell_position(col, row));
            }
        }
        out
    }

    /// Shrinks once the grid is dense enough for dots to touch.
    pub fn dot_radius(&self) -> f32 {
        if self.size == 0 {
            return MAX_DOT_RADIUS;
        }
        MAX_DOT_RADIUS.min(100.0 / self.size as f32)
    }

    pub fn line_width(&self) -> f32 {
        if self.size == 0 {
            return MAX_LINE_WIDTH;
        }
        MAX_LINE_WIDTH.min(200.0 / self.size as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_follows_size_plus_one() {
        assert_eq!(map_to_pixel(0, 500.0, 4), 100.0);
        assert_eq!(map_to_pixel(3, 500.0, 4), 400.0);
        assert_eq!(map_to_pixel(0, 500.0, 0), 500.0);
    }

    #[test]
    fn positions_are_distinct_even_and_inside() {
        for size in 1..=60usize {
            for width in [1.0f32, 37.5, 500.0, 1234.0] {
                let xs: Vec<f32> = (0..size).map(|i| map_to_pixel(i, width, size)).collect();
                assert_eq!(xs.len(), size);
                assert!(xs.iter().all(|x| *x > 0.0 && *x < width), "size {size} width {width}");
                let step = width / (size + 1) as f32;
                for pair in xs.windows(2) {
                    assert!(pair[1] > pair[0]);
                    assert!(((pair[1] - pair[0]) - step).abs() < step * 1e-3);
                }
            }
        }
    }

    #[test]
    fn empty_grid_has_no_dots() {
        let grid = GridSpec::new(0, vec2(500.0, 500.0));
        assert!(grid.dot_positions().is_empty());
    }

    #[test]
    fn dot_positions_cover_the_grid() {
        let grid = GridSpec::new(3, vec2(400.0, 200.0));
        let dots = grid.dot_positions();
        assert_eq!(dots.len(), 9);
        assert_eq!(dots[0], pos2(100.0, 50.0));
        assert_eq!(dots[8], pos2(300.0, 150.0));
    }

    #[test]
    fn dense_grids_shrink_dots_and_lines() {
        assert_eq!(GridSpec::new(10, vec2(500.0, 500.0)).dot_radius(), 4.0);
        assert_eq!(GridSpec::new(50, vec2(500.0, 500.0)).dot_radius(), 2.0);
        assert_eq!(GridSpec::new(50, vec2(500.0, 500.0)).line_width(), 4.0);
        assert_eq!(GridSpec::new(100, vec2(500.0, 500.0)).line_width(), 2.0);
    }
}
