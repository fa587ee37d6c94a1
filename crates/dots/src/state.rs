use drawkit::alert::Alerts;
use eframe::egui::Vec2;

use crate::edges::{self, ParsedEdges};
use crate::geometry::GridSpec;

/// Largest accepted grid size.
pub const MAX_GRID_SIZE: usize = 200;
pub const DEFAULT_GRID_SIZE: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Raw text from the grid size field.
    SizeEntered(String),
    /// The edge text area changed.
    EdgeTextEdited(String),
    /// The Draw button: commit the text area.
    Draw,
    /// The Clear button: back to an empty edge list.
    Clear,
}

/// Everything the dots view shows, derived only from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct DotsState {
    pub grid_size: usize,
    pub canvas: Vec2,
    /// Text area contents, not yet drawn.
    pub draft: String,
    /// Text of the last Draw.
    pub committed: String,
    /// `committed` parsed against `grid_size`.
    pub parsed: ParsedEdges,
    pub alerts: Alerts,
}

impl DotsState {
    pub fn new(grid_size: usize, canvas: Vec2) -> Self {
        Self {
            grid_size,
            canvas,
            draft: String::new(),
            committed: String::new(),
            parsed: ParsedEdges::default(),
            alerts: Alerts::default(),
        }
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.grid_size, self.canvas)
    }

    pub fn reduce(&mut self, event: Event) {
        match event {
            Event::SizeEntered(text) => {
                // Anything that is not a number means an empty grid.
                let size = text.trim().parse::<usize>().unwrap_or(0);
                if size > MAX_GRID_SIZE {
                    self.alerts
                        .push(format!("Grid size must be at most {MAX_GRID_SIZE}."));
                } else if size != self.grid_size {
                    self.grid_size = size;
                    self.reparse();
                }
            }
            Event::EdgeTextEdited(text) => {
                self.draft = text;
            }
            Event::Draw => {
                self.committed = self.draft.clone();
                self.reparse();
            }
            Event::Clear => {
                self.draft.clear();
                self.committed.clear();
                self.parsed = ParsedEdges::default();
            }
        }
    }

    /// Parse the committed text again and queue its problems as alerts.
    fn reparse(&mut self) {
        self.parsed = edges::parse(&self.committed, self.grid_size);
        for message in self.parsed.messages() {
            self.alerts.push(message);
        }
    }
}
