use std::collections::VecDeque;

use eframe::egui;

/// Messages waiting to be acknowledged by the user, oldest first.
///
/// Only the front alert is shown; it blocks the rest of the window until
/// dismissed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Alerts {
    queue: VecDeque<String>,
}

impl Alerts {
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("alert: {message}");
        self.queue.push_back(message);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn front(&self) -> Option<&str> {
        self.queue.front().map(String::as_str)
    }

    pub fn dismiss(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    /// Show the front alert as a modal dialog.
    pub fn show(&mut self, ctx: &egui::Context) {
        let Some(message) = self.front().map(str::to_owned) else {
            return;
        };
        let remaining = self.len() - 1;
        let mut dismissed = false;

        let modal = egui::Modal::new(egui::Id::new("drawkit-alert")).show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(&message);
            if remaining > 0 {
                ui.weak(format!("{remaining} more"));
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

        if dismissed || modal.should_close() {
            self.dismiss();
        }
    }
}
