use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use drawkit::scene;
use drawkit::{ImageSlot, SlotEvent};
use eframe::egui;

use crate::render;
use crate::state::{DotsState, Event};

/// Set once the screenshot has been written, or has failed to be.
type Outcome = Arc<Mutex<Option<Result<()>>>>;

struct ExportApp {
    state: DotsState,
    background: ImageSlot,
    output: PathBuf,
    outcome: Outcome,
    screenshot_requested: bool,
    done: bool,
}

impl ExportApp {
    fn new(
        ctx: &egui::Context,
        state: DotsState,
        background: Option<&str>,
        output: PathBuf,
        outcome: Outcome,
    ) -> Self {
        let background = match background {
            Some(source) => ImageSlot::load(ctx, source),
            None => ImageSlot::Empty,
        };
        Self {
            state,
            background,
            output,
            outcome,
            screenshot_requested: false,
            done: false,
        }
    }
}

impl eframe::App for ExportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.done {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if let SlotEvent::Failed(msg) = self.background.poll(ctx) {
            tracing::warn!("exporting without background: {msg}");
        }

        let saved = ctx.input(|i| {
            i.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(save_color_image(image, &self.output)),
                _ => None,
            })
        });
        if let Some(result) = saved {
            if let Ok(mut outcome) = self.outcome.lock() {
                *outcome = Some(result);
            }
            self.done = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let scene = render::render_grid(
                    &self.state.grid(),
                    &self.state.parsed,
                    self.background.backdrop(),
                );
                scene::paint(ui.painter(), &scene, scene::fit_rect(scene.size(), rect));
            });

        // Wait for the background so it ends up in the picture.
        if !self.screenshot_requested && !self.background.is_loading() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
        }

        ctx.request_repaint();
    }
}

fn save_color_image(image: &egui::ColorImage, path: &Path) -> Result<()> {
    let width = image.width() as u32;
    let height = image.height() as u32;
    let pixels: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| [c.r(), c.g(), c.b(), c.a()])
        .collect();

    image::save_buffer(path, &pixels, width, height, image::ColorType::Rgba8)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    tracing::info!("Saved {}", path.display());
    Ok(())
}

pub fn run(
    grid_size: usize,
    edges: Option<String>,
    background: Option<String>,
    output: PathBuf,
    canvas: f32,
) -> Result<()> {
    let mut state = DotsState::new(grid_size, egui::vec2(canvas, canvas));
    if let Some(text) = edges {
        state.reduce(Event::EdgeTextEdited(text));
        state.reduce(Event::Draw);
    }
    for message in state.alerts.iter() {
        tracing::warn!("{message}");
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(
        "Exporting {0}x{0} grid to {1} ({canvas}px)",
        grid_size,
        output.display()
    );

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([canvas, canvas])
        .with_title("dots export")
        .with_decorations(false);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let outcome: Outcome = Arc::new(Mutex::new(None));
    let app_outcome = Arc::clone(&outcome);
    eframe::run_native(
        "dots export",
        options,
        Box::new(move |cc| {
            Ok(Box::new(ExportApp::new(
                &cc.egui_ctx,
                state,
                background.as_deref(),
                output,
                app_outcome,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    finish(&outcome)
}

/// Turn what the export window recorded into the command's result.
fn finish(outcome: &Outcome) -> Result<()> {
    let mut guard = outcome
        .lock()
        .map_err(|_| anyhow::anyhow!("export window panicked"))?;
    match guard.take() {
        Some(result) => result,
        None => anyhow::bail!("Export window closed before the image was captured"),
    }
}
