use drawkit::scene;
use drawkit::{ImageSlot, SlotEvent};
use eframe::egui;

use crate::render;
use crate::state::{DotsState, Event};

pub struct LaunchOptions {
    pub grid_size: usize,
    pub canvas: f32,
    pub background: String,
    pub edges: Option<String>,
    pub windowed: bool,
}

struct DotsApp {
    state: DotsState,
    /// Contents of the grid size field as typed.
    size_field: String,
    background: ImageSlot,
}

impl DotsApp {
    fn new(ctx: &egui::Context, options: LaunchOptions) -> Self {
        let canvas = egui::vec2(options.canvas, options.canvas);
        let mut state = DotsState::new(options.grid_size, canvas);
        if let Some(text) = options.edges {
            state.reduce(Event::EdgeTextEdited(text));
            state.reduce(Event::Draw);
        }
        Self {
            size_field: state.grid_size.to_string(),
            state,
            background: ImageSlot::load(ctx, &options.background),
        }
    }

    fn dispatch(&mut self, event: Event) {
        tracing::trace!("{event:?}");
        self.state.reduce(event);
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Grid size:");
            let field = ui.add(egui::TextEdit::singleline(&mut self.size_field).desired_width(60.0));
            if field.changed() {
                let text = self.size_field.clone();
                self.dispatch(Event::SizeEntered(text));
            }
        });

        ui.add_space(8.0);
        ui.label("Edges");
        let mut draft = self.state.draft.clone();
        let area = ui.add(
            egui::TextEdit::multiline(&mut draft)
                .desired_rows(5)
                .desired_width(240.0)
                .hint_text("0,0 1,1 red")
                .code_editor(),
        );
        if area.changed() {
            self.dispatch(Event::EdgeTextEdited(draft));
        }

        ui.horizontal(|ui| {
            if ui.button("Draw").clicked() {
                self.dispatch(Event::Draw);
            }
            if ui.button("Clear").clicked() {
                self.dispatch(Event::Clear);
            }
        });
    }

    fn draw_canvas(&self, ui: &mut egui::Ui) {
        let scene = render::render_grid(
            &self.state.grid(),
            &self.state.parsed,
            self.background.backdrop(),
        );
        let available = ui.available_rect_before_wrap();
        let target = scene::fit_rect(scene.size(), available);
        ui.allocate_rect(available, egui::Sense::hover());
        scene::paint(ui.painter(), &scene, target);
    }
}

impl eframe::App for DotsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.background.poll(ctx) {
            SlotEvent::Loaded => tracing::debug!("background ready, redrawing"),
            SlotEvent::Failed(msg) => tracing::debug!("drawing without background: {msg}"),
            SlotEvent::Idle => {}
        }

        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.heading("Connect the Dots!");
        });

        egui::SidePanel::left("controls")
            .resizable(false)
            .show(ctx, |ui| {
                self.draw_controls(ui);
                ui.add_space(12.0);
                ui.label(format!("Current Grid Size: {}", self.state.grid_size));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        self.state.alerts.show(ctx);
    }
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let side = options.canvas;
    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([side + 300.0, side + 80.0])
            .with_title("Connect the Dots!")
    } else {
        egui::ViewportBuilder::default()
            .with_maximized(true)
            .with_title("Connect the Dots!")
    };

    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "dots",
        native,
        Box::new(move |cc| Ok(Box::new(DotsApp::new(&cc.egui_ctx, options)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
