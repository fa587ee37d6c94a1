use drawkit::pending::{self, Pending};
use drawkit::scene;
use drawkit::{ImageSlot, SlotEvent};
use eframe::egui;

use crate::client::{Client, FetchResult};
use crate::model::{BuildingCatalog, PathResult};
use crate::render::{self, Markers};
use crate::state::{Effect, Event, ViewState};

pub struct LaunchOptions {
    pub base_url: String,
    pub campus_map: String,
    pub start_marker: String,
    pub destination_marker: String,
    pub windowed: bool,
}

struct CampusApp {
    client: Client,
    state: ViewState,
    map: ImageSlot,
    start_marker: ImageSlot,
    destination_marker: ImageSlot,
    catalog_job: Option<Pending<FetchResult<BuildingCatalog>>>,
    /// Every unanswered findPath request, oldest first.
    path_jobs: Vec<Pending<FetchResult<PathResult>>>,
}

/// Result of a finished request, or a network error if its worker died.
fn settle<T>(job: &mut Pending<FetchResult<T>>) -> Option<FetchResult<T>> {
    match job.try_take() {
        Some(result) => Some(result),
        None if job.is_done() => Some(FetchResult::NetworkError(
            "the request was interrupted".to_string(),
        )),
        None => None,
    }
}

impl CampusApp {
    fn new(ctx: &egui::Context, options: LaunchOptions) -> Self {
        tracing::info!("Using path service at {}", options.base_url);
        let mut app = Self {
            client: Client::new(&options.base_url),
            state: ViewState::default(),
            map: ImageSlot::load(ctx, &options.campus_map),
            start_marker: ImageSlot::load(ctx, &options.start_marker),
            destination_marker: ImageSlot::load(ctx, &options.destination_marker),
            catalog_job: None,
            path_jobs: Vec::new(),
        };
        app.dispatch(ctx, Event::Started);
        app
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: Event) {
        tracing::trace!("{event:?}");
        if let Some(effect) = self.state.reduce(event) {
            self.execute(ctx, effect);
        }
    }

    fn execute(&mut self, ctx: &egui::Context, effect: Effect) {
        let client = self.client.clone();
        match effect {
            Effect::FetchCatalog => {
                self.catalog_job = Some(pending::spawn(Some(ctx.clone()), move || {
                    client.list_buildings()
                }));
            }
            Effect::FetchPath { start, end } => {
                tracing::debug!("requesting path {start} -> {end}");
                self.path_jobs.push(pending::spawn(Some(ctx.clone()), move || {
                    client.find_path(&start, &end)
                }));
            }
        }
    }

    fn poll_jobs(&mut self, ctx: &egui::Context) {
        if let Some(job) = self.catalog_job.as_mut() {
            if let Some(result) = settle(job) {
                self.catalog_job = None;
                self.dispatch(ctx, Event::CatalogLoaded(result));
            }
        }

        let mut arrived = Vec::new();
        self.path_jobs.retain_mut(|job| match settle(job) {
            Some(result) => {
                arrived.push(result);
                false
            }
            None => true,
        });
        for result in arrived {
            self.dispatch(ctx, Event::PathLoaded(result));
        }
    }

    fn poll_images(&mut self, ctx: &egui::Context) {
        for (label, slot) in [
            ("campus map", &mut self.map),
            ("start marker", &mut self.start_marker),
            ("destination marker", &mut self.destination_marker),
        ] {
            match slot.poll(ctx) {
                SlotEvent::Loaded => tracing::debug!("{label} ready"),
                SlotEvent::Failed(msg) => {
                    tracing::debug!("{label} unavailable: {msg}");
                }
                SlotEvent::Idle => {}
            }
        }
    }

    fn building_picker(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        catalog: Option<&BuildingCatalog>,
        hint: Option<&str>,
        selected: &Option<String>,
    ) -> Option<Option<String>> {
        let shown = match (selected, catalog) {
            (Some(short), Some(catalog)) => catalog.long_name(short).unwrap_or(short).to_string(),
            (Some(short), None) => short.clone(),
            (None, _) => format!("Select {label}"),
        };

        let mut choice = None;
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(shown)
            .width(260.0)
            .show_ui(ui, |ui| {
                let Some(catalog) = catalog else {
                    ui.weak(hint.unwrap_or_default());
                    return;
                };
                for (short, long) in catalog.iter() {
                    let is_selected = selected.as_deref() == Some(short);
                    if ui.selectable_label(is_selected, long).clicked() && !is_selected {
                        choice = Some(Some(short.to_string()));
                    }
                }
            });
        choice
    }

    fn draw_controls(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let catalog = self.state.catalog.as_ref();
        let hint = self.state.catalog_hint();
        let start = Self::building_picker(ui, "start", "START", catalog, hint, &self.state.start);
        ui.add_space(6.0);
        let end = Self::building_picker(ui, "end", "END", catalog, hint, &self.state.end);

        if let Some(name) = start {
            self.dispatch(ctx, Event::StartSelected(name));
        }
        if let Some(name) = end {
            self.dispatch(ctx, Event::EndSelected(name));
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("FIND PATH").clicked() {
                self.dispatch(ctx, Event::FindPath);
            }
            if ui.button("RESET").clicked() {
                self.dispatch(ctx, Event::Reset);
            }
            if self.state.is_busy() {
                ui.spinner();
            }
        });

        ui.add_space(10.0);
        match &self.state.path {
            Some(path) => ui.label(format!("Total cost: {:.3}", path.total_cost())),
            None => ui.weak("No path drawn"),
        };
    }

    fn draw_map(&self, ui: &mut egui::Ui) {
        let markers = Markers {
            start: self.start_marker.backdrop(),
            destination: self.destination_marker.backdrop(),
        };
        let scene = render::render_path(self.map.backdrop(), &markers, self.state.path.as_ref());
        let available = ui.available_rect_before_wrap();
        ui.allocate_rect(available, egui::Sense::hover());
        scene::paint(ui.painter(), &scene, scene::fit_rect(scene.size(), available));
    }
}

impl eframe::App for CampusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_images(ctx);
        self.poll_jobs(ctx);

        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.heading("Campus Paths");
        });

        egui::SidePanel::left("controls")
            .resizable(false)
            .show(ctx, |ui| {
                self.draw_controls(ctx, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_map(ui);
        });

        self.state.alerts.show(ctx);
    }
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("Campus Paths")
    } else {
        egui::ViewportBuilder::default()
            .with_maximized(true)
            .with_title("Campus Paths")
    };

    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "campuspaths",
        native,
        Box::new(move |cc| Ok(Box::new(CampusApp::new(&cc.egui_ctx, options)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
