use std::sync::mpsc;
use std::time::Instant;

use quadview_core::catalog::Direction;
use quadview_core::config::ViewerConfig;
use quadview_core::interaction::ViewerKey;
use quadview_core::pipeline::{Applied, LoadStatus};
use quadview_core::viewer::{LoadRequest, Viewer};

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{GridState, UIState};
use crate::worker;

pub struct QuadviewApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub config: ViewerConfig,
    pub viewer: Viewer,
    pub grid: GridState,
    pub ui_state: UIState,
}

impl QuadviewApp {
    pub fn new(ctx: &egui::Context, config: ViewerConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        let app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            viewer: Viewer::new(&config),
            config,
            grid: GridState::default(),
            ui_state: UIState::default(),
        };
        app.send_command(WorkerCommand::SwitchSource {
            config: app.config.source.clone(),
        });
        app
    }

    /// Drain all pending results from the workers.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            let now = Instant::now();
            match result {
                WorkerResult::Sets { sets, source } => {
                    self.ui_state
                        .add_log(format!("Found {} image sets in {source}", sets.len()));
                    self.ui_state.source_label = source;
                    match self.viewer.set_catalog(sets, now) {
                        Some(request) => self.start_load(request),
                        None if self.viewer.catalog().is_empty() => self.grid.clear(),
                        None => {}
                    }
                }
                WorkerResult::SetsFailed { message } => {
                    self.ui_state
                        .add_log(format!("ERROR: could not list image sets: {message}"));
                    self.grid.clear();
                    self.viewer.set_catalog(Vec::new(), now);
                }
                WorkerResult::Load(event) => match self.viewer.apply(event, now) {
                    Applied::Pane(pane) => {
                        let slot = self.viewer.pipeline().slot(pane);
                        self.grid.update_texture(ctx, pane, slot);
                    }
                    Applied::Status => {
                        if let LoadStatus::Failed { .. } = self.viewer.status() {
                            self.ui_state.add_log(format!("ERROR: {}", self.viewer.status()));
                        }
                    }
                    Applied::Stale | Applied::Unchanged => {}
                },
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn apply_config(&mut self, config: ViewerConfig) {
        self.ui_state
            .add_log(format!("Config loaded, source: {}", config.source));
        self.viewer = Viewer::new(&config);
        self.grid.clear();
        self.send_command(WorkerCommand::SwitchSource {
            config: config.source.clone(),
        });
        self.config = config;
    }

    fn start_load(&mut self, request: LoadRequest) {
        self.grid.clear();
        self.send_command(WorkerCommand::LoadSet(request));
    }

    pub fn navigate(&mut self, direction: Direction) {
        if let Some(request) = self.viewer.navigate(direction, Instant::now()) {
            self.start_load(request);
        }
    }

    pub fn select_set(&mut self, index: usize) {
        if let Some(request) = self.viewer.select(index, Instant::now()) {
            self.start_load(request);
        }
    }

    pub fn reload_set(&mut self) {
        if let Some(request) = self.viewer.reload(Instant::now()) {
            self.start_load(request);
        }
    }

    pub fn refresh_sets(&mut self) {
        self.send_command(WorkerCommand::ListSets);
    }

    pub fn key(&mut self, key: ViewerKey) {
        if let Some(request) = self.viewer.key(key, Instant::now()) {
            self.start_load(request);
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for QuadviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);
        self.viewer.tick(Instant::now());

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::grid::show(ctx, self);

        // Trailing redraw of the throttle window.
        if let Some(deadline) = self.viewer.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About Quadview")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Quadview");
                        ui.label("Synchronized 2x2 image set viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
