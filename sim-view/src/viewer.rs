//! Interactive growth viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`Simulation`] and
//! implements [`eframe::App`] to render it as lines and circles and to
//! expose its parameters through an egui UI.

use eframe::App;
use glam::Vec2;
use rand::rngs::StdRng;
use sim_core::{
    config::GrowthConfig,
    error::SimError,
    simulation::{Frame, Simulation},
};
use tracing::{info, warn};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(15, 18, 20);
const NODE_FILL: egui::Color32 = egui::Color32::from_rgb(210, 210, 220);
const SEGMENT_WIDTH: f32 = 2.0;

fn segment_color() -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(180, 180, 190, 150)
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`Simulation`] and the [`Frame`] it last produced.
/// - An editable copy of the [`GrowthConfig`], pushed into the simulation
///   whenever it validates.
/// - eframe/egui callbacks for drawing and user interaction.
///
/// Simulation coordinates are canvas pixels measured from the canvas'
/// top-left corner, so the seed lands on the canvas center.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions. A press on the canvas or a change of canvas
///    size reseeds the graph.
/// 2. If `running` is `true` and enough time has passed, call [`Viewer::step_once`].
/// 3. Render the last frame: segments first, nodes on top.
///
/// ### Fields
/// - `sim` - The simulation being grown.
/// - `frame` - Snapshot returned by the last step or reset.
/// - `cfg` - Parameters as edited in the side panel.
/// - `cfg_error` - Why `cfg` was last rejected, shown in the side panel.
///
/// - `canvas_size` - Canvas size seen on the previous frame.
/// - `running` - Whether the simulation is currently auto-advancing.
///
/// - `step_interval` - Target time between automatic steps (seconds).
/// - `last_step_time` - Time stamp of the last step (egui time).
/// - `last_step_dt` - Actual time delta between the last two steps (for display only).
pub struct Viewer {
    sim: Simulation<StdRng>,
    frame: Frame,
    cfg: GrowthConfig,
    cfg_error: Option<String>,

    canvas_size: Option<egui::Vec2>,
    running: bool,

    step_interval: f64,
    last_step_time: f64,
    last_step_dt: f64,
}

impl Viewer {
    /// Creates a viewer around an uninitialized simulation.
    ///
    /// The graph is seeded on the first frame, once the canvas size (and
    /// therefore its center) is known. The simulation starts running.
    pub fn new(cfg: GrowthConfig, rng: StdRng) -> Result<Self, SimError> {
        Ok(Self {
            sim: Simulation::new(cfg, rng)?,
            frame: Frame::default(),
            cfg,
            cfg_error: None,
            canvas_size: None,
            running: true,
            step_interval: 1.0 / 60.0,
            last_step_time: 0.0,
            last_step_dt: 0.0,
        })
    }

    /// Reseeds the graph in the middle of the current canvas.
    fn restart(&mut self) {
        let center = self
            .canvas_size
            .map(|s| Vec2::new(s.x, s.y) / 2.0)
            .unwrap_or(Vec2::ZERO);
        self.sim.reset(center);
        self.frame = self.sim.frame();
        info!(x = center.x, y = center.y, "restarted growth");
    }

    /// Records the canvas size for this frame, reseeding the graph if it
    /// is the first frame or the size changed.
    ///
    /// ### Returns
    /// `true` if the graph was reseeded.
    fn sync_canvas(&mut self, size: egui::Vec2) -> bool {
        if self.canvas_size == Some(size) {
            return false;
        }
        self.canvas_size = Some(size);
        self.restart();
        true
    }

    /// Pushes the edited configuration into the simulation if it is valid.
    fn apply_config(&mut self) {
        match self.sim.set_config(self.cfg) {
            Ok(()) => self.cfg_error = None,
            Err(e) => {
                warn!(error = %e, "rejected config edit");
                self.cfg_error = Some(e.to_string());
            }
        }
    }

    /// Advances the simulation by a single tick and keeps its snapshot.
    fn step_once(&mut self) {
        match self.sim.step() {
            Ok(frame) => self.frame = frame,
            Err(e) => warn!(error = %e, "step skipped"),
        }
    }

    /// Converts a simulation position to screen-space inside `rect`.
    fn to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed))
                .changed()
        })
        .inner
    }

    /// Builds the top panel UI (run controls, stepping, reset).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("dt target = ")
                        .range(0.0..=1.0)
                        .speed(0.005),
                );

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Reset").clicked() {
                    self.restart();
                }
            });
        });
    }

    /// Builds the bottom status bar (tick, node and segment counts).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                ui.label(format!("segments = {}", self.frame.segments.len()));
                ui.label(format!(
                    "nodes = {} / {}",
                    self.frame.nodes.len(),
                    self.sim.config().max_nodes
                ));
                ui.label(format!("tick = {}", self.sim.tick()));
            });
        });
    }

    /// Builds the right-hand configuration panel for growth parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");
                let cfg = &mut self.cfg;
                let mut changed = false;

                ui.separator();
                ui.label("Growth");
                changed |=
                    Self::labeled_drag_usize(ui, "max_nodes:", &mut cfg.max_nodes, 2..=2000, 1.0);
                changed |= Self::labeled_drag_f32(
                    ui,
                    "growth_chance:",
                    &mut cfg.growth_chance,
                    0.0..=1.0,
                    0.001,
                );
                changed |=
                    Self::labeled_drag_f32(ui, "growth_rate:", &mut cfg.growth_rate, 0.0..=5.0, 0.01);
                changed |= Self::labeled_drag_f32(
                    ui,
                    "branch_length:",
                    &mut cfg.initial_branch_length,
                    0.1..=100.0,
                    0.1,
                );

                ui.separator();
                ui.label("Sizing");
                changed |= Self::labeled_drag_f32(
                    ui,
                    "size_multiplier:",
                    &mut cfg.node_size_multiplier,
                    0.01..=10.0,
                    0.01,
                );
                changed |=
                    Self::labeled_drag_f32(ui, "min_radius:", &mut cfg.min_radius, 0.1..=50.0, 0.1);
                changed |= Self::labeled_drag_f32(
                    ui,
                    "initial_radius:",
                    &mut cfg.initial_radius,
                    0.1..=50.0,
                    0.1,
                );

                ui.separator();
                ui.label("Physics");
                changed |= Self::labeled_drag_f32(
                    ui,
                    "repulsion:",
                    &mut cfg.repulsion_force,
                    0.01..=1.0,
                    0.01,
                );
                changed |= Self::labeled_drag_f32(
                    ui,
                    "attraction:",
                    &mut cfg.attraction_force,
                    0.01..=1.0,
                    0.01,
                );
                changed |= Self::labeled_drag_usize(
                    ui,
                    "iterations:",
                    &mut cfg.physics_iterations,
                    1..=32,
                    1.0,
                );

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    *cfg = GrowthConfig::default();
                    changed = true;
                }

                if changed {
                    self.apply_config();
                }
                if let Some(err) = &self.cfg_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
    }

    /// Builds the central panel where the graph is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(BACKGROUND))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::click());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                // A new or resized canvas reseeds on its center.
                self.sync_canvas(rect.size());

                // Any press on the canvas restarts the growth.
                if response.hovered() && ui.input(|i| i.pointer.primary_pressed()) {
                    self.restart();
                }

                // Auto-run simulation if requested.
                if self.running {
                    let now = ctx.input(|i| i.time);
                    let elapsed = now - self.last_step_time;
                    if elapsed >= self.step_interval {
                        if self.last_step_time > 0.0 {
                            self.last_step_dt = elapsed;
                        }
                        self.step_once();
                        self.last_step_time = now;
                    }

                    ctx.request_repaint();
                }

                // Segments first so the circles sit on top of them.
                let stroke = egui::Stroke::new(SEGMENT_WIDTH, segment_color());
                for s in &self.frame.segments {
                    let a = Self::to_screen(Vec2::new(s.ax, s.ay), rect);
                    let b = Self::to_screen(Vec2::new(s.bx, s.by), rect);
                    painter.line_segment([a, b], stroke);
                }

                for n in &self.frame.nodes {
                    let p = Self::to_screen(Vec2::new(n.x, n.y), rect);
                    painter.circle_filled(p, n.radius, NODE_FILL);
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
