use crate::config::MAX_TICK_HZ;
use crate::state::Scene;
use egui::Ui;

/// Settings the overlay edits; the stage applies them after each frame.
pub struct DebugMenu {
    pub open: bool,
    pub tick_hz: f64,
    pub muted: bool,
    /// Set by the Step button, the stage runs the tick so bounce sounds play.
    pub step_requested: bool,
}

impl DebugMenu {
    pub fn new(tick_hz: f64) -> Self {
        DebugMenu {
            open: true,
            tick_hz,
            muted: false,
            step_requested: false,
        }
    }

    pub fn take_step_request(&mut self) -> bool {
        std::mem::take(&mut self.step_requested)
    }
}

pub trait SceneDebugMenu {
    fn render_ui(&mut self, ui: &mut Ui, menu: &mut DebugMenu);
}

impl SceneDebugMenu for Scene {
    fn render_ui(&mut self, ui: &mut Ui, menu: &mut DebugMenu) {
        let status = if self.is_running() { "running" } else { "paused" };
        ui.label(format!("{} - tick {}", status, self.ticks()));
        ui.label(format!(
            "container {}x{}, bounds {}x{}",
            self.container().w,
            self.container().h,
            self.bounds().max_x(),
            self.bounds().max_y()
        ));

        ui.horizontal(|ui| {
            let label = if self.is_running() { "Pause" } else { "Start" };
            if ui.button(label).clicked() {
                self.toggle_running();
            }
            if ui
                .add_enabled(!self.is_running(), egui::Button::new("Step"))
                .clicked()
            {
                menu.step_requested = true;
            }
            if ui.button("Reset").clicked() {
                self.reset();
            }
            if ui.button("Spawn").clicked() {
                if let Err(err) = self.spawn_random(&mut rand::rng()) {
                    log::warn!("spawn rejected: {}", err);
                }
            }
        });

        ui.add(
            egui::Slider::new(&mut menu.tick_hz, 1.0..=MAX_TICK_HZ)
                .logarithmic(true)
                .clamping(egui::SliderClamping::Never)
                .text("ticks/s"),
        );
        ui.add(egui::Checkbox::new(&mut menu.muted, "Mute"));

        ui.separator();
        ui.label(format!("Bouncers: {}", self.bouncers().len()));

        egui::ScrollArea::vertical()
            .max_height(200.0)
            .show(ui, |ui| {
                egui::Grid::new("bouncers").striped(true).show(ui, |ui| {
                    ui.label("pos");
                    ui.label("vel");
                    ui.label("bounces");
                    ui.end_row();
                    for bouncer in self.bouncers() {
                        let pos = bouncer.pos();
                        let vel = bouncer.vel();
                        ui.label(format!("({}, {})", pos.x, pos.y));
                        ui.label(format!("({}, {})", vel.dx, vel.dy));
                        ui.label(bouncer.bounces().to_string());
                        ui.end_row();
                    }
                });
            });
    }
}
