use anyhow::Context;
use clap::Parser;
use miniquad::{EventHandler, KeyCode, KeyMods, MouseButton, conf, date, window};
use std::path::PathBuf;

mod camera;
mod config;
mod debug_menu;
mod physics;
mod render;
mod sound_handler;
mod state;
mod ticker;

use crate::camera::Camera;
use crate::config::Config;
use crate::debug_menu::{DebugMenu, SceneDebugMenu};
use crate::render::Renderer;
use crate::sound_handler::SoundHandler;
use crate::state::{Pos, Scene, random_diagonal};
use crate::ticker::Ticker;

#[derive(Parser, Debug)]
#[command(name = "bouncing-me", about = "A box bouncing around inside a window")]
struct Cli {
    /// JSON config file, defaults are used when it does not exist
    #[arg(long, default_value = "bouncing-me.json")]
    config: PathBuf,

    /// Write the default config to --config and exit
    #[arg(long)]
    write_default_config: bool,

    /// Start moving without waiting for a click
    #[arg(long)]
    autostart: bool,

    /// Resize the container with the window
    #[arg(long)]
    follow_window: bool,

    #[arg(long)]
    tick_hz: Option<f64>,
}

struct Stage {
    scene: Scene,
    renderer: Renderer,
    camera: Camera,
    egui_mq: egui_miniquad::EguiMq,
    debug_menu: DebugMenu,
    sounds: SoundHandler,
    ticker: Ticker,
    follow_window: bool,
    last_time: f64,
}

impl Stage {
    fn new(config: Config, mut scene: Scene) -> Stage {
        let mut renderer = Renderer::new(config.object.sprite.as_deref());
        let egui_mq = egui_miniquad::EguiMq::new(&mut *renderer.ctx);

        let (w, h) = window::screen_size();
        log::info!("window is {}x{}", w, h);
        let mut camera = Camera::new(w, h);

        if config.follow_window {
            if let Err(err) = scene.set_container(w as i32, h as i32) {
                log::warn!("keeping configured container: {}", err);
            }
        }
        camera.fit_container(scene.container());

        if config.autostart {
            scene.start();
        }

        let ticker = Ticker::new(config.tick_hz, config.max_ticks_per_frame);
        let debug_menu = DebugMenu::new(ticker.tick_hz());

        Stage {
            scene,
            renderer,
            camera,
            egui_mq,
            debug_menu,
            sounds: SoundHandler::new(&config.sounds_dir),
            ticker,
            follow_window: config.follow_window,
            last_time: date::now(),
        }
    }

    fn step_once(&mut self) {
        let bounces = self.scene.step_once();
        self.sounds.play_bounces(&bounces);
    }
}

impl EventHandler for Stage {
    fn update(&mut self) {
        let now = date::now();
        let dt = now - self.last_time;
        self.last_time = now;

        if !self.scene.is_running() {
            self.ticker.reset();
            return;
        }

        let mut bounces = vec![];
        for _ in 0..self.ticker.advance(dt) {
            bounces.extend(self.scene.update());
        }
        self.sounds.play_bounces(&bounces);
    }

    fn draw(&mut self) {
        self.renderer.draw(&self.scene, &self.camera);

        let scene = &mut self.scene;
        let debug_menu = &mut self.debug_menu;
        self.egui_mq.run(&mut *self.renderer.ctx, |_mq_ctx, egui_ctx| {
            if debug_menu.open {
                egui::Window::new("Bouncing Me").show(egui_ctx, |ui| {
                    scene.render_ui(ui, debug_menu);
                });
            }
        });
        self.egui_mq.draw(&mut *self.renderer.ctx);
        self.renderer.ctx.commit_frame();

        if self.debug_menu.take_step_request() {
            self.step_once();
        }
        self.ticker.set_tick_hz(self.debug_menu.tick_hz);
        self.sounds.muted = self.debug_menu.muted;
    }

    fn resize_event(&mut self, width: f32, height: f32) {
        self.camera.on_resize(width, height);
        if self.follow_window {
            if let Err(err) = self.scene.set_container(width as i32, height as i32) {
                log::warn!("resize to {}x{} rejected: {}", width, height, err);
            }
        }
        self.camera.fit_container(self.scene.container());
    }

    fn mouse_motion_event(&mut self, x: f32, y: f32) {
        self.egui_mq.mouse_motion_event(x, y);
    }

    fn mouse_wheel_event(&mut self, dx: f32, dy: f32) {
        self.egui_mq.mouse_wheel_event(dx, dy);
    }

    fn mouse_button_down_event(&mut self, button: MouseButton, x: f32, y: f32) {
        self.egui_mq.mouse_button_down_event(button, x, y);
        if self.egui_mq.egui_ctx().wants_pointer_input() {
            return;
        }

        let at = self.camera.screen_to_container(x, y);
        match button {
            MouseButton::Left => self.scene.toggle_running(),
            MouseButton::Right => {
                // Centre the new box on the cursor
                let size = self.scene.object_size();
                let pos = Pos::new(at.x - size.w / 2, at.y - size.h / 2);
                if let Err(err) = self.scene.spawn(pos, random_diagonal(&mut rand::rng())) {
                    log::warn!("spawn rejected: {}", err);
                }
            }
            MouseButton::Middle => {
                self.scene.remove_at(&at);
            }
            _ => {}
        }
    }

    fn mouse_button_up_event(&mut self, button: MouseButton, x: f32, y: f32) {
        self.egui_mq.mouse_button_up_event(button, x, y);
    }

    fn char_event(&mut self, character: char, _keymods: KeyMods, _repeat: bool) {
        self.egui_mq.char_event(character);
    }

    fn key_down_event(&mut self, keycode: KeyCode, keymods: KeyMods, _repeat: bool) {
        self.egui_mq.key_down_event(keycode, keymods);
        if self.egui_mq.egui_ctx().wants_keyboard_input() {
            return;
        }

        match keycode {
            KeyCode::Space => self.scene.toggle_running(),
            KeyCode::N => self.step_once(),
            KeyCode::R => self.scene.reset(),
            KeyCode::M => self.debug_menu.muted = !self.debug_menu.muted,
            KeyCode::F1 => self.debug_menu.open = !self.debug_menu.open,
            KeyCode::Escape => window::request_quit(),
            _ => {}
        }
    }

    fn key_up_event(&mut self, keycode: KeyCode, keymods: KeyMods) {
        self.egui_mq.key_up_event(keycode, keymods);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_default_config {
        Config::default()
            .save(&cli.config)
            .with_context(|| format!("writing {}", cli.config.display()))?;
        log::info!("wrote default config to {}", cli.config.display());
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if cli.autostart {
        config.autostart = true;
    }
    if cli.follow_window {
        config.follow_window = true;
    }
    if let Some(tick_hz) = cli.tick_hz {
        config.tick_hz = tick_hz;
    }
    config.validate().context("invalid configuration")?;

    let scene = Scene::new(&config).context("building scene")?;

    let conf = conf::Conf {
        window_title: config.window.title.clone(),
        high_dpi: false,
        window_width: config.window.width,
        window_height: config.window.height,
        window_resizable: config.window.resizable,
        ..Default::default()
    };
    miniquad::start(conf, move || Box::new(Stage::new(config, scene)));
    Ok(())
}
