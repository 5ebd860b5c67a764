use super::bouncer::{Bounce, Bouncer};
use super::common::{Bounds, BoundsError, Pos, Size, Velocity};
use crate::config::Config;
use rand::Rng;

/// Everything that moves inside the container. Each bouncer owns its own
/// position and velocity; they never interact.
pub struct Scene {
    container: Size,
    object_size: Size,
    bounds: Bounds,
    start: Pos,
    start_vel: Velocity,
    color: [f32; 4],
    bouncers: Vec<Bouncer>,
    running: bool,
    started: bool,
    ticks: u64,
}

impl Scene {
    pub fn new(config: &Config) -> Result<Scene, BoundsError> {
        let bounds = Bounds::for_object(config.container, config.object.size)?;
        bounds.check_speed(config.object.velocity)?;
        let mut scene = Scene {
            container: config.container,
            object_size: config.object.size,
            bounds,
            start: bounds.clamp(config.object.start),
            start_vel: config.object.velocity,
            color: config.object.color,
            bouncers: vec![],
            running: false,
            started: false,
            ticks: 0,
        };
        scene.reset();
        Ok(scene)
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn object_size(&self) -> Size {
        self.object_size
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn bouncers(&self) -> &[Bouncer] {
        &self.bouncers
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn start(&mut self) {
        if !self.started {
            self.started = true;
            log::info!(
                "starting animation in a {}x{} container",
                self.container.w,
                self.container.h
            );
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle_running(&mut self) {
        if self.running {
            log::debug!("paused at tick {}", self.ticks);
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advances every bouncer by one tick while running.
    pub fn update(&mut self) -> Vec<Bounce> {
        if !self.running {
            return vec![];
        }
        self.advance()
    }

    /// Advances a single tick regardless of the paused state.
    pub fn step_once(&mut self) -> Vec<Bounce> {
        self.advance()
    }

    fn advance(&mut self) -> Vec<Bounce> {
        self.ticks += 1;
        let bounds = self.bounds;
        self.bouncers
            .iter_mut()
            .filter_map(|bouncer| bouncer.tick(&bounds))
            .collect()
    }

    /// Back to the single bouncer at its starting placement.
    pub fn reset(&mut self) {
        self.bouncers = vec![Bouncer::new(
            self.start,
            self.start_vel,
            self.object_size,
            self.color,
        )];
        self.ticks = 0;
        log::debug!("scene reset");
    }

    pub fn spawn(&mut self, pos: Pos, vel: Velocity) -> Result<(), BoundsError> {
        self.bounds.check_speed(vel)?;
        let pos = self.bounds.clamp(pos);
        log::debug!(
            "spawned bouncer at ({}, {}) moving ({}, {})",
            pos.x,
            pos.y,
            vel.dx,
            vel.dy
        );
        self.bouncers
            .push(Bouncer::new(pos, vel, self.object_size, self.color));
        Ok(())
    }

    pub fn spawn_random(&mut self, rng: &mut impl Rng) -> Result<(), BoundsError> {
        let pos = Pos::new(
            rng.random_range(0..self.bounds.max_x()),
            rng.random_range(0..self.bounds.max_y()),
        );
        self.spawn(pos, random_diagonal(rng))
    }

    /// Removes the topmost bouncer under `point`.
    pub fn remove_at(&mut self, point: &Pos) -> bool {
        if let Some(index) = self.bouncers.iter().rposition(|b| b.contains(point)) {
            self.bouncers.remove(index);
            true
        } else {
            false
        }
    }

    /// Nothing changes unless the object fits and every bouncer, and the
    /// starting velocity, is slow enough for the new bounds.
    pub fn set_container(&mut self, w: i32, h: i32) -> Result<(), BoundsError> {
        let container = Size::new(w, h);
        let bounds = Bounds::for_object(container, self.object_size)?;
        bounds.check_speed(self.start_vel)?;
        for bouncer in &self.bouncers {
            bounds.check_speed(bouncer.vel())?;
        }
        self.container = container;
        self.bounds = bounds;
        self.start = bounds.clamp(self.start);
        for bouncer in &mut self.bouncers {
            bouncer.clamp_into(&bounds);
        }
        log::debug!("container resized to {}x{}", w, h);
        Ok(())
    }
}

/// One of the four unit diagonals.
pub fn random_diagonal(rng: &mut impl Rng) -> Velocity {
    let dx = if rng.random_bool(0.5) { 1 } else { -1 };
    let dy = if rng.random_bool(0.5) { 1 } else { -1 };
    Velocity::new(dx, dy)
}
