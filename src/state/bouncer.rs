use super::common::{Bounds, Pos, Size, Velocity};
use crate::physics::step;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bounce {
    Wall,
    Corner,
}

#[derive(Clone, Debug)]
pub struct Bouncer {
    pos: Pos,
    vel: Velocity,
    size: Size,
    pub color: [f32; 4],
    bounces: u64,
}

impl Bouncer {
    pub fn new(pos: Pos, vel: Velocity, size: Size, color: [f32; 4]) -> Self {
        Bouncer {
            pos,
            vel,
            size,
            color,
            bounces: 0,
        }
    }

    pub fn tick(&mut self, bounds: &Bounds) -> Option<Bounce> {
        let (pos, vel) = step(self.pos, self.vel, bounds);
        let flipped_x = vel.dx != self.vel.dx;
        let flipped_y = vel.dy != self.vel.dy;
        self.pos = pos;
        self.vel = vel;

        let bounce = match (flipped_x, flipped_y) {
            (true, true) => Some(Bounce::Corner),
            (true, false) | (false, true) => Some(Bounce::Wall),
            (false, false) => None,
        };
        if bounce.is_some() {
            self.bounces += 1;
            log::trace!("bounce {:?} at ({}, {})", bounce, pos.x, pos.y);
        }
        bounce
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn vel(&self) -> Velocity {
        self.vel
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounces(&self) -> u64 {
        self.bounces
    }

    pub fn clamp_into(&mut self, bounds: &Bounds) {
        self.pos = bounds.clamp(self.pos);
    }

    pub fn contains(&self, point: &Pos) -> bool {
        point.x >= self.pos.x
            && point.x < self.pos.x + self.size.w
            && point.y >= self.pos.y
            && point.y < self.pos.y + self.size.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    fn bouncer_at(x: i32, y: i32, dx: i32, dy: i32) -> Bouncer {
        Bouncer::new(Pos::new(x, y), Velocity::new(dx, dy), Size::new(100, 50), WHITE)
    }

    #[test]
    fn test_tick_without_bounce() {
        let bounds = Bounds::new(900, 458).unwrap();
        let mut b = bouncer_at(10, 10, 1, 1);
        assert_eq!(b.tick(&bounds), None);
        assert_eq!(b.pos(), Pos::new(11, 11));
        assert_eq!(b.bounces(), 0);
    }

    #[test]
    fn test_tick_wall_bounce() {
        let bounds = Bounds::new(900, 458).unwrap();
        let mut b = bouncer_at(899, 10, 1, 1);
        assert_eq!(b.tick(&bounds), Some(Bounce::Wall));
        assert_eq!(b.pos(), Pos::new(898, 11));
        assert_eq!(b.vel(), Velocity::new(-1, 1));
        assert_eq!(b.bounces(), 1);
    }

    #[test]
    fn test_tick_corner_bounce() {
        let bounds = Bounds::new(900, 458).unwrap();
        let mut b = bouncer_at(0, 0, -1, -1);
        assert_eq!(b.tick(&bounds), Some(Bounce::Corner));
        assert_eq!(b.pos(), Pos::new(1, 1));
        assert_eq!(b.bounces(), 1);
    }

    #[test]
    fn test_bounce_count_accumulates() {
        let bounds = Bounds::new(4, 100).unwrap();
        let mut b = bouncer_at(0, 0, 1, 0);
        for _ in 0..12 {
            b.tick(&bounds);
        }
        // Walls are hit on ticks 4, 7 and 10.
        assert_eq!(b.bounces(), 3);
        assert!(bounds.contains(&b.pos()));
    }

    #[test]
    fn test_contains() {
        let b = bouncer_at(10, 20, 0, 0);
        assert!(b.contains(&Pos::new(10, 20)));
        assert!(b.contains(&Pos::new(109, 69)));
        assert!(!b.contains(&Pos::new(110, 20)));
        assert!(!b.contains(&Pos::new(9, 20)));
    }

    #[test]
    fn test_clamp_into() {
        let bounds = Bounds::new(50, 50).unwrap();
        let mut b = bouncer_at(80, 10, 1, 1);
        b.clamp_into(&bounds);
        assert_eq!(b.pos(), Pos::new(49, 10));
    }
}
