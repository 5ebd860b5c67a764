use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Pos {
        Pos { x, y }
    }
}

/// Per-tick displacement. One step of it is applied every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub fn new(dx: i32, dy: i32) -> Velocity {
        Velocity { dx, dy }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub fn new(w: i32, h: i32) -> Size {
        Size { w, h }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundsError {
    #[error("bounds must be positive, got {max_x}x{max_y}")]
    NonPositive { max_x: i32, max_y: i32 },
    #[error("object {object_w}x{object_h} does not fit in container {container_w}x{container_h}")]
    ObjectTooLarge {
        object_w: i32,
        object_h: i32,
        container_w: i32,
        container_h: i32,
    },
    #[error("velocity ({dx}, {dy}) is too fast for bounds {max_x}x{max_y}")]
    TooFast {
        dx: i32,
        dy: i32,
        max_x: i32,
        max_y: i32,
    },
}

/// Valid top-left positions are `0 <= x < max_x` and `0 <= y < max_y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    max_x: i32,
    max_y: i32,
}

impl Bounds {
    pub fn new(max_x: i32, max_y: i32) -> Result<Bounds, BoundsError> {
        if max_x <= 0 || max_y <= 0 {
            return Err(BoundsError::NonPositive { max_x, max_y });
        }
        Ok(Bounds { max_x, max_y })
    }

    /// Movement bounds for an object of `object` size inside `container`.
    pub fn for_object(container: Size, object: Size) -> Result<Bounds, BoundsError> {
        let max_x = container.w - object.w;
        let max_y = container.h - object.h;
        if max_x <= 0 || max_y <= 0 {
            return Err(BoundsError::ObjectTooLarge {
                object_w: object.w,
                object_h: object.h,
                container_w: container.w,
                container_h: container.h,
            });
        }
        Bounds::new(max_x, max_y)
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn contains(&self, pos: &Pos) -> bool {
        pos.x >= 0 && pos.x < self.max_x && pos.y >= 0 && pos.y < self.max_y
    }

    /// A reflection only lands back inside when one step is at most half the extent.
    pub fn check_speed(&self, vel: Velocity) -> Result<(), BoundsError> {
        let too_fast_x = 2 * u64::from(vel.dx.unsigned_abs()) > self.max_x as u64;
        let too_fast_y = 2 * u64::from(vel.dy.unsigned_abs()) > self.max_y as u64;
        if too_fast_x || too_fast_y {
            return Err(BoundsError::TooFast {
                dx: vel.dx,
                dy: vel.dy,
                max_x: self.max_x,
                max_y: self.max_y,
            });
        }
        Ok(())
    }

    pub fn clamp(&self, pos: Pos) -> Pos {
        Pos {
            x: pos.x.clamp(0, self.max_x - 1),
            y: pos.y.clamp(0, self.max_y - 1),
        }
    }
}
