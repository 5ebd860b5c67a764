use crate::state::{Bounds, Pos, Velocity};

/// Advances one tick. An axis whose candidate coordinate leaves `[0, max)`
/// has its velocity negated and the overshoot folded back by two steps.
/// Only an overshoot of at most one step lands back inside the bounds.
pub fn step(pos: Pos, vel: Velocity, bounds: &Bounds) -> (Pos, Velocity) {
    let (x, dx) = reflect_axis(pos.x, vel.dx, bounds.max_x());
    let (y, dy) = reflect_axis(pos.y, vel.dy, bounds.max_y());
    (Pos { x, y }, Velocity { dx, dy })
}

fn reflect_axis(coord: i32, delta: i32, max: i32) -> (i32, i32) {
    let candidate = coord + delta;
    if candidate >= max || candidate < 0 {
        let delta = -delta;
        (candidate + 2 * delta, delta)
    } else {
        (candidate, delta)
    }
}
