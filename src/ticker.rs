/// Turns frame time into a whole number of fixed-rate ticks.
pub struct Ticker {
    tick_hz: f64,
    max_ticks_per_frame: u32,
    accumulator: f64,
}

impl Ticker {
    pub fn new(tick_hz: f64, max_ticks_per_frame: u32) -> Self {
        Ticker {
            tick_hz,
            max_ticks_per_frame,
            accumulator: 0.0,
        }
    }

    pub fn tick_hz(&self) -> f64 {
        self.tick_hz
    }

    pub fn set_tick_hz(&mut self, tick_hz: f64) {
        if tick_hz.is_finite() && tick_hz > 0.0 {
            self.tick_hz = tick_hz;
        }
    }

    /// Returns the number of ticks due after `dt` seconds. Whatever is left
    /// over carries to the next call; a backlog above the cap is dropped.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        let period = 1.0 / self.tick_hz;
        self.accumulator += dt;

        let due = (self.accumulator / period).floor();
        if due >= self.max_ticks_per_frame as f64 {
            self.accumulator = 0.0;
            self.max_ticks_per_frame
        } else {
            self.accumulator -= due * period;
            due as u32
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks() {
        let mut ticker = Ticker::new(100.0, 64);
        assert_eq!(ticker.advance(0.105), 10);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut ticker = Ticker::new(10.0, 64);
        assert_eq!(ticker.advance(0.06), 0);
        assert_eq!(ticker.advance(0.06), 1);
        assert_eq!(ticker.advance(0.085), 1);
    }

    #[test]
    fn test_cap_drops_backlog() {
        let mut ticker = Ticker::new(100.0, 8);
        assert_eq!(ticker.advance(5.0), 8);
        // The backlog is gone, only fresh time counts.
        assert_eq!(ticker.advance(0.025), 2);
    }

    #[test]
    fn test_bad_dt() {
        let mut ticker = Ticker::new(100.0, 8);
        assert_eq!(ticker.advance(-1.0), 0);
        assert_eq!(ticker.advance(f64::NAN), 0);
        assert_eq!(ticker.advance(0.0), 0);
        assert_eq!(ticker.advance(0.015), 1);
    }

    #[test]
    fn test_set_tick_hz_ignores_invalid() {
        let mut ticker = Ticker::new(60.0, 8);
        ticker.set_tick_hz(-5.0);
        assert_eq!(ticker.tick_hz(), 60.0);
        ticker.set_tick_hz(120.0);
        assert_eq!(ticker.tick_hz(), 120.0);
    }
}
