/// Elapsed and delta time for one frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    pub elapsed: f32,
    pub delta: f32,
}

/// Turns a monotonically increasing elapsed time into per-frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    previous: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `elapsed` seconds. A clock going backwards yields a zero delta.
    pub fn tick(&mut self, elapsed: f32) -> FrameTime {
        let delta = (elapsed - self.previous).max(0.0);
        self.previous = elapsed;
        self.frames += 1;
        FrameTime { elapsed, delta }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_follow_elapsed() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(0.5).delta, 0.5);
        let t = clock.tick(0.75);
        assert_eq!(t.elapsed, 0.75);
        assert_eq!(t.delta, 0.25);
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn backwards_clock_clamps() {
        let mut clock = FrameClock::new();
        clock.tick(2.0);
        assert_eq!(clock.tick(1.0).delta, 0.0);
        assert_eq!(clock.tick(1.5).delta, 0.5);
    }
}
