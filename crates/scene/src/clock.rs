use std::time::Instant;

/// Monotonic time source for the frame loop.
pub trait Clock {
    /// Seconds since the clock started.
    fn elapsed_seconds(&mut self) -> f32;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_seconds(&mut self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Deterministic clock that advances a fixed step per reading.
///
/// The first reading is zero.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepClock {
    step: f32,
    ticks: u64,
}

impl FixedStepClock {
    pub fn new(step_seconds: f32) -> Self {
        Self {
            step: step_seconds,
            ticks: 0,
        }
    }

    /// A clock stepping at `fps` frames per second.
    pub fn at_fps(fps: u32) -> Self {
        Self::new(1.0 / fps.max(1) as f32)
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Clock for FixedStepClock {
    fn elapsed_seconds(&mut self) -> f32 {
        let now = self.ticks as f32 * self.step;
        self.ticks += 1;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_starts_at_zero_and_advances() {
        let mut clock = FixedStepClock::new(0.5);
        assert_eq!(clock.elapsed_seconds(), 0.0);
        assert_eq!(clock.elapsed_seconds(), 0.5);
        assert_eq!(clock.elapsed_seconds(), 1.0);
    }

    #[test]
    fn fps_clock_guards_zero() {
        assert_eq!(FixedStepClock::at_fps(0).step(), 1.0);
        assert!((FixedStepClock::at_fps(60).step() - 1.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.elapsed_seconds();
        let b = clock.elapsed_seconds();
        assert!(b >= a);
    }
}
