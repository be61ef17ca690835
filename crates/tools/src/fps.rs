use std::time::Duration;

/// Frames-per-second counter refreshed once per one-second window.
///
/// Also keeps a short ring of recent frame times for min/max readouts.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: f32,
    frames_in_window: u32,
    fps: f32,
    last: Option<f32>,
    history: Vec<Duration>,
    index: usize,
    filled: bool,
}

impl FpsCounter {
    pub fn new(history: usize) -> Self {
        Self {
            window_start: 0.0,
            frames_in_window: 0,
            fps: 0.0,
            last: None,
            history: vec![Duration::ZERO; history.max(1)],
            index: 0,
            filled: false,
        }
    }

    /// Count a frame shown at `now` seconds. Returns the current reading.
    pub fn frame(&mut self, now: f32) -> f32 {
        if let Some(last) = self.last {
            self.record(Duration::from_secs_f32((now - last).max(0.0)));
        } else {
            self.window_start = now;
        }
        self.last = Some(now);

        self.frames_in_window += 1;
        if now - self.window_start >= 1.0 {
            self.fps = self.frames_in_window as f32;
            self.frames_in_window = 0;
            self.window_start = now;
        }
        self.fps
    }

    /// Frames counted in the last full window.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.history.len();
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn recorded(&self) -> &[Duration] {
        if self.filled {
            &self.history
        } else {
            &self.history[..self.index]
        }
    }

    pub fn average_frame_time(&self) -> Duration {
        let recorded = self.recorded();
        if recorded.is_empty() {
            return Duration::ZERO;
        }
        recorded.iter().sum::<Duration>() / recorded.len() as u32
    }

    pub fn max_frame_time(&self) -> Duration {
        self.recorded().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min_frame_time(&self) -> Duration {
        self.recorded().iter().copied().min().unwrap_or(Duration::ZERO)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_updates_once_per_second() {
        let mut fps = FpsCounter::default();
        let step = 1.0 / 32.0;
        for i in 0..32 {
            assert_eq!(fps.frame(i as f32 * step), 0.0);
        }
        // Frame 33 lands exactly one second after the first.
        assert_eq!(fps.frame(32.0 * step), 33.0);
        assert_eq!(fps.frame(33.0 * step), 33.0);
    }

    #[test]
    fn frame_times_wrap_around() {
        let mut fps = FpsCounter::new(2);
        fps.frame(0.0);
        fps.frame(0.010);
        fps.frame(0.030);
        fps.frame(0.060);

        let avg = fps.average_frame_time().as_secs_f32();
        assert!((avg - 0.025).abs() < 1e-4);
        assert!(fps.min_frame_time() < fps.max_frame_time());
    }

    #[test]
    fn empty_counter_reads_zero() {
        let fps = FpsCounter::new(0);
        assert_eq!(fps.fps(), 0.0);
        assert_eq!(fps.average_frame_time(), Duration::ZERO);
    }
}
