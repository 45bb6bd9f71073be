use std::collections::VecDeque;
use std::time::Duration;

/// Frames averaged by [`FpsCounter::default`].
pub const DEFAULT_FPS_WINDOW: usize = 60;

/// Rolling average of the frame rate over the last `window` frames.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: usize,
    frames: VecDeque<Duration>,
    total: Duration,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(DEFAULT_FPS_WINDOW)
    }
}

impl FpsCounter {
    /// A window of zero is treated as one.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            frames: VecDeque::with_capacity(window),
            total: Duration::ZERO,
        }
    }

    pub fn record(&mut self, frame_time: Duration) {
        if self.frames.len() == self.window {
            if let Some(oldest) = self.frames.pop_front() {
                self.total -= oldest;
            }
        }
        self.frames.push_back(frame_time);
        self.total += frame_time;
    }

    /// Average frames per second; zero until a non-empty frame is recorded.
    pub fn fps(&self) -> f32 {
        let secs = self.total.as_secs_f32();
        if secs <= 0.0 {
            return 0.0;
        }
        self.frames.len() as f32 / secs
    }

    pub fn samples(&self) -> usize {
        self.frames.len()
    }

    pub fn reset(&mut self) {
        self.frames.clear();
        self.total = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counter_reads_zero() {
        let fps = FpsCounter::default();
        assert_eq!(fps.fps(), 0.0);
        assert_eq!(fps.samples(), 0);
    }

    #[test]
    fn steady_frames() {
        let mut fps = FpsCounter::new(10);
        for _ in 0..10 {
            fps.record(Duration::from_millis(20));
        }
        assert!((fps.fps() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn old_frames_fall_out_of_the_window() {
        let mut fps = FpsCounter::new(4);
        for _ in 0..4 {
            fps.record(Duration::from_millis(100));
        }
        for _ in 0..4 {
            fps.record(Duration::from_millis(10));
        }
        assert_eq!(fps.samples(), 4);
        assert!((fps.fps() - 100.0).abs() < 1e-2);
    }

    #[test]
    fn zero_window_keeps_one_frame() {
        let mut fps = FpsCounter::new(0);
        fps.record(Duration::from_millis(100));
        fps.record(Duration::from_millis(50));
        assert_eq!(fps.samples(), 1);
        assert!((fps.fps() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn reset_clears() {
        let mut fps = FpsCounter::new(3);
        fps.record(Duration::from_millis(16));
        fps.reset();
        assert_eq!(fps.fps(), 0.0);
    }
}
