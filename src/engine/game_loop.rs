/// Game loop timing and pacing
///
/// One update runs per frame, followed by a coarse fixed delay before the
/// next frame. Gameplay timers read the monotonic millisecond clock exposed
/// here rather than a decoupled simulation clock.
use std::time::{Duration, Instant};

/// Delay inserted after every frame (roughly 60 frames per second)
pub const FRAME_DELAY: Duration = Duration::from_millis(16);

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Time when game loop started, origin of the millisecond clock
    start_time: Instant,

    /// Time the last frame started
    last_frame_time: Instant,

    /// Earliest time the next frame may start
    next_frame_at: Instant,

    /// Pause inserted after each frame
    frame_delay: Duration,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new(frame_delay: Duration) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame_time: now,
            next_frame_at: now,
            frame_delay,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Milliseconds since the loop started
    pub fn now_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Check whether the next frame is due
    pub fn is_frame_due(&self, now: Instant) -> bool {
        now >= self.next_frame_at
    }

    /// Earliest time the next frame may start
    pub fn next_frame_at(&self) -> Instant {
        self.next_frame_at
    }

    /// Begin a new frame, returns the clock reading for this frame in milliseconds
    pub fn begin_frame(&mut self) -> u64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter once per window
        if self.frame_count % FPS_WINDOW_SIZE as u64 == 0 {
            self.update_fps();
            log::debug!("{:.1} fps", self.current_fps);
        }

        now.duration_since(self.start_time).as_millis() as u64
    }

    /// Finish the frame and schedule the next one after the fixed delay
    pub fn end_frame(&mut self) {
        self.next_frame_at = Instant::now() + self.frame_delay;
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames run
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(FRAME_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::default();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.fps(), 0.0);
        assert!(game_loop.is_frame_due(Instant::now()));
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::default();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 1);

        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_end_frame_schedules_delay() {
        let mut game_loop = GameLoop::new(Duration::from_millis(50));
        game_loop.begin_frame();
        game_loop.end_frame();

        assert!(!game_loop.is_frame_due(Instant::now()));
        assert!(game_loop.is_frame_due(game_loop.next_frame_at()));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut game_loop = GameLoop::default();
        let first = game_loop.begin_frame();
        thread::sleep(Duration::from_millis(10));
        let second = game_loop.begin_frame();

        assert!(second >= first + 10);
        assert!(game_loop.now_ms() >= second);
    }

    #[test]
    fn test_fps_estimate() {
        let mut game_loop = GameLoop::new(Duration::ZERO);
        for _ in 0..FPS_WINDOW_SIZE {
            thread::sleep(Duration::from_millis(1));
            game_loop.begin_frame();
        }
        assert!(game_loop.fps() > 0.0);
    }
}
