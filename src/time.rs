//! Frame timing, resize debouncing, and the restartable frame loop.
//!
//! [`Time`] is bookkeeping only: the particle step integrates with a unit
//! timestep regardless of wall-clock delta. [`Debounce`] implements the
//! trailing-edge resize debounce, and [`RestartableLoop`] hands out
//! generation tokens so a resize restart provably leaves a single live
//! update loop behind.

use std::time::{Duration, Instant};

/// Time tracking for the frame loop.
///
/// Provides elapsed time, delta time, frame counting, and FPS calculation.
#[derive(Debug)]
pub struct Time {
    /// When the timer was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in seconds (cached for fast access).
    elapsed_secs: f32,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = now.duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total elapsed time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

/// Trailing-edge debounce.
///
/// Every [`trigger`](Debounce::trigger) restarts the wait;
/// [`ready`](Debounce::ready) fires once after the wait elapses with no
/// further triggers. Resize events arrive in bursts while the user drags the
/// window edge, and the field rebuild only runs for the last one.
#[derive(Debug)]
pub struct Debounce {
    wait: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    /// Start (or restart) the wait from now.
    pub fn trigger(&mut self) {
        self.deadline = Some(Instant::now() + self.wait);
    }

    /// True exactly once, after the wait has elapsed without new triggers.
    pub fn ready(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a trigger is waiting to fire.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Token identifying one generation of a [`RestartableLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopToken(u64);

/// Generation-counted handle for a restartable per-frame loop.
///
/// `start()` invalidates every previously issued token, so work guarded by
/// [`is_current`](RestartableLoop::is_current) can never run for two
/// generations at once: after a restart exactly one token is live.
#[derive(Debug, Default)]
pub struct RestartableLoop {
    generation: u64,
    running: bool,
}

impl RestartableLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new generation, invalidating all earlier tokens. Idempotent
    /// in the sense that calling it again simply supersedes the previous
    /// generation.
    pub fn start(&mut self) -> LoopToken {
        self.generation += 1;
        self.running = true;
        LoopToken(self.generation)
    }

    /// Stop the loop. Safe to call repeatedly or before any `start`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether `token` belongs to the live generation.
    pub fn is_current(&self, token: LoopToken) -> bool {
        self.running && token == LoopToken(self.generation)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn time_update_advances() {
        let mut time = Time::new();
        assert_eq!(time.frame(), 0);
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = time.update();

        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn debounce_fires_once_after_wait() {
        let mut debounce = Debounce::new(Duration::from_millis(10));
        assert!(!debounce.ready());
        assert!(!debounce.pending());

        debounce.trigger();
        assert!(debounce.pending());
        assert!(!debounce.ready());

        thread::sleep(Duration::from_millis(15));
        assert!(debounce.ready());
        // Consumed: does not fire again.
        assert!(!debounce.ready());
        assert!(!debounce.pending());
    }

    #[test]
    fn debounce_retrigger_restarts_wait() {
        let mut debounce = Debounce::new(Duration::from_millis(30));
        debounce.trigger();
        thread::sleep(Duration::from_millis(20));
        debounce.trigger();
        // 20ms after the first trigger, but only 0ms after the second.
        assert!(!debounce.ready());
        thread::sleep(Duration::from_millis(40));
        assert!(debounce.ready());
    }

    #[test]
    fn restart_leaves_exactly_one_live_generation() {
        let mut frame_loop = RestartableLoop::new();
        let first = frame_loop.start();
        assert!(frame_loop.is_current(first));

        let second = frame_loop.start();
        assert!(!frame_loop.is_current(first));
        assert!(frame_loop.is_current(second));
    }

    #[test]
    fn stop_is_idempotent_and_kills_all_tokens() {
        let mut frame_loop = RestartableLoop::new();
        frame_loop.stop();
        assert!(!frame_loop.is_running());

        let token = frame_loop.start();
        frame_loop.stop();
        frame_loop.stop();
        assert!(!frame_loop.is_current(token));

        let restarted = frame_loop.start();
        assert!(frame_loop.is_current(restarted));
        assert!(!frame_loop.is_current(token));
    }
}
