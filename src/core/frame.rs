//=========================================================================
// Frame Pacing
//=========================================================================
//
// Frame-loop control flow and the clock behind the FPS event.
//
//   FrameClock::period()    ─ target frame duration (None when uncapped)
//   FrameClock::remaining() ─ how long to sleep after a frame
//   FrameClock::tick()      ─ counts frames, yields the measured rate once
//                             per refresh interval
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== FrameStatus =========================================================

/// Whether the frame loop keeps going after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Exit,
}

//=== FrameClock ==========================================================

#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Option<Duration>,
    refresh: Duration,
    frames: u32,
    window_start: Instant,
}

impl FrameClock {
    /// `target_fps` of `0.0` leaves the loop uncapped.
    pub fn new(target_fps: f64, refresh_ms: u64, now: Instant) -> Self {
        let period = (target_fps > 0.0).then(|| Duration::from_secs_f64(1.0 / target_fps));
        Self {
            period,
            refresh: Duration::from_millis(refresh_ms),
            frames: 0,
            window_start: now,
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Sleep needed to hold the target rate for a frame that began at
    /// `frame_start`.
    pub fn remaining(&self, frame_start: Instant, now: Instant) -> Option<Duration> {
        let period = self.period?;
        let elapsed = now.saturating_duration_since(frame_start);
        (elapsed < period).then(|| period - elapsed)
    }

    /// Counts a finished frame. Returns the frame rate measured over the
    /// last refresh interval once that interval has passed.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.refresh {
            return None;
        }

        let fps = f64::from(self.frames) / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_clock_never_sleeps() {
        let start = Instant::now();
        let clock = FrameClock::new(0.0, 1000, start);
        assert_eq!(clock.period(), None);
        assert_eq!(clock.remaining(start, start), None);
    }

    #[test]
    fn remaining_fills_the_rest_of_the_period() {
        let start = Instant::now();
        let clock = FrameClock::new(50.0, 1000, start);

        assert_eq!(clock.period(), Some(Duration::from_millis(20)));
        assert_eq!(
            clock.remaining(start, start + Duration::from_millis(5)),
            Some(Duration::from_millis(15))
        );
        assert_eq!(clock.remaining(start, start + Duration::from_millis(25)), None);
    }

    #[test]
    fn tick_reports_once_per_refresh_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::new(60.0, 500, start);

        for frame in 1..10 {
            assert_eq!(clock.tick(start + Duration::from_millis(frame * 50)), None);
        }
        let fps = clock.tick(start + Duration::from_millis(500)).unwrap();
        assert!((fps - 20.0).abs() < 1e-9);

        assert_eq!(clock.tick(start + Duration::from_millis(550)), None);
    }
}
