use std::time::Instant;

/// Timing for one frame, threaded explicitly into the update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameContext {
    /// Seconds since the previous frame; zero on the first frame
    pub elapsed: f32,
}

impl FrameContext {
    pub fn new(elapsed: f32) -> Self {
        Self { elapsed }
    }
}

/// Produces a [`FrameContext`] per tick from wall-clock instants
#[derive(Debug, Default)]
pub struct FrameClock {
    previous: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: Instant) -> FrameContext {
        let elapsed = self
            .previous
            .map(|previous| now.saturating_duration_since(previous).as_secs_f32())
            .unwrap_or(0.0);
        self.previous = Some(now);
        FrameContext { elapsed }
    }
}
