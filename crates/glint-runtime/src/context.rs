use std::fmt;
use std::time::Instant;

use glow::HasContext;

/// Wall-clock driven frame clock with a speed multiplier.
///
/// `advance_at` measures the raw seconds since the previous call and grows
/// accumulated time by `raw * time_scale`. Accumulated time never moves
/// backwards while the scale is non-negative; a scale of zero freezes it
/// regardless of real elapsed time. The previous timestamp always reflects
/// the reading at the most recent advance.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    previous: Option<Instant>,
    elapsed: f64,
    time_scale: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous: None,
            elapsed: 0.0,
            time_scale: 1.0,
        }
    }

    /// Seeds the previous timestamp so the first advance measures from here.
    pub fn start_at(&mut self, now: Instant) {
        self.previous = Some(now);
    }

    /// Advances the clock; returns the raw (unscaled) delta seconds.
    pub fn advance_at(&mut self, now: Instant) -> f64 {
        let delta = match self.previous {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f64(),
            None => 0.0,
        };
        self.elapsed += delta * self.time_scale as f64;
        self.previous = Some(now);
        delta
    }

    /// Accumulated (scaled) seconds.
    pub fn time(&self) -> f64 {
        self.elapsed
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }
}

/// Owns the drawing context and the per-frame state every consumer reads.
///
/// Exactly one `RenderContext` exists per surface. Every other component
/// borrows the GL handle through [`RenderContext::gl`] and never stores a
/// second copy; the handle lives until the surface goes away.
pub struct RenderContext {
    gl: glow::Context,
    width: u32,
    height: u32,
    scale_factor: f64,
    running: bool,
    clock: FrameClock,
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The loaded GL function table has no useful Debug output.
        f.debug_struct("RenderContext")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scale_factor", &self.scale_factor)
            .field("running", &self.running)
            .field("clock", &self.clock)
            .field("gl", &"<gl context>")
            .finish()
    }
}

impl RenderContext {
    /// Wraps a freshly acquired GL context. `width`/`height` are the
    /// surface's pixel size; `scale_factor` is the device pixel ratio,
    /// tracked for consumers but never applied to the buffer itself.
    pub fn new(gl: glow::Context, width: u32, height: u32, scale_factor: f64) -> Self {
        Self {
            gl,
            width: width.max(1),
            height: height.max(1),
            scale_factor,
            running: false,
            clock: FrameClock::new(),
        }
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Seeds the clock and the fixed GL state for the harness (transparent
    /// black clear color, depth testing on), and flips the running flag.
    pub fn setup(&mut self) {
        self.setup_at(Instant::now());
    }

    pub fn setup_at(&mut self, now: Instant) {
        self.clock.start_at(now);
        self.running = true;
        unsafe {
            self.gl.clear_color(0.0, 0.0, 0.0, 0.0);
            self.gl.enable(glow::DEPTH_TEST);
        }
    }

    /// Records the surface's new pixel size. The host resizes the GL
    /// surface itself; no device-pixel-ratio scaling is applied here.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resolution(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Advances the clock, once per frame.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub fn update_at(&mut self, now: Instant) {
        self.clock.advance_at(now);
    }

    /// Accumulated (scaled) seconds since setup.
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clock_accumulates_the_exact_sum_of_deltas() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.start_at(start);

        let deltas_ms = [16u64, 33, 7, 100];
        let mut at = start;
        for ms in deltas_ms {
            at += Duration::from_millis(ms);
            clock.advance_at(at);
        }

        let expected: f64 = deltas_ms.iter().map(|ms| *ms as f64 / 1000.0).sum();
        assert!((clock.time() - expected).abs() < 1e-9);
    }

    #[test]
    fn clock_never_advances_at_zero_scale() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.start_at(start);
        clock.set_time_scale(0.0);

        clock.advance_at(start + Duration::from_secs(5));
        clock.advance_at(start + Duration::from_secs(50));

        assert_eq!(clock.time(), 0.0);
    }

    #[test]
    fn clock_doubles_at_scale_two() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.start_at(start);
        clock.set_time_scale(2.0);

        clock.advance_at(start + Duration::from_millis(500));

        assert!((clock.time() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn clock_reports_raw_delta_unscaled() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.start_at(start);
        clock.set_time_scale(0.0);

        let raw = clock.advance_at(start + Duration::from_millis(250));

        assert!((raw - 0.25).abs() < 1e-9);
        assert_eq!(clock.time(), 0.0);
    }

    #[test]
    fn first_advance_without_start_measures_nothing() {
        let mut clock = FrameClock::new();
        let raw = clock.advance_at(Instant::now());
        assert_eq!(raw, 0.0);
        assert_eq!(clock.time(), 0.0);
    }

    #[test]
    fn scale_changes_apply_from_the_next_advance() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.start_at(start);

        clock.advance_at(start + Duration::from_secs(1));
        clock.set_time_scale(0.5);
        clock.advance_at(start + Duration::from_secs(2));

        assert!((clock.time() - 1.5).abs() < 1e-9);
    }
}
