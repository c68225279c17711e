use std::time::{Duration, Instant};

/// Parameters the debug panel shares with the render loop.
///
/// The panel mutates these between frames; the driver copies `time_scale`
/// into the clock at the top of each frame. Last write wins — there is no
/// change notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelParams {
    /// Clock multiplier. 1.0 = realtime, 0.0 = paused.
    pub time_scale: f32,
    /// Whether the once-a-second frame-rate readout is reported.
    pub show_stats: bool,
}

impl Default for PanelParams {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            show_stats: false,
        }
    }
}

const TIME_SCALE_MAX: f32 = 8.0;
const RATE_WINDOW: Duration = Duration::from_secs(1);

/// Key-driven control panel with per-frame instrumentation marks.
///
/// Purely observational: the marks feed a frame-rate window and never
/// affect rendering.
#[derive(Debug)]
pub struct ControlPanel {
    params: PanelParams,
    resume_scale: f32,
    window_start: Option<Instant>,
    frames_in_window: u32,
    last_rate: Option<f32>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            params: PanelParams::default(),
            resume_scale: 1.0,
            window_start: None,
            frames_in_window: 0,
            last_rate: None,
        }
    }

    pub fn params(&self) -> PanelParams {
        self.params
    }

    pub fn params_mut(&mut self) -> &mut PanelParams {
        &mut self.params
    }

    /// Keyboard surface: space toggles pause (restoring the pre-pause
    /// speed), 'f'/'s' scale the clock multiplier up/down, 'h' toggles the
    /// stats readout.
    pub fn on_key(&mut self, ch: char) {
        match ch {
            ' ' => {
                if self.params.time_scale == 0.0 {
                    self.params.time_scale = self.resume_scale;
                } else {
                    self.resume_scale = self.params.time_scale;
                    self.params.time_scale = 0.0;
                }
            }
            'f' => {
                self.params.time_scale =
                    (self.params.time_scale * 2.0).clamp(0.0, TIME_SCALE_MAX);
            }
            's' => {
                self.params.time_scale =
                    (self.params.time_scale * 0.5).clamp(0.0, TIME_SCALE_MAX);
            }
            'h' => {
                self.params.show_stats = !self.params.show_stats;
            }
            _ => {}
        }
    }

    /// Start-of-frame instrumentation mark.
    pub fn mark_begin(&mut self) {
        self.mark_begin_at(Instant::now());
    }

    pub fn mark_begin_at(&mut self, now: Instant) {
        if self.window_start.is_none() {
            self.window_start = Some(now);
        }
    }

    /// End-of-frame instrumentation mark; folds the frame into the rate
    /// window and reports once a second when the readout is on.
    pub fn mark_end(&mut self) {
        self.mark_end_at(Instant::now());
    }

    pub fn mark_end_at(&mut self, now: Instant) {
        self.frames_in_window += 1;
        let Some(start) = self.window_start else {
            return;
        };
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= RATE_WINDOW {
            let rate = self.frames_in_window as f32 / elapsed.as_secs_f32();
            self.last_rate = Some(rate);
            if self.params.show_stats {
                tracing::info!(fps = rate, "frame rate");
            }
            self.window_start = Some(now);
            self.frames_in_window = 0;
        }
    }

    /// Frame rate over the most recent completed window, if one finished.
    pub fn frame_rate(&self) -> Option<f32> {
        self.last_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_toggles_pause_and_restores_the_previous_speed() {
        let mut panel = ControlPanel::new();
        panel.on_key('f');
        assert!((panel.params().time_scale - 2.0).abs() < 1e-6);

        panel.on_key(' ');
        assert_eq!(panel.params().time_scale, 0.0);

        panel.on_key(' ');
        assert!((panel.params().time_scale - 2.0).abs() < 1e-6);
    }

    #[test]
    fn speed_is_clamped() {
        let mut panel = ControlPanel::new();
        for _ in 0..10 {
            panel.on_key('f');
        }
        assert!(panel.params().time_scale <= TIME_SCALE_MAX + 1e-6);
    }

    #[test]
    fn halving_from_pause_stays_paused() {
        let mut panel = ControlPanel::new();
        panel.on_key(' ');
        panel.on_key('s');
        assert_eq!(panel.params().time_scale, 0.0);
    }

    #[test]
    fn stats_readout_toggles() {
        let mut panel = ControlPanel::new();
        assert!(!panel.params().show_stats);
        panel.on_key('h');
        assert!(panel.params().show_stats);
        panel.on_key('h');
        assert!(!panel.params().show_stats);
    }

    #[test]
    fn unbound_keys_change_nothing() {
        let mut panel = ControlPanel::new();
        let before = panel.params();
        panel.on_key('q');
        assert_eq!(panel.params(), before);
    }

    #[test]
    fn frame_rate_reports_after_a_full_window() {
        let start = Instant::now();
        let mut panel = ControlPanel::new();

        // 60 frames spread across exactly one second.
        for i in 0..60u32 {
            let at = start + Duration::from_millis((i as u64 + 1) * 1000 / 60);
            panel.mark_begin_at(start);
            panel.mark_end_at(at);
        }

        let rate = panel.frame_rate().expect("window should have completed");
        assert!((rate - 60.0).abs() < 2.0, "unexpected rate: {rate}");
    }

    #[test]
    fn no_rate_before_the_first_window_completes() {
        let start = Instant::now();
        let mut panel = ControlPanel::new();
        panel.mark_begin_at(start);
        panel.mark_end_at(start + Duration::from_millis(16));
        assert!(panel.frame_rate().is_none());
    }
}
