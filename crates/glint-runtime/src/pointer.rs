use std::time::{Duration, Instant};

/// How long [`PointerTracker::is_moving`] stays true after the last
/// movement event.
pub const MOVE_DECAY: Duration = Duration::from_millis(100);

/// Tracks the pointer in normalized device coordinates.
///
/// Coordinates live in [-1, 1]² with positive y up. `delta` is recomputed
/// once per frame from the position at the previous [`update`], so it is
/// always exactly one frame stale — a stable per-frame velocity signal
/// instead of a jittery per-event one.
///
/// [`update`]: PointerTracker::update
#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    coords: [f32; 2],
    previous: [f32; 2],
    delta: [f32; 2],
    last_move: Option<Instant>,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            coords: [0.0, 0.0],
            previous: [0.0, 0.0],
            delta: [0.0, 0.0],
            last_move: None,
        }
    }

    /// Feeds a movement event in raw surface pixels, restarting the decay
    /// window.
    pub fn set_coords(&mut self, x: f32, y: f32, width: u32, height: u32) {
        self.set_coords_at(x, y, width, height, Instant::now());
    }

    pub fn set_coords_at(&mut self, x: f32, y: f32, width: u32, height: u32, now: Instant) {
        self.coords = normalize(x, y, width, height);
        self.last_move = Some(now);
    }

    /// True within the decay window of the last movement event; each new
    /// event resets the window.
    pub fn is_moving(&self) -> bool {
        self.is_moving_at(Instant::now())
    }

    pub fn is_moving_at(&self, now: Instant) -> bool {
        self.last_move
            .map(|at| now.saturating_duration_since(at) < MOVE_DECAY)
            .unwrap_or(false)
    }

    /// Once per frame: recompute the delta against the position snapshotted
    /// at the previous update, then snapshot the current position.
    pub fn update(&mut self) {
        self.delta = [
            self.coords[0] - self.previous[0],
            self.coords[1] - self.previous[1],
        ];
        self.previous = self.coords;
    }

    pub fn coords(&self) -> [f32; 2] {
        self.coords
    }

    pub fn delta(&self) -> [f32; 2] {
        self.delta
    }
}

/// Maps raw pixel coordinates onto [-1, 1]² with the vertical axis
/// inverted: (0, 0) is the top-left corner and positive y points up.
pub fn normalize(x: f32, y: f32, width: u32, height: u32) -> [f32; 2] {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    [x / w * 2.0 - 1.0, -(y / h * 2.0 - 1.0)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const W: u32 = 640;
    const H: u32 = 480;

    #[test]
    fn normalization_maps_the_corners() {
        assert_eq!(normalize(0.0, 0.0, W, H), [-1.0, 1.0]);
        assert_eq!(normalize(W as f32, H as f32, W, H), [1.0, -1.0]);
    }

    #[test]
    fn normalization_maps_the_center_to_origin() {
        let [x, y] = normalize(W as f32 / 2.0, H as f32 / 2.0, W, H);
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn idle_until_the_first_movement_event() {
        let tracker = PointerTracker::new();
        assert!(!tracker.is_moving_at(Instant::now()));
    }

    #[test]
    fn movement_decays_after_the_window() {
        let start = Instant::now();
        let mut tracker = PointerTracker::new();
        tracker.set_coords_at(10.0, 10.0, W, H, start);

        assert!(tracker.is_moving_at(start + Duration::from_millis(50)));
        assert!(!tracker.is_moving_at(start + MOVE_DECAY));
    }

    #[test]
    fn a_second_event_resets_the_decay_window() {
        let start = Instant::now();
        let mut tracker = PointerTracker::new();
        tracker.set_coords_at(10.0, 10.0, W, H, start);
        tracker.set_coords_at(20.0, 20.0, W, H, start + Duration::from_millis(50));

        // Still inside the restarted window well past 100ms from the first event.
        assert!(tracker.is_moving_at(start + Duration::from_millis(140)));
        assert!(!tracker.is_moving_at(start + Duration::from_millis(160)));
    }

    #[test]
    fn delta_is_one_frame_stale() {
        let now = Instant::now();
        let mut tracker = PointerTracker::new();

        tracker.set_coords_at(0.0, 0.0, W, H, now);
        tracker.update();
        // The first update's delta measures against the initial origin snapshot.
        assert_eq!(tracker.delta(), [-1.0, 1.0]);

        tracker.set_coords_at(W as f32, H as f32, W, H, now);
        // No update yet: the delta still reflects the previous frame.
        assert_eq!(tracker.delta(), [-1.0, 1.0]);

        tracker.update();
        assert_eq!(tracker.delta(), [2.0, -2.0]);

        tracker.update();
        assert_eq!(tracker.delta(), [0.0, 0.0]);
    }
}
