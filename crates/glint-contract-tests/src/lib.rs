#![forbid(unsafe_code)]

//! Cross-crate contract tests for the harness's documented properties.
//!
//! Everything here is pure: clock arithmetic, pointer normalization and
//! decay, geometry layout, descriptor batch checks. Contracts that need a
//! live GL context are documented on the operations themselves.

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use glint_gl::{check_uniform_batch, Capabilities, UniformKind, UniformValue};
    use glint_runtime::{plane_attributes, ControlPanel, FrameClock, PointerTracker, MOVE_DECAY};

    // ---- Clock ----

    #[test]
    fn accumulated_time_equals_the_sum_of_real_deltas_at_unit_scale() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.start_at(start);

        let mut at = start;
        let mut expected = 0.0f64;
        for ms in [16u64, 16, 33, 8, 120] {
            at += Duration::from_millis(ms);
            clock.advance_at(at);
            expected += ms as f64 / 1000.0;
        }

        assert!((clock.time() - expected).abs() < 1e-9);
    }

    #[test]
    fn a_paused_clock_ignores_any_amount_of_real_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.start_at(start);
        clock.set_time_scale(0.0);

        clock.advance_at(start + Duration::from_secs(3600));

        assert_eq!(clock.time(), 0.0);
    }

    #[test]
    fn a_doubled_clock_runs_at_twice_real_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new();
        clock.start_at(start);
        clock.set_time_scale(2.0);

        clock.advance_at(start + Duration::from_secs(2));

        assert!((clock.time() - 4.0).abs() < 1e-9);
    }

    // ---- Pointer ----

    #[test]
    fn pointer_corners_map_to_the_ndc_corners() {
        let now = Instant::now();
        let mut tracker = PointerTracker::new();

        tracker.set_coords_at(0.0, 0.0, 800, 600, now);
        assert_eq!(tracker.coords(), [-1.0, 1.0]);

        tracker.set_coords_at(800.0, 600.0, 800, 600, now);
        assert_eq!(tracker.coords(), [1.0, -1.0]);

        tracker.set_coords_at(400.0, 300.0, 800, 600, now);
        let [x, y] = tracker.coords();
        assert!(x.abs() < 1e-6 && y.abs() < 1e-6);
    }

    #[test]
    fn movement_flag_decays_and_resets() {
        let start = Instant::now();
        let mut tracker = PointerTracker::new();

        tracker.set_coords_at(1.0, 1.0, 800, 600, start);
        assert!(tracker.is_moving_at(start + Duration::from_millis(99)));
        assert!(!tracker.is_moving_at(start + MOVE_DECAY));

        // A second event at 50ms keeps the flag alive past 100ms from the first.
        tracker.set_coords_at(2.0, 2.0, 800, 600, start + Duration::from_millis(50));
        assert!(tracker.is_moving_at(start + Duration::from_millis(149)));
    }

    #[test]
    fn pointer_delta_lags_raw_input_by_one_update() {
        let now = Instant::now();
        let mut tracker = PointerTracker::new();

        tracker.set_coords_at(800.0, 0.0, 800, 600, now);
        assert_eq!(tracker.delta(), [0.0, 0.0]);

        tracker.update();
        assert_eq!(tracker.delta(), [1.0, 1.0]);

        tracker.update();
        assert_eq!(tracker.delta(), [0.0, 0.0]);
    }

    // ---- Geometry ----

    #[test]
    fn the_quad_is_four_strip_vertices_with_paired_texcoords() {
        let plane = plane_attributes(2.0, 2.0);
        assert_eq!(plane.positions.len(), 12);
        assert_eq!(plane.tex_coords.len(), 8);
        // Strip order: top-left, top-right, bottom-left, bottom-right.
        assert_eq!(plane.positions[1], 1.0);
        assert_eq!(plane.positions[4], 1.0);
        assert_eq!(plane.positions[7], -1.0);
        assert_eq!(plane.positions[10], -1.0);
        // v runs downward, pairing each corner with its texel.
        assert_eq!(plane.tex_coords[1], 0.0);
        assert_eq!(plane.tex_coords[7], 1.0);
    }

    // ---- Descriptor batches ----

    #[test]
    fn uniform_batches_must_match_the_declaration_exactly() {
        let declared = [UniformKind::Float, UniformKind::Vec2, UniformKind::Vec2];
        check_uniform_batch(
            &declared,
            &[
                UniformValue::Float(0.0),
                UniformValue::Vec2([1.0, 2.0]),
                UniformValue::Vec2([3.0, 4.0]),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "push_uniforms")]
    fn a_short_uniform_batch_dispatches_nothing() {
        let declared = [UniformKind::Float, UniformKind::Vec2];
        check_uniform_batch(&declared, &[UniformValue::Float(0.0)]);
    }

    // ---- Capabilities ----

    #[test]
    fn absent_capabilities_mean_unsupported() {
        let caps = Capabilities::default();
        assert!(!caps.uint32_indices);
        assert!(!caps.float_textures);
        assert!(!caps.half_float_textures);
        assert!(!caps.transform_feedback);
    }

    // ---- Surface options / default sources ----

    #[test]
    fn default_context_options_ask_for_alpha_and_depth() {
        let options = glint_core::ContextOptions::default();
        assert!(options.alpha);
        assert!(options.depth);
        assert!(!options.stencil);
    }

    #[test]
    fn builtin_shader_pair_speaks_the_harness_uniform_contract() {
        // Keep stable but not overly strict: the canonical names must appear.
        for name in ["uTime", "uResolution", "uMouse"] {
            assert!(
                glint_passes::DEFAULT_FRAG.contains(name),
                "default fragment source should declare {name}"
            );
        }
    }

    // ---- Panel ----

    #[test]
    fn panel_time_scale_survives_a_pause_round_trip() {
        let mut panel = ControlPanel::new();
        panel.on_key('f');
        panel.on_key('f');
        let fast = panel.params().time_scale;

        panel.on_key(' ');
        assert_eq!(panel.params().time_scale, 0.0);
        panel.on_key(' ');
        assert_eq!(panel.params().time_scale, fast);
    }
}
