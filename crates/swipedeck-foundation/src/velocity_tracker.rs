//! Release velocity estimation for drag gestures.
//!
//! Uses the impulse strategy: the velocity is derived from the kinetic energy
//! the pointer imparted over its recent samples, which is less jumpy than a
//! plain last-two-samples slope on noisy touch input.

use swipedeck_ui_graphics::Point;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window before the newest one count.
const HORIZON_MS: i64 = 100;

/// A gap longer than this between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default, Debug)]
struct Sample {
    time_ms: i64,
    value: f32,
}

/// Single-axis velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample {
            time_ms,
            value: position,
        });
    }

    /// Velocity in units/second, or 0.0 without at least two recent samples.
    pub fn calculate_velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut sample_count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut current_index = self.index;
        let mut later = newest;
        while let Some(sample) = self.samples[current_index] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (later.time_ms - sample.time_ms).abs() as f32;
            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }
            later = sample;

            positions[sample_count] = sample.value;
            times[sample_count] = -age;

            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };

            sample_count += 1;
            if sample_count >= HISTORY_SIZE {
                break;
            }
        }

        if sample_count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions, &times, sample_count) * 1000.0
    }

    /// Velocity in units/second, clamped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }

        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }

        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Velocity per millisecond from samples ordered newest first.
fn impulse_velocity(
    positions: &[f32; HISTORY_SIZE],
    times: &[f32; HISTORY_SIZE],
    sample_count: usize,
) -> f32 {
    let mut work = 0.0f32;
    let start = sample_count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let v_curr = (positions[i - 1] - positions[i]) / (next_time - current_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = ½·m·v² with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

/// Two-axis tracker fed with pointer positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_ms: i64, position: Point) {
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    pub fn calculate_velocity(&self) -> Point {
        Point::new(self.x.calculate_velocity(), self.y.calculate_velocity())
    }

    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> Point {
        Point::new(
            self.x.calculate_velocity_with_max(max_velocity),
            self.y.calculate_velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_returns_zero() {
        let tracker = VelocityTracker1D::new();
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn single_point_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn constant_velocity() {
        let mut tracker = VelocityTracker1D::new();
        // 100 px per 10ms = 10000 px/s
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        tracker.add_data_point(20, 200.0);
        tracker.add_data_point(30, 300.0);

        let velocity = tracker.calculate_velocity();
        assert!(
            (velocity - 10000.0).abs() < 1000.0,
            "Expected ~10000, got {}",
            velocity
        );
    }

    #[test]
    fn negative_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);

        let velocity = tracker.calculate_velocity();
        assert!(velocity < 0.0, "Expected negative velocity, got {}", velocity);
    }

    #[test]
    fn velocity_capped() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(1, 10_000.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), 8_000.0);

        tracker.reset();
        tracker.add_data_point(0, 10_000.0);
        tracker.add_data_point(1, 0.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), -8_000.0);
    }

    #[test]
    fn paused_pointer_has_no_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(ASSUME_STOPPED_MS + 1, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn short_pause_keeps_earlier_motion() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(30, 300.0);
        tracker.add_data_point(60, 300.0);
        assert!(tracker.calculate_velocity() > 0.0);
    }

    #[test]
    fn samples_past_the_horizon_are_ignored() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, -10_000.0);
        for time_ms in (30..=150).step_by(30) {
            tracker.add_data_point(time_ms, 0.0);
        }
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn two_axis_tracker_reports_each_axis() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Point::new(0.0, 0.0));
        tracker.add_position(10, Point::new(10.0, -5.0));
        tracker.add_position(20, Point::new(20.0, -10.0));
        let velocity = tracker.calculate_velocity();
        assert!(velocity.x > 500.0);
        assert!(velocity.y < -250.0);

        tracker.reset();
        assert_eq!(tracker.calculate_velocity(), Point::ZERO);
    }
}
