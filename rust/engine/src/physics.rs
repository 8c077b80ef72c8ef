//! Cosmetic wheel and ball motion.
//!
//! Nothing here decides an outcome. The pocket is drawn up front by the
//! [`crate::spin::SpinGenerator`]; once the ball has slowed down it is snapped
//! onto that pocket so the picture agrees with the result.

use std::f64::consts::{PI, TAU};

use rand::Rng;

use crate::wheel::{pocket_at_index, Pocket, POCKET_COUNT};

/// Angular width of one pocket in radians.
pub const ANGLE_PER_POCKET: f64 = TAU / POCKET_COUNT as f64;

const WHEEL_FRICTION: f64 = 0.999;
const BALL_FRICTION: f64 = 0.9975;
const WHEEL_MIN_SPEED: f64 = 0.01;
const BALL_MIN_SPEED: f64 = 0.2;
const BALL_DROP_SPEED: f64 = 0.45;
const DROP_DELAY: f64 = 1.2;

/// Wrap an angle into `[0, 2π)`.
pub fn angle_wrap(a: f64) -> f64 {
    let r = a.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// The pocket under the ball, in the wheel's rotating frame. Pocket zero
/// spans `[0, ANGLE_PER_POCKET)` and the rest follow clockwise.
pub fn pocket_under_ball(wheel_angle: f64, ball_angle: f64) -> Pocket {
    let rel = angle_wrap(ball_angle - wheel_angle);
    let idx = (rel / ANGLE_PER_POCKET) as usize % POCKET_COUNT;
    pocket_at_index(idx)
}

/// Angular span of one pocket for a given wheel rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PocketSegment {
    pub pocket: Pocket,
    pub start: f64,
    pub end: f64,
}

impl PocketSegment {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Every pocket's span, clockwise from zero, rotated by `rotation`.
///
/// This is the one geometry routine renderers draw from; a still wheel is
/// simply `rotation = 0`.
pub fn pocket_segments(rotation: f64) -> impl Iterator<Item = PocketSegment> {
    (0..POCKET_COUNT).map(move |i| {
        let start = rotation + i as f64 * ANGLE_PER_POCKET;
        PocketSegment {
            pocket: pocket_at_index(i),
            start,
            end: start + ANGLE_PER_POCKET,
        }
    })
}

/// Points along an arc of `radius` around `(cx, cy)` with angle zero at the
/// top and angles increasing clockwise (screen coordinates, y down).
pub fn arc_points(cx: f64, cy: f64, radius: f64, a0: f64, a1: f64, steps: usize) -> Vec<(f64, f64)> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = a0 + (a1 - a0) * i as f64 / steps as f64;
            (cx + radius * t.sin(), cy - radius * t.cos())
        })
        .collect()
}

/// Closed polygon for one pocket wedge between two radii.
pub fn wedge_polygon(cx: f64, cy: f64, r_outer: f64, r_inner: f64, seg: &PocketSegment) -> Vec<(f64, f64)> {
    let mut pts = arc_points(cx, cy, r_outer, seg.start, seg.end, 6);
    pts.extend(arc_points(cx, cy, r_inner, seg.end, seg.start, 6));
    pts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    Idle,
    Spinning,
    Settled,
}

/// Wheel and ball angles with simple friction.
#[derive(Debug, Clone)]
pub struct WheelMotion {
    wheel_angle: f64,
    ball_angle: f64,
    wheel_velocity: f64,
    ball_velocity: f64,
    drop_timer: f64,
    target: Option<Pocket>,
    phase: MotionPhase,
}

impl Default for WheelMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl WheelMotion {
    /// Wheel at rest with the ball opposite pocket zero.
    pub fn new() -> Self {
        Self {
            wheel_angle: 0.0,
            ball_angle: PI,
            wheel_velocity: 0.0,
            ball_velocity: 0.0,
            drop_timer: 0.0,
            target: None,
            phase: MotionPhase::Idle,
        }
    }

    pub fn wheel_angle(&self) -> f64 {
        self.wheel_angle
    }
    pub fn ball_angle(&self) -> f64 {
        self.ball_angle
    }
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }
    pub fn is_spinning(&self) -> bool {
        self.phase == MotionPhase::Spinning
    }

    /// Start a spin that will come to rest on `target`. Launch angles and
    /// speeds come from `rng`, which should not be the outcome generator.
    pub fn launch<R: Rng + ?Sized>(&mut self, target: Pocket, rng: &mut R) {
        let eighth = TAU / 8.0;
        self.wheel_angle = rng.random::<f64>() * TAU;
        self.ball_angle = rng.random::<f64>() * TAU;
        // slow wheel one way, fast ball the other
        self.wheel_velocity = -rng.random_range(0.9..1.2) * eighth;
        self.ball_velocity = rng.random_range(5.0..6.5) * eighth;
        self.drop_timer = 0.0;
        self.target = Some(target);
        self.phase = MotionPhase::Spinning;
    }

    /// Advance by `dt`. Returns the target pocket on the tick the ball comes
    /// to rest, `None` otherwise.
    pub fn tick(&mut self, dt: f64) -> Option<Pocket> {
        if self.phase != MotionPhase::Spinning {
            return None;
        }

        self.wheel_velocity *= WHEEL_FRICTION;
        self.ball_velocity *= BALL_FRICTION;
        if self.wheel_velocity.abs() < WHEEL_MIN_SPEED {
            self.wheel_velocity = WHEEL_MIN_SPEED.copysign(self.wheel_velocity);
        }
        if self.ball_velocity.abs() < BALL_MIN_SPEED {
            self.ball_velocity = BALL_MIN_SPEED.copysign(self.ball_velocity);
        }

        self.wheel_angle = angle_wrap(self.wheel_angle + self.wheel_velocity * dt);
        self.ball_angle = angle_wrap(self.ball_angle + self.ball_velocity * dt);

        if self.ball_velocity.abs() < BALL_DROP_SPEED {
            self.drop_timer += dt;
            if self.drop_timer > DROP_DELAY {
                let target = self.target.take()?;
                self.snap_ball_to(target);
                self.phase = MotionPhase::Settled;
                return Some(target);
            }
        }
        None
    }

    fn snap_ball_to(&mut self, pocket: Pocket) {
        let idx = pocket.wheel_index() as f64;
        self.ball_angle = angle_wrap(self.wheel_angle + (idx + 0.5) * ANGLE_PER_POCKET);
        self.ball_velocity = 0.0;
        self.wheel_velocity = 0.0;
    }

    pub fn pocket_under_ball(&self) -> Pocket {
        pocket_under_ball(self.wheel_angle, self.ball_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn segments_cover_the_circle() {
        let segs: Vec<PocketSegment> = pocket_segments(0.3).collect();
        assert_eq!(segs.len(), POCKET_COUNT);
        assert_eq!(segs[0].pocket, Pocket::ZERO);
        let span = segs[36].end - segs[0].start;
        assert!((span - TAU).abs() < 1e-9);
    }

    #[test]
    fn pocket_under_ball_matches_segment_centers() {
        let rotation = 1.234;
        for seg in pocket_segments(rotation) {
            assert_eq!(pocket_under_ball(rotation, seg.center()), seg.pocket);
        }
    }

    #[test]
    fn angle_wrap_stays_in_range() {
        for a in [-10.0, -TAU, -1e-18, 0.0, TAU, 100.0] {
            let w = angle_wrap(a);
            assert!((0.0..TAU).contains(&w), "{} wrapped to {}", a, w);
        }
    }

    #[test]
    fn motion_settles_on_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for n in [0u8, 17, 26, 32] {
            let target = Pocket::new(n).unwrap();
            let mut m = WheelMotion::new();
            m.launch(target, &mut rng);
            let mut landed = None;
            for _ in 0..10_000 {
                if let Some(p) = m.tick(1.0 / 3.6) {
                    landed = Some(p);
                    break;
                }
            }
            assert_eq!(landed, Some(target));
            assert_eq!(m.phase(), MotionPhase::Settled);
            assert_eq!(m.pocket_under_ball(), target);
            assert_eq!(m.tick(0.1), None);
        }
    }

    #[test]
    fn wedge_has_both_arcs() {
        let seg = pocket_segments(0.0).next().unwrap();
        let poly = wedge_polygon(450.0, 450.0, 360.0, 260.0, &seg);
        assert_eq!(poly.len(), 14);
        // first point is straight above the center on the outer rim
        assert!((poly[0].0 - 450.0).abs() < 1e-9);
        assert!((poly[0].1 - 90.0).abs() < 1e-9);
    }
}
