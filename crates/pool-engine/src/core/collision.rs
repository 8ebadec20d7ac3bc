//! Pairwise ball-ball collision response.
//!
//! Velocities are split into components along the contact normal and the
//! tangent. The normal components go through the 1D elastic collision
//! formula for the two masses; tangents pass through untouched; both results
//! are then scaled by the restitution coefficient. Overlap is split evenly
//! so the pair ends exactly touching.

use crate::core::ball::Ball;

/// Energy kept by both balls on impact.
pub const RESTITUTION: f32 = 0.95;

/// Post-impact relative speed above which the impact is audible.
pub const IMPACT_SOUND_SPEED: f32 = 2.0;

/// Centre distance below which two balls are treated as coincident.
const COINCIDENT_EPSILON: f32 = 1e-6;

/// A resolved contact between two balls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Relative speed of the pair after resolution (px/frame).
    pub relative_speed: f32,
}

impl Contact {
    pub fn is_audible(&self) -> bool {
        self.relative_speed > IMPACT_SOUND_SPEED
    }
}

/// Resolve `a` against `b` with the table's restitution.
pub fn resolve(a: &mut Ball, b: &mut Ball) -> Option<Contact> {
    resolve_with_restitution(a, b, RESTITUTION)
}

/// Resolve an overlapping pair in place. Returns `None` when the balls do
/// not overlap, or when their centres coincide and no normal exists.
pub fn resolve_with_restitution(a: &mut Ball, b: &mut Ball, restitution: f32) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;
    if dist >= min_dist || dist < COINCIDENT_EPSILON {
        return None;
    }

    let m1 = a.mass();
    let m2 = b.mass();
    let total = m1 + m2;
    if total <= 0.0 {
        return None;
    }

    let normal = delta / dist;
    let tangent = normal.perp();

    let v1n = a.vel.dot(normal);
    let v2n = b.vel.dot(normal);
    let v1t = a.vel.dot(tangent);
    let v2t = b.vel.dot(tangent);

    let new_v1n = (v1n * (m1 - m2) + 2.0 * m2 * v2n) / total;
    let new_v2n = (v2n * (m2 - m1) + 2.0 * m1 * v1n) / total;

    a.vel = (tangent * v1t + normal * new_v1n) * restitution;
    b.vel = (tangent * v2t + normal * new_v2n) * restitution;

    let half_overlap = (min_dist - dist) / 2.0;
    a.pos -= normal * half_overlap;
    b.pos += normal * half_overlap;

    Some(Contact {
        relative_speed: (a.vel - b.vel).length(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn ball_at(number: u8, x: f32, y: f32, vel: Vec2) -> Ball {
        let mut ball = Ball::new(number, Vec2::new(x, y), 20.0);
        ball.vel = vel;
        ball
    }

    #[test]
    fn separated_balls_do_not_interact() {
        let mut a = ball_at(0, 100.0, 100.0, Vec2::new(5.0, 0.0));
        let mut b = ball_at(1, 141.0, 100.0, Vec2::ZERO);
        assert!(resolve(&mut a, &mut b).is_none());
        assert_eq!(a.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn head_on_transfers_normal_velocity() {
        let mut cue = ball_at(0, 100.0, 100.0, Vec2::new(10.0, 0.0));
        let mut object = ball_at(1, 139.0, 100.0, Vec2::ZERO);
        let contact = resolve(&mut cue, &mut object).expect("overlapping pair");
        assert!(cue.vel.length() < 1e-4, "cue vel {:?}", cue.vel);
        assert!((object.vel.x - 9.5).abs() < 1e-4, "object vel {:?}", object.vel);
        assert!(object.vel.y.abs() < 1e-4);
        assert!(contact.is_audible());
    }

    #[test]
    fn momentum_along_normal_conserved_without_restitution_loss() {
        let mut a = ball_at(0, 0.0, 0.0, Vec2::new(3.0, 1.5));
        let mut b = ball_at(1, 30.0, 20.0, Vec2::new(-2.0, 0.5));
        let normal = (b.pos - a.pos).normalize();
        let before = a.mass() * a.vel.dot(normal) + b.mass() * b.vel.dot(normal);
        resolve_with_restitution(&mut a, &mut b, 1.0).expect("overlapping pair");
        let after = a.mass() * a.vel.dot(normal) + b.mass() * b.vel.dot(normal);
        assert!((before - after).abs() / a.mass() < 1e-4, "before={} after={}", before, after);
    }

    #[test]
    fn tangent_components_pass_through() {
        let mut a = ball_at(0, 0.0, 0.0, Vec2::new(0.0, 4.0));
        let mut b = ball_at(1, 35.0, 0.0, Vec2::ZERO);
        resolve_with_restitution(&mut a, &mut b, 1.0).expect("overlapping pair");
        // Normal is +x, so a's motion is purely tangential.
        assert!((a.vel - Vec2::new(0.0, 4.0)).length() < 1e-5);
        assert!(b.vel.length() < 1e-5);
    }

    #[test]
    fn resolved_pair_no_longer_overlaps() {
        let mut a = ball_at(0, 0.0, 0.0, Vec2::new(1.0, 0.0));
        let mut b = ball_at(1, 12.0, 9.0, Vec2::new(-1.0, 0.5));
        resolve(&mut a, &mut b).expect("overlapping pair");
        let dist = a.pos.distance(b.pos);
        assert!(dist >= 40.0 - 1e-3, "dist {}", dist);
    }

    #[test]
    fn resolution_is_symmetric() {
        let a0 = ball_at(0, 0.0, 0.0, Vec2::new(2.0, -1.0));
        let b0 = ball_at(1, 25.0, 15.0, Vec2::new(-3.0, 0.25));

        let (mut a1, mut b1) = (a0.clone(), b0.clone());
        let c1 = resolve(&mut a1, &mut b1).expect("overlapping pair");

        let (mut a2, mut b2) = (a0.clone(), b0.clone());
        let c2 = resolve(&mut b2, &mut a2).expect("overlapping pair");

        assert!((a1.vel - a2.vel).length() < 1e-4);
        assert!((b1.vel - b2.vel).length() < 1e-4);
        assert!((a1.pos - a2.pos).length() < 1e-4);
        assert!((b1.pos - b2.pos).length() < 1e-4);
        assert!((c1.relative_speed - c2.relative_speed).abs() < 1e-4);
    }

    #[test]
    fn coincident_centres_are_a_no_op() {
        let mut a = ball_at(0, 50.0, 50.0, Vec2::new(1.0, 1.0));
        let mut b = ball_at(1, 50.0, 50.0, Vec2::new(-1.0, 0.0));
        assert!(resolve(&mut a, &mut b).is_none());
        assert_eq!(a.vel, Vec2::new(1.0, 1.0));
        assert_eq!(b.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn gentle_touch_is_silent() {
        let mut a = ball_at(0, 0.0, 0.0, Vec2::new(0.5, 0.0));
        let mut b = ball_at(1, 39.0, 0.0, Vec2::ZERO);
        let contact = resolve(&mut a, &mut b).expect("overlapping pair");
        assert!(!contact.is_audible());
    }
}
