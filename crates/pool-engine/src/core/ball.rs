//! Ball entity and the per-frame integrator.
//!
//! Integration order for one active ball, once per frame:
//! 1. advance position, apply felt friction, snap creeping velocity to zero
//! 2. reflect off cushions unless the ball is entering a pocket mouth
//! 3. pocket pull / capture (capture ends the ball's frame)
//! 4. resolve contacts against every other ball on the table
//! 5. spin coupling
//! 6. side-spin reflection for cushion contacts

use glam::Vec2;

use crate::core::collision;
use crate::core::pocket::{classify, should_bounce, PocketEffect};
use crate::core::table::{Pocket, TableConfig};

/// Per-frame velocity multiplier from the felt.
pub const FRICTION: f32 = 0.99;
/// Velocity components below this magnitude are snapped to zero.
pub const REST_THRESHOLD: f32 = 0.01;
/// Velocity kept by the reflected component on a cushion bounce.
pub const CUSHION_DAMPING: f32 = 0.85;
/// Side spin kept (and inverted) on a cushion bounce.
pub const SIDE_SPIN_CUSHION_DAMPING: f32 = 0.8;

const SPIN_THRESHOLD: f32 = 0.01;
const SPIN_MIN_SPEED: f32 = 0.1;
const TOPSPIN_COUPLING: f32 = 0.015;
const SIDESPIN_COUPLING: f32 = 0.01;
const SPIN_DECAY: f32 = 0.98;

/// What a ball is, replacing the magic numbers 0 and 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallRole {
    Cue,
    Object(u8),
    EightBall,
}

impl BallRole {
    pub fn from_number(number: u8) -> Self {
        match number {
            0 => BallRole::Cue,
            8 => BallRole::EightBall,
            n => BallRole::Object(n),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            BallRole::Cue => 0,
            BallRole::EightBall => 8,
            BallRole::Object(n) => n,
        }
    }
}

/// Lifecycle of a ball on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallState {
    /// Integrated every frame.
    Active,
    /// Cue ball under the player's drag: on the table, but not integrated.
    Held,
    /// Off the table until explicitly respawned.
    Pocketed,
}

/// Rotational state in [-1, 1]. `top` > 0 is topspin, < 0 backspin;
/// `side` > 0 is right english.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub top: f32,
    pub side: f32,
}

impl Spin {
    pub const NONE: Spin = Spin {
        top: 0.0,
        side: 0.0,
    };

    pub fn new(top: f32, side: f32) -> Self {
        Self {
            top: top.clamp(-1.0, 1.0),
            side: side.clamp(-1.0, 1.0),
        }
    }

    /// Whether either component is large enough to have any effect.
    pub fn is_significant(&self) -> bool {
        self.top.abs() > SPIN_THRESHOLD || self.side.abs() > SPIN_THRESHOLD
    }
}

/// Which axes reflected off a cushion during this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CushionHits {
    pub x: bool,
    pub y: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame.
    pub vel: Vec2,
    pub radius: f32,
    pub role: BallRole,
    pub striped: bool,
    pub spin: Spin,
    pub state: BallState,
}

impl Ball {
    /// A ball at rest. Numbers 9-15 are striped.
    pub fn new(number: u8, pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            role: BallRole::from_number(number),
            striped: number > 8,
            spin: Spin::NONE,
            state: BallState::Active,
        }
    }

    /// Area-proportional mass.
    pub fn mass(&self) -> f32 {
        self.radius * self.radius
    }

    pub fn number(&self) -> u8 {
        self.role.number()
    }

    pub fn is_cue(&self) -> bool {
        self.role == BallRole::Cue
    }

    pub fn is_pocketed(&self) -> bool {
        self.state == BallState::Pocketed
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass() * self.vel.length_squared()
    }

    /// Put the ball back on the table at rest with no spin.
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.spin = Spin::NONE;
        self.state = BallState::Active;
    }

    /// Step 1: move, apply friction, snap creeping components.
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.vel *= FRICTION;
        if self.vel.x.abs() < REST_THRESHOLD {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < REST_THRESHOLD {
            self.vel.y = 0.0;
        }
    }

    /// Step 2: clamp and reflect against each cushion the ball has crossed,
    /// unless it is heading into a pocket mouth.
    pub fn bounce_cushions(&mut self, table: &TableConfig, pockets: &[Pocket]) -> CushionHits {
        let bounds = table.playable_bounds(self.radius);
        let mut hits = CushionHits::default();

        if self.pos.x > bounds.max.x && should_bounce(self.pos, pockets, table) {
            self.pos.x = bounds.max.x;
            self.vel.x = -self.vel.x * CUSHION_DAMPING;
            hits.x = true;
        }
        if self.pos.x < bounds.min.x && should_bounce(self.pos, pockets, table) {
            self.pos.x = bounds.min.x;
            self.vel.x = -self.vel.x * CUSHION_DAMPING;
            hits.x = true;
        }
        if self.pos.y > bounds.max.y && should_bounce(self.pos, pockets, table) {
            self.pos.y = bounds.max.y;
            self.vel.y = -self.vel.y * CUSHION_DAMPING;
            hits.y = true;
        }
        if self.pos.y < bounds.min.y && should_bounce(self.pos, pockets, table) {
            self.pos.y = bounds.min.y;
            self.vel.y = -self.vel.y * CUSHION_DAMPING;
            hits.y = true;
        }

        hits
    }

    /// Step 5: couple spin into velocity, then decay it.
    ///
    /// The resulting speed is capped at `ceiling`; the integrator passes the
    /// speed the ball had on entering its frame, so topspin can cancel
    /// friction but never accelerate the ball beyond it.
    pub fn apply_spin(&mut self, ceiling: f32) {
        if self.spin.top.abs() > SPIN_THRESHOLD {
            let speed = self.speed();
            if speed > SPIN_MIN_SPEED {
                let along = self.vel / speed;
                self.vel += along * (self.spin.top * speed * TOPSPIN_COUPLING);
            }
            self.spin.top *= SPIN_DECAY;
        } else {
            self.spin.top = 0.0;
        }

        if self.spin.side.abs() > SPIN_THRESHOLD {
            let speed = self.speed();
            if speed > SPIN_MIN_SPEED {
                let across = self.vel.perp() / speed;
                self.vel += across * (self.spin.side * speed * SIDESPIN_COUPLING);
            }
            self.spin.side *= SPIN_DECAY;
        } else {
            self.spin.side = 0.0;
        }

        let speed = self.speed();
        if speed > ceiling && speed > 0.0 {
            self.vel *= ceiling / speed;
        }
    }

    /// Step 6: a cushion contact inverts and damps side spin, once per axis.
    pub fn reflect_side_spin(
        &mut self,
        hits: CushionHits,
        table: &TableConfig,
        pockets: &[Pocket],
    ) {
        let bounds = table.playable_bounds(self.radius);
        let beyond_x = bounds.crosses_x(self.pos) && should_bounce(self.pos, pockets, table);
        let beyond_y = bounds.crosses_y(self.pos) && should_bounce(self.pos, pockets, table);

        if hits.x || beyond_x {
            self.spin.side = -self.spin.side * SIDE_SPIN_CUSHION_DAMPING;
        }
        if hits.y || beyond_y {
            self.spin.side = -self.spin.side * SIDE_SPIN_CUSHION_DAMPING;
        }
    }
}

/// A ball-ball contact recorded during a ball's update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub other: u8,
    pub contact: collision::Contact,
}

/// What happened to one ball during its update.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Pocketed or held: nothing integrated.
    Skipped,
    Moved { impacts: Vec<Impact> },
    /// Dropped into `pockets[pocket]`; the rest of the frame was skipped.
    Captured { pocket: usize },
}

/// Borrow two distinct balls mutably.
fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = balls.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = balls.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

/// Run one frame of integration for `balls[index]`.
pub fn integrate(
    balls: &mut [Ball],
    index: usize,
    table: &TableConfig,
    pockets: &[Pocket],
) -> StepOutcome {
    if balls[index].state != BallState::Active {
        return StepOutcome::Skipped;
    }

    let ball = &mut balls[index];
    let entry_speed = ball.speed();
    ball.advance();
    let hits = ball.bounce_cushions(table, pockets);

    for (pocket_index, pocket) in pockets.iter().enumerate() {
        match classify(ball.pos, pocket, ball.radius, table) {
            PocketEffect::Pull(pull) => ball.vel += pull,
            PocketEffect::Capture => {
                ball.state = BallState::Pocketed;
                return StepOutcome::Captured {
                    pocket: pocket_index,
                };
            }
            PocketEffect::Miss => {}
        }
    }

    let mut impacts = Vec::new();
    for other in 0..balls.len() {
        if other == index || balls[other].is_pocketed() {
            continue;
        }
        let (this, that) = pair_mut(balls, index, other);
        if let Some(contact) = collision::resolve(this, that) {
            impacts.push(Impact {
                other: that.number(),
                contact,
            });
        }
    }

    let ball = &mut balls[index];
    let ceiling = entry_speed.max(ball.speed());
    ball.apply_spin(ceiling);
    ball.reflect_side_spin(hits, table, pockets);

    StepOutcome::Moved { impacts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableConfig {
        TableConfig::default()
    }

    fn rolling(number: u8, pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(number, pos, 20.0);
        ball.vel = vel;
        ball
    }

    #[test]
    fn roles_replace_magic_numbers() {
        assert_eq!(BallRole::from_number(0), BallRole::Cue);
        assert_eq!(BallRole::from_number(8), BallRole::EightBall);
        assert_eq!(BallRole::from_number(11), BallRole::Object(11));
        assert_eq!(BallRole::Object(11).number(), 11);
        assert!(Ball::new(12, Vec2::ZERO, 20.0).striped);
        assert!(!Ball::new(7, Vec2::ZERO, 20.0).striped);
    }

    #[test]
    fn advance_applies_friction_and_snaps() {
        let mut ball = rolling(1, Vec2::new(500.0, 400.0), Vec2::new(10.0, 0.005));
        ball.advance();
        assert!((ball.pos - Vec2::new(510.0, 400.005)).length() < 1e-4);
        assert!((ball.vel.x - 9.9).abs() < 1e-5);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn cushion_reflects_and_damps() {
        let t = table();
        let pockets = t.pockets();
        let mut ball = rolling(1, Vec2::new(1205.0, 450.0), Vec2::new(10.0, 0.0));
        ball.advance();
        let hits = ball.bounce_cushions(&t, &pockets);
        assert!(hits.x && !hits.y);
        assert_eq!(ball.pos.x, 1210.0);
        assert!((ball.vel.x + 9.9 * CUSHION_DAMPING).abs() < 1e-4);
    }

    #[test]
    fn pocket_mouth_suppresses_cushion() {
        let t = table();
        let pockets = t.pockets();
        // Crossing the left boundary right next to the top-left pocket.
        let mut ball = rolling(1, Vec2::new(192.0, 195.0), Vec2::new(-4.0, -4.0));
        ball.advance();
        let hits = ball.bounce_cushions(&t, &pockets);
        assert_eq!(hits, CushionHits::default());
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn topspin_outruns_plain_roll_and_backspin_lags() {
        let start = Vec2::new(300.0, 450.0);
        let mut plain = rolling(0, start, Vec2::new(5.0, 0.0));
        let mut top = plain.clone();
        top.spin = Spin::new(1.0, 0.0);
        let mut back = plain.clone();
        back.spin = Spin::new(-1.0, 0.0);

        for _ in 0..20 {
            for ball in [&mut plain, &mut top, &mut back] {
                let entry = ball.speed();
                ball.advance();
                ball.apply_spin(entry);
            }
        }
        assert!(top.speed() > plain.speed());
        assert!(back.speed() < plain.speed());
        assert!(top.speed() <= 5.0 + 1e-4);
    }

    #[test]
    fn side_spin_curves_the_path() {
        let mut ball = rolling(0, Vec2::new(300.0, 450.0), Vec2::new(5.0, 0.0));
        ball.spin = Spin::new(0.0, 1.0);
        ball.apply_spin(f32::INFINITY);
        assert!(ball.vel.y > 0.0, "vel {:?}", ball.vel);
        assert!((ball.vel.y - 0.05).abs() < 1e-5);
    }

    #[test]
    fn spin_decays_monotonically_to_zero() {
        let mut ball = rolling(0, Vec2::new(300.0, 450.0), Vec2::new(3.0, 1.0));
        ball.spin = Spin::new(0.9, -0.7);
        let mut last = ball.spin;
        for _ in 0..1000 {
            ball.apply_spin(f32::INFINITY);
            assert!(ball.spin.top.abs() <= last.top.abs());
            assert!(ball.spin.side.abs() <= last.side.abs());
            last = ball.spin;
        }
        assert_eq!(ball.spin, Spin::NONE);
    }

    #[test]
    fn spin_is_inert_at_rest() {
        let mut ball = rolling(0, Vec2::new(300.0, 450.0), Vec2::ZERO);
        ball.spin = Spin::new(1.0, 1.0);
        ball.apply_spin(f32::INFINITY);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert!(ball.spin.top < 1.0);
    }

    #[test]
    fn cushion_bounce_reverses_side_spin() {
        let t = table();
        let pockets = t.pockets();
        let mut ball = rolling(0, Vec2::new(1205.0, 450.0), Vec2::new(10.0, 0.0));
        ball.spin = Spin::new(0.0, 0.5);
        let hits = CushionHits { x: true, y: false };
        ball.reflect_side_spin(hits, &t, &pockets);
        assert!((ball.spin.side + 0.4).abs() < 1e-6);
    }

    #[test]
    fn integrate_skips_pocketed_and_held() {
        let t = table();
        let pockets = t.pockets();
        let mut balls = vec![rolling(0, Vec2::new(400.0, 400.0), Vec2::new(3.0, 0.0))];
        balls[0].state = BallState::Held;
        assert_eq!(integrate(&mut balls, 0, &t, &pockets), StepOutcome::Skipped);
        assert_eq!(balls[0].pos, Vec2::new(400.0, 400.0));

        balls[0].state = BallState::Pocketed;
        assert_eq!(integrate(&mut balls, 0, &t, &pockets), StepOutcome::Skipped);
    }

    #[test]
    fn integrate_captures_into_corner() {
        let t = table();
        let pockets = t.pockets();
        let mut balls = vec![rolling(3, Vec2::new(180.0, 180.0), Vec2::new(-5.0, -5.0))];
        let outcome = integrate(&mut balls, 0, &t, &pockets);
        assert_eq!(outcome, StepOutcome::Captured { pocket: 0 });
        assert!(balls[0].is_pocketed());
    }

    #[test]
    fn integrate_records_impacts() {
        let t = table();
        let pockets = t.pockets();
        let mut balls = vec![
            rolling(0, Vec2::new(500.0, 450.0), Vec2::new(6.0, 0.0)),
            rolling(5, Vec2::new(544.0, 450.0), Vec2::ZERO),
        ];
        match integrate(&mut balls, 0, &t, &pockets) {
            StepOutcome::Moved { impacts } => {
                assert_eq!(impacts.len(), 1);
                assert_eq!(impacts[0].other, 5);
                assert!(impacts[0].contact.is_audible());
            }
            other => panic!("expected movement, got {:?}", other),
        }
        assert!(balls[1].vel.x > 5.0);
        assert!(balls[0].pos.distance(balls[1].pos) >= 40.0 - 1e-3);
    }

    #[test]
    fn integrate_ignores_pocketed_neighbours() {
        let t = table();
        let pockets = t.pockets();
        let mut balls = vec![
            rolling(0, Vec2::new(500.0, 450.0), Vec2::new(6.0, 0.0)),
            rolling(5, Vec2::new(530.0, 450.0), Vec2::ZERO),
        ];
        balls[1].state = BallState::Pocketed;
        assert_eq!(
            integrate(&mut balls, 0, &t, &pockets),
            StepOutcome::Moved {
                impacts: Vec::new()
            }
        );
        assert_eq!(balls[1].vel, Vec2::ZERO);
    }

    #[test]
    fn frame_energy_never_increases_with_spin() {
        let t = table();
        let pockets = t.pockets();
        let mut balls = vec![
            rolling(0, Vec2::new(400.0, 450.0), Vec2::new(7.0, 1.0)),
            rolling(2, Vec2::new(700.0, 420.0), Vec2::new(-4.0, 2.0)),
            rolling(9, Vec2::new(900.0, 600.0), Vec2::new(0.0, -3.0)),
        ];
        balls[0].spin = Spin::new(1.0, 0.6);
        balls[1].spin = Spin::new(0.8, -1.0);

        for _ in 0..120 {
            let before: f32 = balls.iter().map(Ball::kinetic_energy).sum();
            for i in 0..balls.len() {
                integrate(&mut balls, i, &t, &pockets);
            }
            let after: f32 = balls.iter().map(Ball::kinetic_energy).sum();
            assert!(after <= before * (1.0 + 1e-5), "energy rose {} -> {}", before, after);
        }
    }
}
