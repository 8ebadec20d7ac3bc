//! Pocket classification: capture, pull toward the pocket, or leave the
//! ball to the cushions.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

use glam::Vec2;

use crate::core::table::{Pocket, PocketKind, TableConfig};

/// Fraction of the ball radius subtracted from the capture distance.
const SAFETY_MARGIN: f32 = 0.5;
/// Corner pull zone extends to this multiple of the effective radius.
const PULL_ZONE: f32 = 1.5;
/// Pull vector = (pocket - ball) * PULL_STRENGTH * sensitivity.
const PULL_STRENGTH: f32 = 0.8;
/// Middle pockets only accept entries within this angle of straight-on.
const MIDDLE_CAPTURE_ANGLE: f32 = FRAC_PI_3;

// Cushion exclusion zones, as multiples of `TableConfig::pocket_radius`.
const CORNER_CLEARANCE: f32 = 2.0;
const MIDDLE_CLEARANCE: f32 = 1.8;
const MIDDLE_CLEARANCE_ANGLE: f32 = FRAC_PI_2;
const FALLBACK_CLEARANCE: f32 = 1.5;

/// Result of testing one ball position against one pocket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PocketEffect {
    /// Not interacting with this pocket.
    Miss,
    /// Close to a corner mouth on a good line: add this to the velocity.
    Pull(Vec2),
    /// The ball drops.
    Capture,
}

/// Wrap an angle into [-PI, PI).
pub fn normalize_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Absolute angular distance between the pocket->ball direction and `reference`.
fn angle_off(offset: Vec2, reference: f32) -> f32 {
    normalize_angle(offset.y.atan2(offset.x) - reference).abs()
}

/// Classify a ball at `position` against `pocket`. Pure function of its inputs.
pub fn classify(
    position: Vec2,
    pocket: &Pocket,
    ball_radius: f32,
    table: &TableConfig,
) -> PocketEffect {
    let offset = position - pocket.position;
    let dist = offset.length();
    let sensitivity = table.pocket_sensitivity;
    let radius = pocket.effective_radius(table);
    let capture_dist = radius + ball_radius - ball_radius * SAFETY_MARGIN;

    match pocket.kind {
        PocketKind::Corner(corner) => {
            if dist < capture_dist {
                return PocketEffect::Capture;
            }
            if dist < radius * PULL_ZONE
                && angle_off(offset, corner.ideal_angle()) < table.corner_pocket_angle * sensitivity
            {
                let pull = (pocket.position - position) * PULL_STRENGTH * sensitivity;
                return PocketEffect::Pull(pull);
            }
        }
        PocketKind::Middle(rail) => {
            if dist < capture_dist
                && angle_off(offset, rail.approach_angle()) < MIDDLE_CAPTURE_ANGLE * sensitivity
            {
                return PocketEffect::Capture;
            }
        }
    }

    PocketEffect::Miss
}

/// Whether `position` lies in the cushion exclusion zone around `pocket`.
fn near_pocket_mouth(position: Vec2, pocket: &Pocket, table: &TableConfig) -> bool {
    let offset = position - pocket.position;
    let dist = offset.length();
    let scaled = table.pocket_radius * table.pocket_sensitivity;

    let matched = match pocket.kind {
        PocketKind::Corner(_) => dist < scaled * CORNER_CLEARANCE,
        PocketKind::Middle(rail) => {
            dist < scaled * MIDDLE_CLEARANCE
                && angle_off(offset, rail.approach_angle())
                    < MIDDLE_CLEARANCE_ANGLE * table.pocket_sensitivity
        }
    };

    // Looser catch-all so no pocket mouth ever reflects a ball sitting inside it.
    matched || dist < scaled * FALLBACK_CLEARANCE
}

/// Returns false when a cushion must not reflect a ball at `position`
/// because it is entering a pocket mouth.
pub fn should_bounce(position: Vec2, pockets: &[Pocket], table: &TableConfig) -> bool {
    !pockets.iter().any(|p| near_pocket_mouth(position, p, table))
}
