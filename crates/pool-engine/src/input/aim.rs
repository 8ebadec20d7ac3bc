//! Cue aiming: drag state, shot computation and the shot-line preview.

use glam::Vec2;

use crate::core::ball::{Ball, Spin};

/// The pointer must be this close to the cue ball to start aiming.
pub const AIM_RADIUS: f32 = 150.0;
/// Drag length that fills the power indicator.
pub const MAX_DRAG_DISPLAY: f32 = 400.0;
/// A clear shot line is drawn this far past the cue ball.
pub const PREVIEW_LINE_LENGTH: f32 = 500.0;

const POWER_DIVISOR: f32 = 4.0;
const MAX_POWER: f32 = 250.0;
const PREVIEW_POWER_DIVISOR: f32 = 6.0;
const PREVIEW_MAX_POWER: f32 = 160.0;
/// Fraction of shot power that side spin throws sideways at launch.
const SIDE_SPIN_LAUNCH: f32 = 0.2;
const TOPSPIN_LAUNCH: f32 = 0.2;

/// A committed strike on the cue ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub direction: Vec2,
    pub power: f32,
    pub velocity: Vec2,
    pub spin: Spin,
}

/// Shot for a drag released at `drag_point`. The ball travels away from the
/// drag point; `None` when the drag ended on the ball centre.
pub fn compute_shot(cue_pos: Vec2, drag_point: Vec2, sensitivity: f32, spin: Spin) -> Option<Shot> {
    let pull = cue_pos - drag_point;
    let length = pull.length();
    if length <= f32::EPSILON {
        return None;
    }

    let direction = pull / length;
    let power = (length / POWER_DIVISOR).min(MAX_POWER) * sensitivity;
    let mut velocity = direction * power;

    if spin.is_significant() {
        velocity += direction.perp() * (spin.side * power * SIDE_SPIN_LAUNCH);
        velocity *= 1.0 + spin.top * TOPSPIN_LAUNCH;
    }

    Some(Shot { direction, power, velocity, spin })
}

/// Power shown while drawing the shot line.
pub fn preview_power(drag_length: f32, sensitivity: f32) -> f32 {
    (drag_length / PREVIEW_POWER_DIVISOR).min(PREVIEW_MAX_POWER) * sensitivity
}

/// Where the drawn shot line ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotPreview {
    /// The first ball the cue ball would touch.
    Contact {
        target: u8,
        /// Cue ball centre at the moment of contact (the ghost ball).
        ghost: Vec2,
        /// Direction the object ball leaves in.
        object_direction: Vec2,
    },
    Clear { end: Vec2 },
}

/// Trace the shot line from `cue` in `direction` and find the first ball hit.
pub fn predict_contact(cue: &Ball, direction: Vec2, balls: &[Ball]) -> ShotPreview {
    let mut nearest: Option<(f32, &Ball)> = None;

    for ball in balls.iter().filter(|b| !b.is_cue() && !b.is_pocketed()) {
        let to_ball = ball.pos - cue.pos;
        let along = to_ball.dot(direction);
        if along < 0.0 {
            continue;
        }
        let closest = cue.pos + direction * along;
        let miss = closest.distance(ball.pos);
        if miss < cue.radius + ball.radius && nearest.map_or(true, |(d, _)| along < d) {
            nearest = Some((along, ball));
        }
    }

    let Some((along, target)) = nearest else {
        return ShotPreview::Clear {
            end: cue.pos + direction * PREVIEW_LINE_LENGTH,
        };
    };

    let reach = cue.radius + target.radius;
    let closest = cue.pos + direction * along;
    let miss = closest.distance(target.pos);
    let back_off = (reach * reach - miss * miss).max(0.0).sqrt();
    let ghost = closest - direction * back_off;

    ShotPreview::Contact {
        target: target.number(),
        ghost,
        object_direction: (target.pos - ghost).normalize_or_zero(),
    }
}

/// Pointer and drag state for the cue. Pure data; the simulation decides
/// when the cue ball is held or struck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AimState {
    pub pointer: Vec2,
    /// Pointer is within `AIM_RADIUS` of a cue ball on the table.
    pub aiming: bool,
    drag: Option<Vec2>,
    /// Spin picked for the next shot.
    pub selected_spin: Spin,
}

impl AimState {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_point(&self) -> Option<Vec2> {
        self.drag
    }

    /// Follow the pointer. `cue` is the cue ball position, if it is on the table.
    pub fn track_pointer(&mut self, pointer: Vec2, cue: Option<Vec2>) {
        self.pointer = pointer;
        self.aiming = cue.is_some_and(|c| c.distance(pointer) < AIM_RADIUS);
        if let Some(drag) = self.drag.as_mut() {
            *drag = pointer;
        }
    }

    /// Start a drag if the pointer is in aiming range.
    pub fn begin_drag(&mut self, pointer: Vec2, cue: Option<Vec2>) -> bool {
        self.track_pointer(pointer, cue);
        if !self.aiming || self.drag.is_some() {
            return false;
        }
        self.drag = Some(pointer);
        true
    }

    /// End the drag, returning the release point.
    pub fn release(&mut self, pointer: Vec2) -> Option<Vec2> {
        self.pointer = pointer;
        self.drag.take().map(|_| pointer)
    }

    /// Abandon the drag without a shot.
    pub fn cancel(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Forget the selected spin once a shot has used it.
    pub fn clear_spin(&mut self) {
        self.selected_spin = Spin::NONE;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
