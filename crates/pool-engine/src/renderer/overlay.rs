//! Aiming overlay: cue direction, power, spin marker and the predicted
//! contact, packed for the host to draw over the table.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::core::simulation::Simulation;
use crate::input::aim::{predict_contact, preview_power, ShotPreview, MAX_DRAG_DISPLAY};

/// Spin marker offset from the cue ball centre, in cue-ball radii.
const SPIN_MARKER_REACH: f32 = 0.6;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OverlayInstance {
    /// Bit 0: aiming. Bit 1: dragging. Bit 2: contact predicted.
    pub flags: f32,
    pub cue_x: f32,
    pub cue_y: f32,
    /// Cue ball to pointer, radians.
    pub aim_angle: f32,
    /// Drag distance and its share of the power indicator, 0-1.
    pub drag_length: f32,
    pub power_fraction: f32,
    pub preview_power: f32,
    pub marker_x: f32,
    pub marker_y: f32,
    /// Shot line end: the ghost ball on contact, else a point ahead of the cue.
    pub line_end_x: f32,
    pub line_end_y: f32,
    pub object_dir_x: f32,
    pub object_dir_y: f32,
    /// Ball number about to be struck, -1 when none.
    pub target: f32,
    pub _pad: [f32; 2],
}

impl OverlayInstance {
    pub const FLOATS: usize = 16;

    pub const AIMING: u32 = 1;
    pub const DRAGGING: u32 = 2;
    pub const CONTACT: u32 = 4;

    pub fn has(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// Describe the current aim. Empty when the cue ball is off the table.
pub fn build_overlay(sim: &Simulation) -> OverlayInstance {
    let Some(cue) = sim.cue_ball().filter(|b| !b.is_pocketed()) else {
        return OverlayInstance {
            target: -1.0,
            ..Default::default()
        };
    };
    let aim = sim.aim();

    let to_pointer = aim.pointer - cue.pos;
    let aim_angle = to_pointer.y.atan2(to_pointer.x);

    // Selected spin drawn in the aim frame: `top` along the aim, `side` across it.
    let spin = aim.selected_spin;
    let along = Vec2::from_angle(aim_angle);
    let offset = along * spin.top + along.perp() * spin.side;
    let marker = cue.pos + offset * cue.radius * SPIN_MARKER_REACH;

    let mut out = OverlayInstance {
        cue_x: cue.pos.x,
        cue_y: cue.pos.y,
        aim_angle,
        marker_x: marker.x,
        marker_y: marker.y,
        target: -1.0,
        ..Default::default()
    };
    let mut flags = 0;
    if aim.aiming {
        flags |= OverlayInstance::AIMING;
    }

    if let Some(drag) = aim.drag_point() {
        flags |= OverlayInstance::DRAGGING;
        let pull = cue.pos - drag;
        let length = pull.length();
        out.drag_length = length;
        out.power_fraction = (length / MAX_DRAG_DISPLAY).min(1.0);
        out.preview_power = preview_power(length, sim.config().cue_sensitivity);

        if let Some(direction) = pull.try_normalize() {
            match predict_contact(cue, direction, sim.balls()) {
                ShotPreview::Contact { target, ghost, object_direction } => {
                    flags |= OverlayInstance::CONTACT;
                    out.line_end_x = ghost.x;
                    out.line_end_y = ghost.y;
                    out.object_dir_x = object_direction.x;
                    out.object_dir_y = object_direction.y;
                    out.target = target as f32;
                }
                ShotPreview::Clear { end } => {
                    out.line_end_x = end.x;
                    out.line_end_y = end.y;
                }
            }
        }
    }

    out.flags = flags as f32;
    out
}
