use bytemuck::{Pod, Zeroable};

use crate::core::ball::{Ball, BallState};

/// Per-ball render data read by the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Ball number, 0 for the cue ball.
    pub number: f32,
    /// 1.0 for 9-15.
    pub striped: f32,
    /// 1.0 while the cue ball is under the player's drag.
    pub held: f32,
    /// Velocity in px/frame, for interpolating between ticks.
    pub vx: f32,
    pub vy: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_ball(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            radius: ball.radius,
            number: ball.number() as f32,
            striped: if ball.striped { 1.0 } else { 0.0 },
            held: if ball.state == BallState::Held { 1.0 } else { 0.0 },
            vx: ball.vel.x,
            vy: ball.vel.y,
        }
    }
}

/// Balls still on the table, rebuilt every host frame.
pub struct RenderBuffer {
    pub instances: Vec<BallInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BallInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for shared-memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild `buffer` from the table. Pocketed balls are not drawn.
pub fn build_render_buffer<'a>(
    balls: impl IntoIterator<Item = &'a Ball>,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();
    for ball in balls.into_iter().filter(|b| !b.is_pocketed()) {
        buffer.push(BallInstance::from_ball(ball));
    }
}
