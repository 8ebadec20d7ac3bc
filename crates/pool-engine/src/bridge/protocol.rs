//! Shared buffer layout.
//! Must stay in sync with the host's protocol reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Balls: max_balls × 8 floats]
//! [Overlay: 16 floats]
//! [Sounds: max_sounds × 1 float]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written once into the header at init; the host reads
//! them back to compute offsets.

use crate::api::config::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::instance::BallInstance;
use crate::renderer::overlay::OverlayInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_BALLS: usize = 2;
pub const HEADER_BALL_COUNT: usize = 3;
pub const HEADER_WORLD_WIDTH: usize = 4;
pub const HEADER_WORLD_HEIGHT: usize = 5;
pub const HEADER_MAX_SOUNDS: usize = 6;
pub const HEADER_SOUND_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_PROTOCOL_VERSION: usize = 10;
pub const HEADER_ALPHA: usize = 11;
pub const HEADER_POCKET_SENSITIVITY: usize = 12;
pub const HEADER_CUE_SENSITIVITY: usize = 13;
pub const HEADER_GAME_OVER: usize = 14;
pub const HEADER_SETTLED: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// A full rack plus the cue ball.
pub const MAX_BALLS: usize = 16;

pub const BALL_FLOATS: usize = BallInstance::FLOATS;
pub const OVERLAY_FLOATS: usize = OverlayInstance::FLOATS;
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_balls: usize,
    pub max_sounds: usize,
    pub max_events: usize,

    pub ball_data_offset: usize,
    pub overlay_offset: usize,
    pub sound_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_balls: usize, max_sounds: usize, max_events: usize) -> Self {
        let ball_data_offset = HEADER_FLOATS;
        let overlay_offset = ball_data_offset + max_balls * BALL_FLOATS;
        let sound_data_offset = overlay_offset + OVERLAY_FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_balls,
            max_sounds,
            max_events,
            ball_data_offset,
            overlay_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(MAX_BALLS, config.max_sounds, config.max_events)
    }

    /// Write the fixed header fields: capacities, world size, version.
    pub fn write_capacities(&self, header: &mut [f32; HEADER_FLOATS], config: &GameConfig) {
        header[HEADER_MAX_BALLS] = self.max_balls as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_WORLD_WIDTH] = config.world_width;
        header[HEADER_WORLD_HEIGHT] = config.world_height;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }
}
