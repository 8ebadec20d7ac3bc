//! Top-down 2D pool table simulation.
//!
//! [`Simulation`] owns the table and advances it one fixed frame at a time;
//! hosts feed it [`InputEvent`]s and read back balls, the aiming overlay,
//! sound cues and HUD events.

pub mod api;
pub mod bridge;
pub mod core;
pub mod input;
pub mod renderer;

pub use glam;

pub use api::config::{ConfigError, GameConfig};
pub use api::events::{dispatch_sounds, AudioError, AudioSink, SimEvent, SoundQueue};
pub use api::types::{GameEvent, SoundEvent};
pub use bridge::protocol::ProtocolLayout;
pub use core::ball::{Ball, BallRole, BallState, Spin};
pub use core::session::{PlayerGroup, SessionState};
pub use core::simulation::Simulation;
pub use core::table::{Pocket, PocketKind, TableConfig};
pub use core::time::FixedTimestep;
pub use input::aim::{AimState, Shot, ShotPreview};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{build_render_buffer, BallInstance, RenderBuffer};
pub use renderer::overlay::{build_overlay, OverlayInstance};
