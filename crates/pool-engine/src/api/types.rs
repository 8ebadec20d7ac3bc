use bytemuck::{Pod, Zeroable};

/// A sound cue emitted by the simulation.
/// The numeric value maps to a clip in the host's sound manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

impl SoundEvent {
    /// Ball-on-ball impact (also used for the cue strike).
    pub const HIT: SoundEvent = SoundEvent(1);
    /// A ball dropped into a pocket.
    pub const POCKET: SoundEvent = SoundEvent(2);
}

/// A HUD event communicated from Rust to the host via the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// `a` = score, `b` = shot count.
    pub const SCORE: f32 = 1.0;
    /// `a` = ball number, `b` = position in the pocketed list.
    pub const POCKETED_BALL: f32 = 2.0;
    /// `a` = 1.0 while the game-over state is latched.
    pub const GAME_OVER: f32 = 3.0;

    pub fn score(score: i32, shots: u32) -> Self {
        Self {
            kind: Self::SCORE,
            a: score as f32,
            b: shots as f32,
            c: 0.0,
        }
    }

    pub fn pocketed_ball(number: u8, index: usize) -> Self {
        Self {
            kind: Self::POCKETED_BALL,
            a: number as f32,
            b: index as f32,
            c: 0.0,
        }
    }

    pub fn game_over() -> Self {
        Self {
            kind: Self::GAME_OVER,
            a: 1.0,
            b: 0.0,
            c: 0.0,
        }
    }
}
