//! Match bookkeeping: score, shots, pocketed balls and the loss latch.

/// Which group the player has claimed, fixed by the first object ball sunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlayerGroup {
    #[default]
    Unknown,
    Stripes,
    Solids,
}

/// Points for sinking `number`: 1-7 face value, 9-15 count down from 7, the
/// 8-ball is worth 8 and the cue ball nothing.
pub fn ball_value(number: u8) -> i32 {
    match number {
        0 => 0,
        8 => 8,
        n if n < 8 => n as i32,
        n => 16 - n as i32,
    }
}

pub const EIGHT_BALL_LOSS: &str = "You sunk the 8 Ball. You lose!";

/// Session state owned by the simulation and mutated only there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub score: i32,
    pub shots: u32,
    /// Object balls in the order they dropped.
    pub pocketed: Vec<u8>,
    /// Most recent non-8 object ball sunk; returned to the table on a scratch.
    pub last_sunk: Option<u8>,
    pub group: PlayerGroup,
    game_over: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_shot(&mut self) {
        self.shots += 1;
    }

    /// Book an object ball (or the 8-ball) going down.
    pub fn record_pocket(&mut self, number: u8, striped: bool) {
        if number == 0 {
            return;
        }
        self.pocketed.push(number);
        self.score += ball_value(number);

        if number != 8 {
            self.last_sunk = Some(number);
            if self.group == PlayerGroup::Unknown {
                self.group = if striped { PlayerGroup::Stripes } else { PlayerGroup::Solids };
            }
        }
    }

    /// Undo a previous `record_pocket` for `number` after a foul-respawn.
    pub fn revert_pocket(&mut self, number: u8) {
        if let Some(idx) = self.pocketed.iter().position(|&n| n == number) {
            self.pocketed.remove(idx);
            self.score -= ball_value(number);
        }
        if self.last_sunk == Some(number) {
            self.last_sunk = None;
        }
    }

    pub fn latch_game_over(&mut self, message: &str) {
        if self.game_over.is_none() {
            self.game_over = Some(message.to_string());
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_message(&self) -> Option<&str> {
        self.game_over.as_deref()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
