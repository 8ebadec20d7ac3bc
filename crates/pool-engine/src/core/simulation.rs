//! The table simulation: owns every ball, the session and the aim state,
//! and advances them one frame at a time.

use glam::Vec2;

use crate::api::config::{
    cue_sensitivity_from_slider, pocket_sensitivity_from_slider, GameConfig,
};
use crate::api::events::SimEvent;
use crate::api::types::GameEvent;
use crate::core::ball::{integrate, Ball, BallRole, BallState, Spin, StepOutcome};
use crate::core::rack::{find_clear_spot, rack};
use crate::core::session::{SessionState, EIGHT_BALL_LOSS};
use crate::core::table::TableConfig;
use crate::input::aim::{compute_shot, AimState};
use crate::input::queue::{InputEvent, InputQueue};

pub struct Simulation {
    config: GameConfig,
    balls: Vec<Ball>,
    session: SessionState,
    aim: AimState,
    events: Vec<SimEvent>,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Self {
        let balls = rack(&config.table);
        log::info!(
            "table ready: {} balls on a {}x{} felt",
            balls.len(),
            config.table.felt_width,
            config.table.felt_height
        );
        Self {
            config,
            balls,
            session: SessionState::new(),
            aim: AimState::default(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn table(&self) -> &TableConfig {
        &self.config.table
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, number: u8) -> Option<&Ball> {
        self.balls.iter().find(|b| b.number() == number)
    }

    pub fn ball_mut(&mut self, number: u8) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.number() == number)
    }

    pub fn cue_ball(&self) -> Option<&Ball> {
        self.ball(0)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn aim(&self) -> &AimState {
        &self.aim
    }

    /// True once every ball on the table has stopped.
    pub fn is_settled(&self) -> bool {
        self.balls.iter().filter(|b| !b.is_pocketed()).all(|b| b.vel == Vec2::ZERO)
    }

    /// Drain and handle queued input, then advance one frame.
    pub fn update(&mut self, input: &mut InputQueue) -> Vec<SimEvent> {
        for event in input.drain() {
            self.handle_input(&event);
        }
        self.tick()
    }

    /// Advance the table by one frame. Returns every event raised since the
    /// previous tick, including those from input handling.
    pub fn tick(&mut self) -> Vec<SimEvent> {
        if self.cue_ball().is_some_and(Ball::is_pocketed) {
            self.respawn_cue_ball();
        }

        let pockets = self.config.table.pockets();
        for index in 0..self.balls.len() {
            match integrate(&mut self.balls, index, &self.config.table, &pockets) {
                StepOutcome::Skipped => {}
                StepOutcome::Moved { impacts } => {
                    for impact in impacts.iter().filter(|i| i.contact.is_audible()) {
                        self.events.push(SimEvent::Collision {
                            speed: impact.contact.relative_speed,
                        });
                    }
                }
                StepOutcome::Captured { pocket } => self.on_pocketed(index, pocket),
            }
        }

        std::mem::take(&mut self.events)
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                let cue = self.cue_position();
                self.aim.track_pointer(Vec2::new(x, y), cue);
            }
            InputEvent::PointerDown { x, y } => self.begin_shot(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.release_shot(Vec2::new(x, y)),
            InputEvent::CancelShot => self.cancel_shot(),
            InputEvent::SelectSpin { top, side } => {
                self.aim.selected_spin = Spin::new(top, side);
            }
            InputEvent::SetCuePower { display } => {
                self.config.cue_sensitivity = cue_sensitivity_from_slider(display);
                log::debug!("cue sensitivity {}", self.config.cue_sensitivity);
            }
            InputEvent::SetPocketSize { display } => {
                self.set_pocket_sensitivity(pocket_sensitivity_from_slider(display));
            }
            InputEvent::Restart => self.restart(),
        }
    }

    pub fn set_pocket_sensitivity(&mut self, sensitivity: f32) {
        if sensitivity.is_finite() && sensitivity > 0.0 {
            self.config.table.pocket_sensitivity = sensitivity;
            log::debug!("pocket sensitivity {}", sensitivity);
        } else {
            log::warn!("ignoring pocket sensitivity {}", sensitivity);
        }
    }

    /// Re-rack and clear the session.
    pub fn restart(&mut self) {
        self.balls = rack(&self.config.table);
        self.session.reset();
        self.aim.reset();
        self.events.push(SimEvent::Restarted);
        log::info!("table re-racked");
    }

    /// HUD snapshot: score, the pocketed list and the game-over latch.
    pub fn hud_events(&self) -> Vec<GameEvent> {
        let mut out = Vec::with_capacity(self.session.pocketed.len() + 2);
        out.push(GameEvent::score(self.session.score, self.session.shots));
        for (i, &number) in self.session.pocketed.iter().enumerate() {
            out.push(GameEvent::pocketed_ball(number, i));
        }
        if self.session.is_game_over() {
            out.push(GameEvent::game_over());
        }
        out
    }

    fn cue_position(&self) -> Option<Vec2> {
        self.cue_ball().filter(|b| !b.is_pocketed()).map(|b| b.pos)
    }

    fn begin_shot(&mut self, pointer: Vec2) {
        if self.session.is_game_over() {
            log::debug!("shot ignored: game over");
            return;
        }
        let cue = self.cue_position();
        if self.aim.begin_drag(pointer, cue) {
            if let Some(ball) = self.ball_mut(0) {
                ball.state = BallState::Held;
            }
        }
    }

    /// The selected spin is spent only when the cue ball is actually struck.
    fn release_shot(&mut self, pointer: Vec2) {
        let Some(drag_point) = self.aim.release(pointer) else { return };
        let spin = self.aim.selected_spin;
        let sensitivity = self.config.cue_sensitivity;
        let game_over = self.session.is_game_over();

        let Some(cue) = self.ball_mut(0) else { return };
        cue.state = BallState::Active;
        if game_over {
            return;
        }
        let Some(shot) = compute_shot(cue.pos, drag_point, sensitivity, spin) else { return };
        cue.vel = shot.velocity;
        cue.spin = shot.spin;

        self.aim.clear_spin();
        self.session.record_shot();
        self.events.push(SimEvent::Shot { power: shot.power });
        log::debug!("shot {} power {:.1} spin {:?}", self.session.shots, shot.power, shot.spin);
    }

    fn cancel_shot(&mut self) {
        if self.aim.cancel() {
            if let Some(cue) = self.ball_mut(0) {
                cue.state = BallState::Active;
            }
            log::debug!("shot cancelled");
        }
    }

    fn on_pocketed(&mut self, index: usize, pocket: usize) {
        let ball = &self.balls[index];
        let (number, role, striped) = (ball.number(), ball.role, ball.striped);
        self.events.push(SimEvent::Pocketed { number, pocket });
        log::info!("ball {} pocketed", number);

        match role {
            BallRole::Cue => {}
            BallRole::Object(_) => self.session.record_pocket(number, striped),
            BallRole::EightBall => {
                self.session.record_pocket(number, striped);
                let remaining = self
                    .balls
                    .iter()
                    .filter(|b| matches!(b.role, BallRole::Object(_)) && !b.is_pocketed())
                    .count();
                if remaining > 0 {
                    if !self.session.is_game_over() {
                        self.events.push(SimEvent::GameOver);
                        log::info!("8-ball sunk with {} balls left", remaining);
                    }
                    self.session.latch_game_over(EIGHT_BALL_LOSS);
                } else {
                    log::info!("table cleared");
                }
            }
        }
    }

    /// Put the cue ball on its spot; a ball sunk earlier comes back as the
    /// penalty when there is room for it.
    fn respawn_cue_ball(&mut self) {
        let spot = self.config.table.cue_spot();
        if let Some(cue) = self.ball_mut(0) {
            cue.place(spot);
        }
        self.events.push(SimEvent::CueRespawned);

        let Some(number) = self.session.last_sunk else { return };
        if !self.ball(number).is_some_and(Ball::is_pocketed) {
            return;
        }
        let Some(clear) = find_clear_spot(&self.config.table, &self.balls) else {
            log::warn!("no room to return ball {}", number);
            return;
        };
        if let Some(ball) = self.ball_mut(number) {
            ball.place(clear);
        }
        self.session.revert_pocket(number);
        self.events.push(SimEvent::BallReturned { number });
        log::info!("ball {} returned to the table", number);
    }
}
