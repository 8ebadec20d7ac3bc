use pool_engine::bridge::protocol::{
    HEADER_ALPHA, HEADER_BALL_COUNT, HEADER_CUE_SENSITIVITY, HEADER_EVENT_COUNT,
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_GAME_OVER, HEADER_POCKET_SENSITIVITY,
    HEADER_SETTLED, HEADER_SOUND_COUNT,
};
use pool_engine::{
    build_overlay, build_render_buffer, dispatch_sounds, FixedTimestep, GameConfig, GameEvent,
    InputEvent, InputQueue, OverlayInstance, ProtocolLayout, RenderBuffer, SimEvent, Simulation,
    SoundQueue,
};

/// Wires the table simulation to a browser frame loop.
///
/// The web crate keeps one `TableRunner` in a `thread_local!` and exposes it
/// through free `#[wasm_bindgen]` functions.
pub struct TableRunner {
    sim: Simulation,
    input: InputQueue,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    render_buffer: RenderBuffer,
    overlay: OverlayInstance,
    sounds: SoundQueue,
    game_events: Vec<GameEvent>,
    header: [f32; HEADER_FLOATS],
    frame_counter: u32,
    /// Seconds until the table re-racks after a loss.
    restart_in: Option<f32>,
}

impl TableRunner {
    pub fn new(config: GameConfig) -> Self {
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_capacities(&mut header, &config);

        let mut runner = Self {
            render_buffer: RenderBuffer::with_capacity(layout.max_balls),
            sounds: SoundQueue::new(config.max_sounds),
            game_events: Vec::with_capacity(config.max_events),
            sim: Simulation::new(config),
            input: InputQueue::new(),
            timestep,
            layout,
            overlay: OverlayInstance::default(),
            header,
            frame_counter: 0,
            restart_in: None,
        };
        runner.publish();
        runner
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// One host frame: apply queued input, run the fixed steps it owes, then
    /// republish balls, overlay, sounds and HUD events.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.sim.handle_input(&event);
        }

        let steps = self.timestep.accumulate(dt);
        let mut events: Vec<SimEvent> = Vec::new();
        for _ in 0..steps {
            events.extend(self.sim.tick());
        }

        self.sounds.clear();
        dispatch_sounds(&events, &mut self.sounds);

        self.run_restart_timer(dt);
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.publish();
    }

    fn run_restart_timer(&mut self, dt: f32) {
        if !self.sim.session().is_game_over() {
            self.restart_in = None;
            return;
        }
        let Some(delay) = self.sim.config().auto_restart_secs else { return };
        let remaining = self.restart_in.unwrap_or(delay) - dt.max(0.0);
        if remaining <= 0.0 {
            log::info!("restarting after loss");
            self.sim.restart();
            self.timestep.reset();
            self.restart_in = None;
        } else {
            self.restart_in = Some(remaining);
        }
    }

    fn publish(&mut self) {
        build_render_buffer(self.sim.balls(), &mut self.render_buffer);
        self.overlay = build_overlay(&self.sim);

        self.game_events.clear();
        let hud = self.sim.hud_events();
        if hud.len() > self.layout.max_events {
            log::warn!("{} HUD events, only {} fit", hud.len(), self.layout.max_events);
        }
        self.game_events.extend(hud.into_iter().take(self.layout.max_events));

        let config = self.sim.config();
        self.header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        self.header[HEADER_BALL_COUNT] = self.render_buffer.instance_count() as f32;
        self.header[HEADER_SOUND_COUNT] = self.sounds.len() as f32;
        self.header[HEADER_EVENT_COUNT] = self.game_events.len() as f32;
        self.header[HEADER_ALPHA] = self.timestep.alpha();
        self.header[HEADER_POCKET_SENSITIVITY] = config.table.pocket_sensitivity;
        self.header[HEADER_CUE_SENSITIVITY] = config.cue_sensitivity;
        self.header[HEADER_GAME_OVER] = if self.sim.session().is_game_over() { 1.0 } else { 0.0 };
        self.header[HEADER_SETTLED] = if self.sim.is_settled() { 1.0 } else { 0.0 };
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn balls_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn ball_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn overlay_ptr(&self) -> *const f32 {
        &self.overlay as *const OverlayInstance as *const f32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sounds.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sounds.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.game_events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.game_events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.sim.config().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.sim.config().world_height
    }

    pub fn score(&self) -> i32 {
        self.sim.session().score
    }

    pub fn shots(&self) -> u32 {
        self.sim.session().shots
    }

    pub fn game_over_message(&self) -> Option<String> {
        self.sim.session().game_over_message().map(str::to_owned)
    }

    // ---- Capacity accessors ----

    pub fn max_balls(&self) -> u32 {
        self.layout.max_balls as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
