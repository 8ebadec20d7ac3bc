//! Browser bridge for the pool table.
//!
//! One [`TableRunner`] lives in a `thread_local!`; the host drives it with
//! `game_tick` and reads balls, overlay, sounds and HUD events back out of
//! wasm memory through the pointer accessors.

use std::cell::RefCell;

use pool_engine::{GameConfig, InputEvent};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::TableRunner;

thread_local! {
    static RUNNER: RefCell<Option<TableRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut TableRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("table not initialized, call game_init() first");
                None
            }
        }
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

/// Start a new table. `config_json` may be a partial config; an invalid one
/// is reported and the defaults are used instead.
#[wasm_bindgen]
pub fn game_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("pool: logger already initialized"));
    }

    let config = match config_json.as_deref().map(GameConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::error!("bad table config, using defaults: {}", e);
            GameConfig::default()
        }
        None => GameConfig::default(),
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(TableRunner::new(config));
    });
    log::info!("pool: initialized");
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    push(InputEvent::PointerDown { x, y });
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    push(InputEvent::PointerUp { x, y });
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    push(InputEvent::PointerMove { x, y });
}

#[wasm_bindgen]
pub fn game_cancel_shot() {
    push(InputEvent::CancelShot);
}

#[wasm_bindgen]
pub fn game_select_spin(top: f32, side: f32) {
    push(InputEvent::SelectSpin { top, side });
}

#[wasm_bindgen]
pub fn game_set_cue_power(display: f32) {
    push(InputEvent::SetCuePower { display });
}

#[wasm_bindgen]
pub fn game_set_pocket_size(display: f32) {
    push(InputEvent::SetPocketSize { display });
}

#[wasm_bindgen]
pub fn game_restart() {
    push(InputEvent::Restart);
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_balls_ptr() -> *const f32 {
    with_runner(|r| r.balls_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_ball_count() -> u32 {
    with_runner(|r| r.ball_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_overlay_ptr() -> *const f32 {
    with_runner(|r| r.overlay_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(|r| r.sound_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(|r| r.sound_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_score() -> i32 {
    with_runner(|r| r.score()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_shots() -> u32 {
    with_runner(|r| r.shots()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_game_over_message() -> Option<String> {
    with_runner(|r| r.game_over_message()).flatten()
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_balls() -> u32 {
    with_runner(|r| r.max_balls()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_sounds() -> u32 {
    with_runner(|r| r.max_sounds()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}
