/// Player intents, already mapped to world coordinates by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Click/touch began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// Cursor/touch moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Click/touch ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// Abort the shot being drawn (Escape).
    CancelShot,
    /// Spin picked on the spin selector, each axis in [-1, 1].
    SelectSpin { top: f32, side: f32 },
    /// Cue power slider, display units 1-10.
    SetCuePower { display: f32 },
    /// Pocket size slider, display units 0.8-1.5.
    SetPocketSize { display: f32 },
    Restart,
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
