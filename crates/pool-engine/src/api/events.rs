//! Simulation events and the sound side-channel.
//!
//! The simulation never plays audio itself. Each tick yields a list of
//! [`SimEvent`]s; the host maps the audible ones onto an [`AudioSink`].
//! A failing sink is logged and otherwise ignored.

use crate::api::types::SoundEvent;

/// Something that happened during a tick or while handling input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Two balls met hard enough to be heard. `speed` is the post-impact
    /// relative speed along the contact normal.
    Collision { speed: f32 },
    /// A ball dropped into pocket `pocket` (index into `TableConfig::pockets`).
    Pocketed { number: u8, pocket: usize },
    /// The cue ball was struck.
    Shot { power: f32 },
    /// The cue ball was put back on its spot after a scratch.
    CueRespawned,
    /// A sunk object ball was returned to the table as the scratch penalty.
    BallReturned { number: u8 },
    GameOver,
    Restarted,
}

impl SimEvent {
    pub fn sound(&self) -> Option<SoundEvent> {
        match self {
            SimEvent::Collision { .. } | SimEvent::Shot { .. } => Some(SoundEvent::HIT),
            SimEvent::Pocketed { .. } => Some(SoundEvent::POCKET),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("sound queue full ({capacity} slots)")]
    QueueFull { capacity: usize },
    #[error("sound {0:?} is not loaded")]
    NotLoaded(SoundEvent),
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Host-side audio output.
pub trait AudioSink {
    fn play(&mut self, sound: SoundEvent) -> Result<(), AudioError>;
}

/// Play every audible event. Returns how many sounds were accepted.
pub fn dispatch_sounds<S: AudioSink + ?Sized>(events: &[SimEvent], sink: &mut S) -> usize {
    let mut played = 0;
    for event in events {
        let Some(sound) = event.sound() else { continue };
        match sink.play(sound) {
            Ok(()) => played += 1,
            Err(e) => log::warn!("dropped sound for {:?}: {}", event, e),
        }
    }
    played
}

/// Bounded per-frame sound buffer, read by the host after each frame.
pub struct SoundQueue {
    ids: Vec<u8>,
    capacity: usize,
}

impl SoundQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.ids
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.ids.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl AudioSink for SoundQueue {
    fn play(&mut self, sound: SoundEvent) -> Result<(), AudioError> {
        if self.ids.len() >= self.capacity {
            return Err(AudioError::QueueFull {
                capacity: self.capacity,
            });
        }
        let id = u8::try_from(sound.0).map_err(|_| AudioError::NotLoaded(sound))?;
        self.ids.push(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl AudioSink for Broken {
        fn play(&mut self, _sound: SoundEvent) -> Result<(), AudioError> {
            Err(AudioError::Playback("device lost".into()))
        }
    }

    #[test]
    fn only_audible_events_make_sound() {
        assert_eq!(SimEvent::Collision { speed: 3.0 }.sound(), Some(SoundEvent::HIT));
        assert_eq!(SimEvent::Shot { power: 10.0 }.sound(), Some(SoundEvent::HIT));
        let pocketed = SimEvent::Pocketed {
            number: 3,
            pocket: 0,
        };
        assert_eq!(pocketed.sound(), Some(SoundEvent::POCKET));
        assert_eq!(SimEvent::CueRespawned.sound(), None);
        assert_eq!(SimEvent::GameOver.sound(), None);
    }

    #[test]
    fn queue_collects_sound_ids() {
        let mut q = SoundQueue::new(8);
        let events = [
            SimEvent::Shot { power: 12.0 },
            SimEvent::CueRespawned,
            SimEvent::Pocketed {
                number: 9,
                pocket: 2,
            },
        ];
        assert_eq!(dispatch_sounds(&events, &mut q), 2);
        assert_eq!(q.as_slice(), &[1, 2]);
        q.clear();
        assert!(q.is_empty());
    }

    #[test]
    fn full_queue_drops_extra_sounds() {
        let mut q = SoundQueue::new(1);
        let events = [
            SimEvent::Collision { speed: 5.0 },
            SimEvent::Collision { speed: 6.0 },
        ];
        assert_eq!(dispatch_sounds(&events, &mut q), 1);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn broken_sink_does_not_panic() {
        let events = [SimEvent::Pocketed {
            number: 1,
            pocket: 0,
        }];
        assert_eq!(dispatch_sounds(&events, &mut Broken), 0);
    }
}
