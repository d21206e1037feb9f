//! Sound triggers
//!
//! The simulation never plays audio itself. It records [`GameEvent`]s, and a
//! driver maps them to fire-and-forget cues for whatever [`AudioSink`] backs
//! the platform.

use crate::settings::Settings;
use crate::sim::{Element, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player took damage
    Hit,
    /// Projectile fired, one sample per element
    Shoot(Element),
}

/// Background music control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    /// (Re)start the looping track from the beginning
    Start,
    Stop,
}

/// A single audio trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Effect(SoundEffect),
    Music(MusicCue),
}

/// Audio cue for a simulation event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::PlayerHit { .. } => Some(AudioCue::Effect(SoundEffect::Hit)),
        GameEvent::Shot(element) => Some(AudioCue::Effect(SoundEffect::Shoot(*element))),
        GameEvent::Started | GameEvent::Restarted => Some(AudioCue::Music(MusicCue::Start)),
        GameEvent::GameOver(_) => Some(AudioCue::Music(MusicCue::Stop)),
        _ => None,
    }
}

/// Backend that actually makes noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    fn music(&mut self, cue: MusicCue);

    /// Forward every cue-bearing event, in order
    fn dispatch(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(cue_for) {
            match cue {
                AudioCue::Effect(effect) => self.play(effect),
                AudioCue::Music(cue) => self.music(cue),
            }
        }
    }
}

/// Audio manager for headless runs: logs triggers at the volume they would play
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
    /// Effects triggered so far
    pub effects_played: u64,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl LogAudio {
    pub fn new(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            music_playing: false,
            effects_played: 0,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Get effective effect volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.effects_played += 1;
        match effect {
            SoundEffect::Hit => log::debug!("sfx: hit (vol {:.2})", vol),
            SoundEffect::Shoot(element) => {
                log::debug!("sfx: shoot {} (vol {:.2})", element.as_str(), vol)
            }
        }
    }

    fn music(&mut self, cue: MusicCue) {
        match cue {
            MusicCue::Start => {
                self.music_playing = true;
                if !self.muted {
                    log::debug!(
                        "music: start (vol {:.2})",
                        self.master_volume * self.music_volume
                    );
                }
            }
            MusicCue::Stop => {
                self.music_playing = false;
                log::debug!("music: stop");
            }
        }
    }
}
