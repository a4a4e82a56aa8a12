//! Sound cue selection
//!
//! Playback belongs to the host. This picks which of the game's sound effects an event
//! calls for and at what volume.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jump impulse
    Jump,
    /// Score ticking up during a fall
    ScorePlus,
    /// Perfect landing reward
    LargeScorePlus,
    /// Glide opening
    Deploy,
    /// Impact damage
    Hurt,
}

impl SoundEffect {
    /// The cue an event plays, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::ScoreIncreased { .. } => Some(SoundEffect::ScorePlus),
            GameEvent::PerfectLanding { .. } => Some(SoundEffect::LargeScorePlus),
            GameEvent::Deployed => Some(SoundEffect::Deploy),
            GameEvent::Hurt { .. } => Some(SoundEffect::Hurt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::ScorePlus => "score_plus",
            SoundEffect::LargeScorePlus => "large_score_plus",
            SoundEffect::Deploy => "deploy",
            SoundEffect::Hurt => "hurt",
        }
    }
}

/// Volume levels for effects and music
#[derive(Debug, Clone, PartialEq)]
pub struct Mixer {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective effect volume
    pub fn effects_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume
    pub fn music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Cues to play for a batch of events, with their volume. Empty when silent.
    pub fn cues(&self, events: &[GameEvent]) -> Vec<(SoundEffect, f32)> {
        let vol = self.effects_volume();
        if vol <= 0.0 {
            return Vec::new();
        }
        events
            .iter()
            .filter_map(SoundEffect::for_event)
            .map(|effect| (effect, vol))
            .collect()
    }
}
