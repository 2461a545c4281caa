//! Audio cue dispatch
//!
//! The simulation only emits [`GameEvent`]s; this module turns the sound and
//! music ones into volume-scaled calls on an [`AudioBackend`].

use crate::assets::AssetCatalog;
use crate::settings::Settings;
use crate::sim::{GameEvent, MusicCue, SoundId};

/// The external playback engine
pub trait AudioBackend {
    fn play_sound(&mut self, sound: SoundId, volume: f32);
    /// Start (or restart) the looping background track
    fn play_music(&mut self, volume: f32);
    fn fade_out_music(&mut self, fade_ms: u64);
}

/// Backend that only logs; used by the headless binary
#[derive(Debug, Default)]
pub struct LogBackend {
    pub sounds_played: u32,
    pub music_cues: u32,
}

impl AudioBackend for LogBackend {
    fn play_sound(&mut self, sound: SoundId, volume: f32) {
        self.sounds_played += 1;
        log::debug!("play {:?} at {:.2}", sound, volume);
    }

    fn play_music(&mut self, volume: f32) {
        self.music_cues += 1;
        log::debug!("music on at {:.2}", volume);
    }

    fn fade_out_music(&mut self, fade_ms: u64) {
        self.music_cues += 1;
        log::debug!("music fade out over {}ms", fade_ms);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    music_volume: f32,
    splat_volume: f32,
    click_volume: f32,
    muted: bool,
    splat_loaded: bool,
    click_loaded: bool,
    music_loaded: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    /// New manager with default volumes and every sound assumed present
    pub fn new(backend: B) -> Self {
        let mut manager = Self {
            backend,
            master_volume: 1.0,
            music_volume: 0.0,
            splat_volume: 0.0,
            click_volume: 0.0,
            muted: false,
            splat_loaded: true,
            click_loaded: true,
            music_loaded: true,
        };
        manager.apply_settings(&Settings::default());
        manager
    }

    /// Only play what actually loaded
    pub fn with_catalog(mut self, catalog: &AssetCatalog) -> Self {
        self.splat_loaded = catalog.sound(SoundId::Splat).is_some();
        self.click_loaded = catalog.sound(SoundId::Click).is_some();
        self.music_loaded = catalog.music().is_some();
        self
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.splat_volume = settings.splat_volume.clamp(0.0, 1.0);
        self.click_volume = settings.click_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect; silently skipped if it failed to load
    pub fn play(&mut self, sound: SoundId) {
        let (loaded, channel) = match sound {
            SoundId::Splat => (self.splat_loaded, self.splat_volume),
            SoundId::Click => (self.click_loaded, self.click_volume),
        };
        let vol = self.effective_volume(channel);
        if !loaded || vol <= 0.0 {
            return;
        }
        self.backend.play_sound(sound, vol);
    }

    pub fn music(&mut self, cue: MusicCue) {
        if !self.music_loaded {
            return;
        }
        match cue {
            MusicCue::Play => {
                let vol = self.effective_volume(self.music_volume);
                self.backend.play_music(vol);
            }
            MusicCue::FadeOut(ms) => self.backend.fade_out_music(ms),
        }
    }

    /// Route one game event; non-audio events are ignored
    pub fn handle_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Sound(sound) => self.play(sound),
            GameEvent::Music(cue) => self.music(cue),
            _ => {}
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
