//! Core game types: screens, difficulty presets, events and stats

use serde::{Deserialize, Serialize};

/// Top-level screen. Game over is a sub-state of `Playing`
/// (see `Session::game_over`), not a separate screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with Play/Quit
    Menu,
    /// Choosing a difficulty preset
    Difficulty,
    /// A session is running (or showing its game-over overlay)
    Playing,
}

/// Named difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Zombies never leave on their own
    Classic,
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Classic,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Classic => "CLASSIC",
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Classic => "Classic",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Difficulty::Classic),
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Classic => DifficultyConfig {
                duration_ms: 120_000,
                speed_multiplier: 0.0,
                max_zombies_on_screen: 3,
                spawn_interval_min_ms: 2000,
                spawn_interval_max_ms: 4000,
            },
            Difficulty::Easy => DifficultyConfig {
                duration_ms: 75_000,
                speed_multiplier: 0.8,
                max_zombies_on_screen: 4,
                spawn_interval_min_ms: 1500,
                spawn_interval_max_ms: 2500,
            },
            Difficulty::Medium => DifficultyConfig {
                duration_ms: 60_000,
                speed_multiplier: 1.0,
                max_zombies_on_screen: 5,
                spawn_interval_min_ms: 1000,
                spawn_interval_max_ms: 2000,
            },
            Difficulty::Hard => DifficultyConfig {
                duration_ms: 45_000,
                speed_multiplier: 1.2,
                max_zombies_on_screen: 6,
                spawn_interval_min_ms: 700,
                spawn_interval_max_ms: 1500,
            },
        }
    }
}

/// Immutable per-session parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub duration_ms: u64,
    /// Lifetime divisor; 0 disables auto-expiry
    pub speed_multiplier: f32,
    pub max_zombies_on_screen: usize,
    pub spawn_interval_min_ms: u64,
    pub spawn_interval_max_ms: u64,
}

impl DifficultyConfig {
    pub fn zombies_expire(&self) -> bool {
        self.speed_multiplier > 0.0
    }
}

/// Sound effects the core asks the frontend to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    /// Zombie smashed
    Splat,
    /// Button pressed
    Click,
}

/// Background music instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicCue {
    /// (Re)start the looping track
    Play,
    /// Fade out over the given milliseconds
    FadeOut(u64),
}

/// Events emitted by the simulation for audio and UI feedback.
/// Drained by the frontend each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundId),
    Music(MusicCue),
    PhaseChanged(GamePhase),
    SessionStarted(Difficulty),
    ZombieSpawned { id: u32 },
    ZombieExpired { id: u32 },
    GameOver(Stats),
}

/// Read-only statistics snapshot for on-screen display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hits: u32,
    pub misses: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub difficulty: Difficulty,
    pub session_start_ms: u64,
    pub session_duration_ms: u64,
}

impl Stats {
    /// Displayed score: hits minus misses
    pub fn score(&self) -> i64 {
        self.hits as i64 - self.misses as i64
    }

    /// Milliseconds left in the session (negative past the end)
    pub fn time_left_ms(&self, now: u64) -> i64 {
        self.session_duration_ms as i64 - now.saturating_sub(self.session_start_ms) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_table() {
        let classic = Difficulty::Classic.config();
        assert_eq!(classic.duration_ms, 120_000);
        assert!(!classic.zombies_expire());
        assert_eq!(classic.max_zombies_on_screen, 3);

        let medium = Difficulty::Medium.config();
        assert_eq!(medium.duration_ms, 60_000);
        assert_eq!(medium.speed_multiplier, 1.0);
        assert_eq!(medium.max_zombies_on_screen, 5);
        assert_eq!((medium.spawn_interval_min_ms, medium.spawn_interval_max_ms), (1000, 2000));

        let hard = Difficulty::Hard.config();
        assert_eq!(hard.duration_ms, 45_000);
        assert_eq!(hard.max_zombies_on_screen, 6);
        assert_eq!((hard.spawn_interval_min_ms, hard.spawn_interval_max_ms), (700, 1500));

        for d in Difficulty::ALL {
            let c = d.config();
            assert!(c.spawn_interval_min_ms <= c.spawn_interval_max_ms);
        }
    }

    #[test]
    fn test_difficulty_names_roundtrip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_stats_score_and_time() {
        let stats = Stats {
            hits: 10,
            misses: 13,
            combo: 0,
            max_combo: 3,
            difficulty: Difficulty::Easy,
            session_start_ms: 1000,
            session_duration_ms: 75_000,
        };
        assert_eq!(stats.score(), -3);
        assert_eq!(stats.time_left_ms(1000), 75_000);
        assert_eq!(stats.time_left_ms(80_000), -4000);
    }
}
