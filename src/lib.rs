//! Zombie Smash - a reflex arcade game
//!
//! Core modules:
//! - `sim`: Game state machine, zombie lifecycle, combo scoring, effects (deterministic)
//! - `render`: Layered draw-command lists built from game state
//! - `ui`: Buttons, commands and HUD view models
//! - `audio`: Sound/music cue dispatch to an external playback backend
//! - `assets`: Asset catalog with placeholder fallback
//! - `platform`: Clock and input event types
//! - `settings`: Player preferences loaded from JSON

pub mod assets;
pub mod audio;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Fixed effect aging step per update (assumes 60 FPS)
    pub const TICK_MS: u64 = 16;
    pub const DEFAULT_FPS: u32 = 60;

    /// Hits closer together than this continue the combo
    pub const COMBO_WINDOW_MS: u64 = 2000;
    pub const GREAT_COMBO: u32 = 5;
    pub const EPIC_COMBO: u32 = 10;

    /// Pointer trail capacity (oldest evicted first)
    pub const TRAIL_CAPACITY: usize = 15;
    /// Combo contribution to trail thickness is capped here
    pub const TRAIL_COMBO_CAP: u32 = 10;

    /// Zombie sprite and timings
    pub const ZOMBIE_SIZE: Vec2 = Vec2::new(70.0, 70.0);
    pub const ZOMBIE_POP_DURATION_MS: u64 = 300;
    pub const ZOMBIE_SPLAT_DURATION_MS: u64 = 400;
    pub const ZOMBIE_WARNING_MS: u64 = 500;
    /// Base lifetime range before the difficulty multiplier is applied
    pub const ZOMBIE_LIFETIME_MIN_MS: f32 = 1500.0;
    pub const ZOMBIE_LIFETIME_MAX_MS: f32 = 3000.0;
    /// Occupancy test shrinks the zombie rect by this much on each side
    pub const OCCUPANCY_INSET: f32 = 10.0;

    pub const SPLAT_SIZE: Vec2 = Vec2::new(80.0, 80.0);
    pub const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 70.0);

    /// Blood particles
    pub const PARTICLE_RADIUS: f32 = 2.0;
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    pub const BLOOD_PARTICLE_COUNT_BASE: u32 = 20;
    pub const BLOOD_PARTICLE_COUNT_COMBO_BONUS: u32 = 3;
    pub const BLOOD_PARTICLE_COUNT_MAX: u32 = 50;

    /// Floating texts
    pub const FLOATING_TEXT_LIFETIME_MS: u64 = 1500;
    pub const MISS_TEXT_LIFETIME_MS: u64 = 1000;
    pub const RAINBOW_TEXT_LIFETIME_MS: u64 = 2000;
    pub const FLOATING_TEXT_RISE: f32 = 50.0;
    pub const RAINBOW_TEXT_RISE: f32 = 80.0;

    /// Explosion rings (epic tier)
    pub const EXPLOSION_START_RADIUS: f32 = 5.0;
    pub const EXPLOSION_MAX_RADIUS: f32 = 60.0;
    pub const EXPLOSION_GROWTH_RATE: f32 = 3.0;
    pub const EXPLOSION_FADE_RATE: i32 = 15;

    /// Wave rings (great tier)
    pub const WAVE_MAX_RADIUS: f32 = 100.0;
    pub const WAVE_SPEED: f32 = 4.0;
    pub const WAVE_COUNT: usize = 3;
    pub const WAVE_FADE_RATE: i32 = 8;

    /// Stars
    pub const STAR_SPAWN_INTERVAL_MS: u64 = 3000;
    pub const BACKGROUND_STARS_PER_SPAWN: usize = 2;
    pub const BACKGROUND_STAR_LIFETIME_MS: u64 = 5000;
    pub const STAR_SIZE_MIN: f32 = 2.0;
    pub const STAR_SIZE_MAX: f32 = 6.0;
    pub const STAR_ROTATION_SPEED_MIN: f32 = 2.0;
    pub const STAR_ROTATION_SPEED_MAX: f32 = 8.0;

    /// Music fades
    pub const MENU_MUSIC_FADE_MS: u64 = 500;
    pub const GAME_OVER_MUSIC_FADE_MS: u64 = 1000;

    /// The nine fixed spawn locations (3x3 grid)
    pub const SPAWN_POINTS: [Vec2; 9] = [
        Vec2::new(100.0, 150.0),
        Vec2::new(350.0, 150.0),
        Vec2::new(600.0, 150.0),
        Vec2::new(100.0, 300.0),
        Vec2::new(350.0, 300.0),
        Vec2::new(600.0, 300.0),
        Vec2::new(100.0, 450.0),
        Vec2::new(350.0, 450.0),
        Vec2::new(600.0, 450.0),
    ];
}

/// Color palette
pub mod colors {
    pub type Rgb = [u8; 3];

    pub const WHITE: Rgb = [255, 255, 255];
    pub const BLACK: Rgb = [0, 0, 0];
    pub const RED: Rgb = [255, 0, 0];
    pub const GREEN: Rgb = [0, 255, 0];
    pub const BLUE: Rgb = [0, 0, 255];
    pub const LIGHT_GRAY: Rgb = [200, 200, 200];
    pub const DARK_GRAY: Rgb = [100, 100, 100];
    pub const YELLOW: Rgb = [255, 255, 0];
    pub const ORANGE: Rgb = [255, 165, 0];
    pub const PURPLE: Rgb = [128, 0, 128];
    pub const CYAN: Rgb = [0, 255, 255];
    pub const ELECTRIC_BLUE: Rgb = [125, 249, 255];
    pub const HOT_PINK: Rgb = [255, 20, 147];
    pub const GOLD: Rgb = [255, 215, 0];
    pub const BLOOD_RED: Rgb = [139, 0, 0];
    pub const ZOMBIE_GREEN: Rgb = [34, 139, 34];

    /// Score text colors, indexed by `min(combo - 1, len - 1)`
    pub const SCORE_COLORS: [Rgb; 8] = [GREEN, YELLOW, ORANGE, RED, PURPLE, CYAN, HOT_PINK, GOLD];
    pub const RAINBOW_COLORS: [Rgb; 8] = [RED, ORANGE, YELLOW, GREEN, CYAN, BLUE, PURPLE, HOT_PINK];
    pub const BLOOD_COLORS: [Rgb; 4] = [BLOOD_RED, RED, [180, 0, 0], [120, 0, 0]];

    /// Score ramp color for a combo level (combo 0 and 1 share the first entry)
    #[inline]
    pub fn score_color(combo: u32) -> Rgb {
        let idx = (combo.saturating_sub(1) as usize).min(SCORE_COLORS.len() - 1);
        SCORE_COLORS[idx]
    }

    /// Rainbow palette lookup with wraparound for a fractional cycle position
    #[inline]
    pub fn rainbow(index: f32) -> Rgb {
        let len = RAINBOW_COLORS.len() as f32;
        RAINBOW_COLORS[(index.rem_euclid(len) as usize).min(RAINBOW_COLORS.len() - 1)]
    }
}

/// Axis-aligned rectangle in screen space (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Shrink (positive inset) or grow (negative inset) by `inset` on every side
    pub fn inset(&self, inset: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(inset),
            size: (self.size - Vec2::splat(inset * 2.0)).max(Vec2::ZERO),
        }
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }
}
