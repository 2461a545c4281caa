//! Transient visual effects
//!
//! Every effect ages by a fixed `TICK_MS` per update regardless of real frame
//! time, and is discarded (never pooled) once expired. Effects are purely
//! cosmetic and never feed back into scoring.

use std::collections::VecDeque;
use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::combo::{HitOutcome, Tier};
use crate::colors::{self, Rgb};
use crate::consts::*;

/// Shared capability of every self-aging effect
pub trait Effect {
    /// Advance one fixed tick
    fn update(&mut self);
    fn is_expired(&self) -> bool;
}

/// Update every effect in `items` and drop the expired ones
pub fn update_all<E: Effect>(items: &mut Vec<E>) {
    for item in items.iter_mut() {
        item.update();
    }
    items.retain(|e| !e.is_expired());
}

#[inline]
fn linear_alpha(age: u64, lifetime: u64) -> u8 {
    if lifetime == 0 {
        return 0;
    }
    (255.0 * (1.0 - age as f32 / lifetime as f32)).clamp(0.0, 255.0) as u8
}

#[inline]
fn progress(age: u64, lifetime: u64) -> f32 {
    if lifetime == 0 {
        1.0
    } else {
        (age as f32 / lifetime as f32).min(1.0)
    }
}

/// Font size bucket for text effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

// ---------------------------------------------------------------------------
// Blood particles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub lifetime_ms: u64,
    pub age_ms: u64,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: Rgb, lifetime_ms: u64) -> Self {
        Self {
            pos,
            vel,
            color,
            lifetime_ms,
            age_ms: 0,
        }
    }

    pub fn alpha(&self) -> u8 {
        linear_alpha(self.age_ms, self.lifetime_ms)
    }
}

impl Effect for Particle {
    fn update(&mut self) {
        self.age_ms += TICK_MS;
        if self.is_expired() {
            return;
        }
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
    }

    fn is_expired(&self) -> bool {
        self.age_ms >= self.lifetime_ms
    }
}

/// Number of blood particles for a combo level
pub fn blood_particle_count(combo: u32) -> u32 {
    (BLOOD_PARTICLE_COUNT_BASE + combo * BLOOD_PARTICLE_COUNT_COMBO_BONUS)
        .min(BLOOD_PARTICLE_COUNT_MAX)
}

/// Burst of blood flying outward and upward from `center`
pub fn spawn_blood<R: Rng + ?Sized>(center: Vec2, combo: u32, rng: &mut R) -> Vec<Particle> {
    (0..blood_particle_count(combo))
        .map(|_| {
            let vel = Vec2::new(rng.random_range(-12.0..=12.0), rng.random_range(-15.0..=-2.0));
            let color = *colors::BLOOD_COLORS.choose(rng).unwrap_or(&colors::BLOOD_RED);
            let lifetime = rng.random_range(1000..=1800);
            Particle::new(center, vel, color, lifetime)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Floating texts
// ---------------------------------------------------------------------------

/// Score/miss text that rises and fades
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub text: String,
    pub start: Vec2,
    pub color: Rgb,
    pub size: TextSize,
    pub lifetime_ms: u64,
    pub age_ms: u64,
}

impl FloatingText {
    pub fn new(text: impl Into<String>, start: Vec2, color: Rgb, lifetime_ms: u64) -> Self {
        Self {
            text: text.into(),
            start,
            color,
            size: TextSize::Small,
            lifetime_ms,
            age_ms: 0,
        }
    }

    pub fn progress(&self) -> f32 {
        progress(self.age_ms, self.lifetime_ms)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.start.x, self.start.y - self.progress() * FLOATING_TEXT_RISE)
    }

    pub fn alpha(&self) -> u8 {
        linear_alpha(self.age_ms, self.lifetime_ms)
    }
}

impl Effect for FloatingText {
    fn update(&mut self) {
        self.age_ms += TICK_MS;
    }

    fn is_expired(&self) -> bool {
        self.age_ms >= self.lifetime_ms
    }
}

/// Epic-tier text: cycles the rainbow palette and swells along a sine arc
#[derive(Debug, Clone)]
pub struct RainbowText {
    pub text: String,
    pub start: Vec2,
    pub lifetime_ms: u64,
    pub age_ms: u64,
    color_index: f32,
}

impl RainbowText {
    pub fn new(text: impl Into<String>, start: Vec2) -> Self {
        Self {
            text: text.into(),
            start,
            lifetime_ms: RAINBOW_TEXT_LIFETIME_MS,
            age_ms: 0,
            color_index: 0.0,
        }
    }

    pub fn progress(&self) -> f32 {
        progress(self.age_ms, self.lifetime_ms)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.start.x, self.start.y - self.progress() * RAINBOW_TEXT_RISE)
    }

    pub fn scale(&self) -> f32 {
        1.0 + (self.progress() * PI).sin() * 0.5
    }

    pub fn color(&self) -> Rgb {
        colors::rainbow(self.color_index)
    }

    pub fn alpha(&self) -> u8 {
        linear_alpha(self.age_ms, self.lifetime_ms)
    }
}

impl Effect for RainbowText {
    fn update(&mut self) {
        self.age_ms += TICK_MS;
        self.color_index = (self.color_index + 0.2) % colors::RAINBOW_COLORS.len() as f32;
    }

    fn is_expired(&self) -> bool {
        self.age_ms >= self.lifetime_ms
    }
}

// ---------------------------------------------------------------------------
// Rings
// ---------------------------------------------------------------------------

/// One circle outline produced by a ring effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub alpha: u8,
    pub width: f32,
}

/// Epic-tier burst of concentric growing rings
#[derive(Debug, Clone)]
pub struct Explosion {
    pub center: Vec2,
    pub color: Rgb,
    pub radius: f32,
    pub alpha: i32,
}

impl Explosion {
    pub fn new(center: Vec2, color: Rgb) -> Self {
        Self {
            center,
            color,
            radius: EXPLOSION_START_RADIUS,
            alpha: 255,
        }
    }

    pub fn rings(&self) -> Vec<Ring> {
        (0..3)
            .filter_map(|i| {
                let radius = self.radius - i as f32 * 15.0;
                (radius > 0.0).then(|| Ring {
                    radius,
                    alpha: (self.alpha - i * 50).clamp(0, 255) as u8,
                    width: 3.0,
                })
            })
            .collect()
    }
}

impl Effect for Explosion {
    fn update(&mut self) {
        self.radius += EXPLOSION_GROWTH_RATE;
        self.alpha -= EXPLOSION_FADE_RATE;
    }

    fn is_expired(&self) -> bool {
        self.alpha <= 0 || self.radius >= EXPLOSION_MAX_RADIUS
    }
}

/// Great-tier ripple: rings advance outward and wrap inside the max radius
#[derive(Debug, Clone)]
pub struct Wave {
    pub center: Vec2,
    pub color: Rgb,
    pub radius: f32,
    pub alpha: i32,
}

impl Wave {
    pub fn new(center: Vec2, color: Rgb) -> Self {
        Self {
            center,
            color,
            radius: 0.0,
            alpha: 255,
        }
    }

    pub fn rings(&self) -> Vec<Ring> {
        (0..WAVE_COUNT as i32)
            .filter_map(|i| {
                let radius = (self.radius - i as f32 * 30.0).rem_euclid(WAVE_MAX_RADIUS);
                (radius > 0.0 && radius < WAVE_MAX_RADIUS - 5.0).then(|| Ring {
                    radius,
                    alpha: (self.alpha - i * 60).clamp(0, 255) as u8,
                    width: 2.0,
                })
            })
            .collect()
    }
}

impl Effect for Wave {
    fn update(&mut self) {
        self.radius += WAVE_SPEED;
        self.alpha -= WAVE_FADE_RATE;
    }

    fn is_expired(&self) -> bool {
        self.alpha <= 0
    }
}

// ---------------------------------------------------------------------------
// Stars
// ---------------------------------------------------------------------------

/// Spinning, drifting, growing five-pointed star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub max_size: f32,
    pub growth_rate: f32,
    /// Degrees
    pub rotation: f32,
    pub rotation_speed: f32,
    pub color: Rgb,
    pub alpha: f32,
    pub fade_rate: f32,
    pub lifetime_ms: u64,
    pub age_ms: u64,
}

impl Star {
    pub fn random<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        let size = rng.random_range(STAR_SIZE_MIN..=STAR_SIZE_MAX);
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-4.0..=-1.0)),
            size,
            max_size: size * 3.0,
            growth_rate: rng.random_range(0.1..=0.3),
            rotation: 0.0,
            rotation_speed: rng.random_range(STAR_ROTATION_SPEED_MIN..=STAR_ROTATION_SPEED_MAX),
            color: *colors::RAINBOW_COLORS.choose(rng).unwrap_or(&colors::GOLD),
            alpha: 255.0,
            fade_rate: rng.random_range(3.0..=8.0),
            lifetime_ms: rng.random_range(1000..=2000),
            age_ms: 0,
        }
    }

    /// Long-lived, slow-fading decorative star
    pub fn background<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            lifetime_ms: BACKGROUND_STAR_LIFETIME_MS,
            fade_rate: 1.0,
            ..Self::random(pos, rng)
        }
    }

    /// Ten polygon vertices alternating outer (size) and inner (0.4 * size) radius
    pub fn outline(&self) -> [Vec2; 10] {
        std::array::from_fn(|i| {
            let angle = (self.rotation + i as f32 * 36.0).to_radians();
            let radius = if i % 2 == 0 { self.size } else { self.size * 0.4 };
            self.pos + Vec2::new(angle.cos(), angle.sin()) * radius
        })
    }
}

impl Effect for Star {
    fn update(&mut self) {
        self.age_ms += TICK_MS;
        if self.is_expired() {
            return;
        }
        self.pos += self.vel;
        self.size = (self.size + self.growth_rate).min(self.max_size);
        self.rotation += self.rotation_speed;
        self.alpha = (self.alpha - self.fade_rate).max(0.0);
    }

    fn is_expired(&self) -> bool {
        self.age_ms >= self.lifetime_ms
    }
}

/// `count` stars scattered around `center` by integer offsets in `[-spread, spread]`
pub fn star_shower<R: Rng + ?Sized>(center: Vec2, count: usize, spread: i32, rng: &mut R) -> Vec<Star> {
    (0..count)
        .map(|_| {
            let offset = Vec2::new(
                rng.random_range(-spread..=spread) as f32,
                rng.random_range(-spread..=spread) as f32,
            );
            Star::random(center + offset, rng)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Screen shake
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ScreenShake {
    pub amount: i32,
    pub duration_ms: u64,
    pub timer_ms: u64,
}

impl ScreenShake {
    /// Raise amplitude and duration to at least the requested values and restart the timer
    pub fn add_shake(&mut self, amount: i32, duration_ms: u64) {
        self.amount = self.amount.max(amount);
        self.duration_ms = self.duration_ms.max(duration_ms);
        self.timer_ms = 0;
    }

    /// Returns true while still shaking
    pub fn update(&mut self) -> bool {
        if self.timer_ms < self.duration_ms {
            self.timer_ms += TICK_MS;
            true
        } else {
            self.amount = 0;
            false
        }
    }

    pub fn offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        if self.amount > 0 {
            Vec2::new(
                rng.random_range(-self.amount..=self.amount) as f32,
                rng.random_range(-self.amount..=self.amount) as f32,
            )
        } else {
            Vec2::ZERO
        }
    }
}

// ---------------------------------------------------------------------------
// Pointer trail
// ---------------------------------------------------------------------------

/// One glow layer of one trail segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Rgb,
    pub alpha: u8,
    pub thickness: f32,
}

#[derive(Debug, Clone, Default)]
pub struct PointerTrail {
    positions: VecDeque<Vec2>,
}

impl PointerTrail {
    pub fn push(&mut self, pos: Vec2) {
        self.positions.push_back(pos);
        while self.positions.len() > TRAIL_CAPACITY {
            self.positions.pop_front();
        }
    }

    /// Oldest first
    pub fn positions(&self) -> impl Iterator<Item = &Vec2> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Segments with three glow layers each; newer segments are brighter and
    /// thicker, and every segment thickens with the current combo.
    pub fn segments(&self, combo: u32, now: u64) -> Vec<TrailSegment> {
        let len = self.positions.len();
        if len < 2 {
            return Vec::new();
        }
        let combo_bonus = combo.min(TRAIL_COMBO_CAP) as f32;
        let mut out = Vec::with_capacity((len - 1) * 3);
        for (i, (from, to)) in self
            .positions
            .iter()
            .zip(self.positions.iter().skip(1))
            .enumerate()
        {
            if from == to {
                continue;
            }
            let alpha = (255 * (i + 1) / len) as i32;
            let color = colors::rainbow(i as f32 + now as f32 * 0.01);
            let thickness = (i / 2).max(1) as f32 + combo_bonus;
            for layer in 0..3 {
                out.push(TrailSegment {
                    from: *from,
                    to: *to,
                    color,
                    alpha: (alpha - layer * 60).max(0) as u8,
                    thickness: thickness + layer as f32 * 2.0,
                });
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Effect collections
// ---------------------------------------------------------------------------

/// All effects owned by one session, one collection per kind
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    pub rainbow_texts: Vec<RainbowText>,
    pub explosions: Vec<Explosion>,
    pub waves: Vec<Wave>,
    pub stars: Vec<Star>,
    pub shake: ScreenShake,
    pub trail: PointerTrail,
    /// Shake offset sampled for the current frame
    pub shake_offset: Vec2,
    last_star_spawn_ms: u64,
}

impl Effects {
    pub fn new(now: u64) -> Self {
        Self {
            last_star_spawn_ms: now,
            ..Default::default()
        }
    }

    /// Age every effect by one tick and sample this frame's shake offset
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        update_all(&mut self.particles);
        update_all(&mut self.texts);
        update_all(&mut self.rainbow_texts);
        update_all(&mut self.explosions);
        update_all(&mut self.waves);
        update_all(&mut self.stars);
        self.shake.update();
        self.shake_offset = self.shake.offset(rng);
    }

    /// Total live transient effects (excludes shake and trail)
    pub fn count(&self) -> usize {
        self.particles.len()
            + self.texts.len()
            + self.rainbow_texts.len()
            + self.explosions.len()
            + self.waves.len()
            + self.stars.len()
    }

    /// Fire the feedback for a scored hit on a zombie centered at `center`
    pub fn spawn_hit_feedback<R: Rng + ?Sized>(&mut self, center: Vec2, outcome: &HitOutcome, rng: &mut R) {
        let (amount, duration) = outcome.tier.shake();
        self.shake.add_shake(amount, duration);

        let gain = outcome.score_gain;
        let combo = outcome.combo;
        let text_pos = center - Vec2::new(0.0, 20.0);
        match outcome.tier {
            Tier::Epic => {
                self.explosions.push(Explosion::new(center, colors::GOLD));
                self.rainbow_texts.push(RainbowText::new(
                    format!("EPIC +{gain} x{combo}!"),
                    center - Vec2::new(0.0, 30.0),
                ));
                self.stars.extend(star_shower(center, 10, 50, rng));
            }
            Tier::Great => {
                self.waves.push(Wave::new(center, colors::ELECTRIC_BLUE));
                self.texts.push(FloatingText::new(
                    format!("GREAT +{gain} x{combo}!"),
                    text_pos,
                    colors::score_color(combo),
                    FLOATING_TEXT_LIFETIME_MS,
                ));
                self.stars.extend(star_shower(center, 5, 30, rng));
            }
            Tier::Normal => {
                let text = if combo > 1 {
                    format!("+{gain} x{combo}")
                } else {
                    format!("+{gain}")
                };
                self.texts.push(FloatingText::new(
                    text,
                    text_pos,
                    colors::score_color(combo),
                    FLOATING_TEXT_LIFETIME_MS,
                ));
            }
        }

        self.particles.extend(spawn_blood(center, combo, rng));
    }

    pub fn spawn_miss(&mut self, pos: Vec2) {
        self.texts
            .push(FloatingText::new("MISS!", pos, colors::RED, MISS_TEXT_LIFETIME_MS));
    }

    /// Decorative stars every `STAR_SPAWN_INTERVAL_MS`; returns how many spawned
    pub fn spawn_background_stars<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) -> usize {
        if now.saturating_sub(self.last_star_spawn_ms) <= STAR_SPAWN_INTERVAL_MS {
            return 0;
        }
        for _ in 0..BACKGROUND_STARS_PER_SPAWN {
            let pos = Vec2::new(
                rng.random_range(0.0..=SCREEN_WIDTH),
                rng.random_range(0.0..=SCREEN_HEIGHT),
            );
            self.stars.push(Star::background(pos, rng));
        }
        self.last_star_spawn_ms = now;
        BACKGROUND_STARS_PER_SPAWN
    }
}
