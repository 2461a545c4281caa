//! Zombie lifecycle: pop-in, idle, warning, hit/splat, expiry
//!
//! Timing is driven by the session clock (`now` in milliseconds), not by
//! the fixed effect tick. Position and lifetime are fixed at spawn.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::*;

/// Animation phase of a zombie at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZombiePhase {
    /// Scaling/bouncing into view
    PoppingUp,
    /// Sitting still, waiting to be smashed
    Idle,
    /// About to vanish: wiggles and glows
    Warning,
    /// Hit; splat overlay plays until removal
    Splatting,
}

/// Scale and vertical bounce produced by the pop-in animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopTransform {
    pub scale: f32,
    pub bounce: f32,
}

impl PopTransform {
    pub const REST: Self = Self {
        scale: 1.0,
        bounce: 0.0,
    };
}

/// Wiggle/glow escalation during the warning window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarningEffect {
    /// Horizontal offset in pixels
    pub wiggle: f32,
    /// Glow alpha 0-100
    pub glow: u8,
}

/// One clickable target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub id: u32,
    /// Center of the sprite (one of the spawn points)
    pub pos: Vec2,
    pub spawn_ms: u64,
    /// `None` means the zombie never expires on its own (Classic)
    pub lifetime_ms: Option<u64>,
    pub hit: bool,
    pub splat_ms: u64,
}

impl Zombie {
    /// Create a zombie at `pos`, drawing its lifetime from
    /// `[1500/mult, 3000/mult]` ms. A multiplier of 0 disables expiry.
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        pos: Vec2,
        now: u64,
        speed_multiplier: f32,
        rng: &mut R,
    ) -> Self {
        Self::with_lifetime(id, pos, now, lifetime_for(speed_multiplier, rng))
    }

    pub fn with_lifetime(id: u32, pos: Vec2, now: u64, lifetime_ms: Option<u64>) -> Self {
        Self {
            id,
            pos,
            spawn_ms: now,
            lifetime_ms,
            hit: false,
            splat_ms: 0,
        }
    }

    #[inline]
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.spawn_ms)
    }

    /// Milliseconds until natural expiry (negative once past it)
    pub fn remaining(&self, now: u64) -> Option<i64> {
        self.lifetime_ms
            .map(|lifetime| lifetime as i64 - self.age(now) as i64)
    }

    /// Full sprite rect used for click hit-tests
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, ZOMBIE_SIZE)
    }

    /// Shrunk rect used to decide whether a spawn point is taken
    pub fn occupancy_rect(&self) -> Rect {
        self.rect().inset(OCCUPANCY_INSET)
    }

    pub fn phase(&self, now: u64) -> ZombiePhase {
        if self.hit {
            ZombiePhase::Splatting
        } else if self.age(now) < ZOMBIE_POP_DURATION_MS {
            ZombiePhase::PoppingUp
        } else if self.remaining(now).is_some_and(|r| r <= ZOMBIE_WARNING_MS as i64) {
            ZombiePhase::Warning
        } else {
            ZombiePhase::Idle
        }
    }

    /// Unhit and not yet past its lifetime
    pub fn is_alive(&self, now: u64) -> bool {
        !self.hit && self.lifetime_ms.is_none_or(|lifetime| self.age(now) < lifetime)
    }

    /// Mark as hit. Returns false (and changes nothing) if already hit.
    pub fn hit_zombie(&mut self, now: u64) -> bool {
        if self.hit {
            return false;
        }
        self.hit = true;
        self.splat_ms = now;
        true
    }

    /// Whether the owning session should remove this zombie now
    pub fn should_disappear(&self, now: u64) -> bool {
        if self.hit {
            return now.saturating_sub(self.splat_ms) > ZOMBIE_SPLAT_DURATION_MS;
        }
        match self.lifetime_ms {
            Some(lifetime) => self.age(now) > lifetime,
            None => false,
        }
    }

    /// Pop-in scale and bounce. Returns to rest exactly at animation end.
    pub fn pop_transform(&self, now: u64) -> PopTransform {
        let elapsed = self.age(now);
        if elapsed >= ZOMBIE_POP_DURATION_MS {
            return PopTransform::REST;
        }
        let p = elapsed as f32 / ZOMBIE_POP_DURATION_MS as f32;
        // Quadratic ease-in to the midpoint, then an overshooting ease-out
        let scale = if p < 0.5 {
            2.0 * p * p
        } else {
            1.0 - 2.0 * (p - 1.0) * (p - 1.0) * 0.3
        };
        let bounce = (p * std::f32::consts::PI * 3.0).sin() * 5.0 * (1.0 - p);
        PopTransform { scale, bounce }
    }

    /// 0 at the start of the warning window, approaching 1 at expiry
    fn warning_progress(&self, now: u64) -> Option<f32> {
        if self.hit {
            return None;
        }
        let remaining = self.remaining(now)?;
        if remaining > 0 && remaining <= ZOMBIE_WARNING_MS as i64 {
            Some(1.0 - remaining as f32 / ZOMBIE_WARNING_MS as f32)
        } else {
            None
        }
    }

    pub fn warning_effect(&self, now: u64) -> Option<WarningEffect> {
        self.warning_progress(now).map(|w| WarningEffect {
            wiggle: (now as f32 * 0.02).sin() * 3.0 * w,
            glow: (100.0 * w) as u8,
        })
    }

    /// Splat overlay progress 0..=1 (hit zombies only)
    pub fn splat_progress(&self, now: u64) -> Option<f32> {
        self.hit.then(|| {
            (now.saturating_sub(self.splat_ms) as f32 / ZOMBIE_SPLAT_DURATION_MS as f32).min(1.0)
        })
    }
}

/// Draw a lifetime for the given speed multiplier (`None` = infinite)
pub fn lifetime_for<R: Rng + ?Sized>(speed_multiplier: f32, rng: &mut R) -> Option<u64> {
    if speed_multiplier <= 0.0 {
        return None;
    }
    // Rounded so f32 multipliers like 1.2 give whole-ms bounds (1250, not 1249)
    let lo = (ZOMBIE_LIFETIME_MIN_MS / speed_multiplier).round() as u64;
    let hi = (ZOMBIE_LIFETIME_MAX_MS / speed_multiplier).round() as u64;
    Some(rng.random_range(lo..=hi))
}
