//! One play session: owns every zombie, effect and counter
//!
//! A session is created when a difficulty is picked and dropped on reset;
//! nothing survives from one session to the next.

use glam::Vec2;
use rand::Rng;

use super::combo::{ComboTracker, HitOutcome};
use super::effects::Effects;
use super::spawn::SpawnScheduler;
use super::state::{Difficulty, DifficultyConfig, Stats};
use super::zombie::Zombie;

/// What a click on the play field did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Hit { zombie_id: u32, outcome: HitOutcome },
    Miss,
    /// Game over overlay is up; clicks on the field are ignored
    Ignored,
}

/// What one session update did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub spawned: Option<u32>,
    /// Zombies that timed out unhit (each counted as a miss)
    pub expired: Vec<u32>,
    /// Zombies removed after their splat finished
    pub cleared: Vec<u32>,
    /// True on the tick the session ran out of time
    pub ended: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub difficulty: Difficulty,
    pub config: DifficultyConfig,
    pub start_ms: u64,
    /// Spawn order; hit-tests check oldest first
    pub zombies: Vec<Zombie>,
    pub effects: Effects,
    pub combo: ComboTracker,
    pub spawner: SpawnScheduler,
    pub game_over: bool,
    next_id: u32,
}

impl Session {
    pub fn new(difficulty: Difficulty, now: u64) -> Self {
        Self {
            difficulty,
            config: difficulty.config(),
            start_ms: now,
            zombies: Vec::new(),
            effects: Effects::new(now),
            combo: ComboTracker::new(),
            spawner: SpawnScheduler::new(now),
            game_over: false,
            next_id: 1,
        }
    }

    fn next_zombie_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn stats(&self) -> Stats {
        Stats {
            hits: self.combo.hits,
            misses: self.combo.misses,
            combo: self.combo.combo,
            max_combo: self.combo.max_combo,
            difficulty: self.difficulty,
            session_start_ms: self.start_ms,
            session_duration_ms: self.config.duration_ms,
        }
    }

    pub fn zombie(&self, id: u32) -> Option<&Zombie> {
        self.zombies.iter().find(|z| z.id == id)
    }

    /// Hit-test `pos` against live, unhit zombies. A hit scores the combo and
    /// fires tier effects; anything else is a miss.
    pub fn handle_click<R: Rng + ?Sized>(&mut self, pos: Vec2, now: u64, rng: &mut R) -> ClickOutcome {
        if self.game_over {
            return ClickOutcome::Ignored;
        }

        let target = self
            .zombies
            .iter_mut()
            .find(|z| z.is_alive(now) && z.rect().contains(pos));

        match target {
            Some(zombie) => {
                let outcome = self.combo.register_hit(now);
                zombie.hit_zombie(now);
                let (id, center) = (zombie.id, zombie.pos);
                self.effects.spawn_hit_feedback(center, &outcome, rng);
                ClickOutcome::Hit {
                    zombie_id: id,
                    outcome,
                }
            }
            None => {
                self.combo.register_miss();
                self.effects.spawn_miss(pos);
                ClickOutcome::Miss
            }
        }
    }

    /// Advance one playing tick. Does nothing once the session is over.
    pub fn update<R: Rng + ?Sized>(&mut self, now: u64, rng: &mut R) -> SessionUpdate {
        let mut result = SessionUpdate::default();
        if self.game_over {
            return result;
        }

        self.effects.update(rng);

        let id = self.next_id;
        if let Some(zombie) = self
            .spawner
            .try_spawn(&self.zombies, &self.config, id, now, rng)
        {
            self.next_zombie_id();
            result.spawned = Some(zombie.id);
            self.zombies.push(zombie);
        }

        self.effects.spawn_background_stars(now, rng);

        if now.saturating_sub(self.start_ms) >= self.config.duration_ms {
            self.game_over = true;
            result.ended = true;
        }

        let combo = &mut self.combo;
        self.zombies.retain(|z| {
            if !z.should_disappear(now) {
                return true;
            }
            if z.hit {
                result.cleared.push(z.id);
            } else {
                combo.register_miss();
                result.expired.push(z.id);
            }
            false
        });

        result
    }
}
