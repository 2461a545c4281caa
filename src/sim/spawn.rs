//! Spawn scheduling over the fixed 3x3 grid of spawn points
//!
//! A spawn is attempted every playing tick. The interval threshold is redrawn
//! from `[min, max]` on every check, so a tick that fails to spawn does not
//! commit to a deadline; inter-spawn times skew shorter than a single uniform
//! draw would give.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::DifficultyConfig;
use super::zombie::Zombie;
use crate::consts::SPAWN_POINTS;

/// True if any zombie's inset-shrunk rect covers `point`
pub fn is_point_occupied(zombies: &[Zombie], point: Vec2) -> bool {
    zombies.iter().any(|z| z.occupancy_rect().contains(point))
}

/// Spawn points no zombie currently occupies, in grid order
pub fn free_points(zombies: &[Zombie]) -> Vec<Vec2> {
    SPAWN_POINTS
        .iter()
        .copied()
        .filter(|p| !is_point_occupied(zombies, *p))
        .collect()
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    pub last_spawn_ms: u64,
}

impl SpawnScheduler {
    pub fn new(now: u64) -> Self {
        Self { last_spawn_ms: now }
    }

    /// Whether capacity and the (freshly drawn) interval allow a spawn now
    pub fn is_due<R: Rng + ?Sized>(
        &self,
        live: usize,
        config: &DifficultyConfig,
        now: u64,
        rng: &mut R,
    ) -> bool {
        if live >= config.max_zombies_on_screen {
            return false;
        }
        let threshold = rng.random_range(config.spawn_interval_min_ms..=config.spawn_interval_max_ms);
        now.saturating_sub(self.last_spawn_ms) > threshold
    }

    /// Try to place a new zombie. Returns `None` when not due or when every
    /// point is occupied; the caller just tries again next tick.
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        zombies: &[Zombie],
        config: &DifficultyConfig,
        id: u32,
        now: u64,
        rng: &mut R,
    ) -> Option<Zombie> {
        if !self.is_due(zombies.len(), config, now, rng) {
            return None;
        }
        let free = free_points(zombies);
        let Some(&pos) = free.choose(rng) else {
            log::debug!("All spawn points occupied, skipping spawn");
            return None;
        };
        self.last_spawn_ms = now;
        Some(Zombie::spawn(id, pos, now, config.speed_multiplier, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Difficulty;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_occupancy_uses_inset_rect() {
        let z = Zombie::with_lifetime(1, SPAWN_POINTS[4], 0, None);
        let zombies = vec![z];
        assert!(is_point_occupied(&zombies, SPAWN_POINTS[4]));
        assert!(!is_point_occupied(&zombies, SPAWN_POINTS[3]));
        // Inside the full rect but outside the shrunk one
        assert!(!is_point_occupied(&zombies, SPAWN_POINTS[4] + Vec2::new(30.0, 0.0)));
        assert_eq!(free_points(&zombies).len(), 8);
    }

    #[test]
    fn test_not_due_before_min_interval() {
        let mut rng = Pcg32::seed_from_u64(1);
        let config = Difficulty::Medium.config();
        let mut sched = SpawnScheduler::new(0);
        for now in (0..=1000).step_by(16) {
            assert!(sched.try_spawn(&[], &config, 1, now, &mut rng).is_none());
        }
        // Strictly past the max interval, every draw passes
        let z = sched.try_spawn(&[], &config, 1, 2001, &mut rng);
        assert!(z.is_some());
        assert_eq!(sched.last_spawn_ms, 2001);
    }

    #[test]
    fn test_respects_capacity() {
        let mut rng = Pcg32::seed_from_u64(2);
        let config = Difficulty::Classic.config();
        let mut sched = SpawnScheduler::new(0);
        let zombies: Vec<Zombie> = SPAWN_POINTS[..3]
            .iter()
            .enumerate()
            .map(|(i, p)| Zombie::with_lifetime(i as u32, *p, 0, None))
            .collect();
        assert!(sched.try_spawn(&zombies, &config, 9, 1_000_000, &mut rng).is_none());
    }

    #[test]
    fn test_full_grid_skips_silently() {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = DifficultyConfig {
            max_zombies_on_screen: 20,
            ..Difficulty::Hard.config()
        };
        let zombies: Vec<Zombie> = SPAWN_POINTS
            .iter()
            .enumerate()
            .map(|(i, p)| Zombie::with_lifetime(i as u32, *p, 0, None))
            .collect();
        let mut sched = SpawnScheduler::new(0);
        assert!(sched.try_spawn(&zombies, &config, 99, 100_000, &mut rng).is_none());
        assert_eq!(sched.last_spawn_ms, 0);
    }

    #[test]
    fn test_never_reuses_occupied_point() {
        let mut rng = Pcg32::seed_from_u64(4);
        let config = DifficultyConfig {
            max_zombies_on_screen: 9,
            ..Difficulty::Hard.config()
        };
        let mut sched = SpawnScheduler::new(0);
        let mut zombies = Vec::new();
        let mut now = 0;
        while zombies.len() < 9 {
            now += 16;
            if let Some(z) = sched.try_spawn(&zombies, &config, zombies.len() as u32, now, &mut rng) {
                assert!(!is_point_occupied(&zombies, z.pos));
                zombies.push(z);
            }
        }
        let mut positions: Vec<(i32, i32)> =
            zombies.iter().map(|z| (z.pos.x as i32, z.pos.y as i32)).collect();
        positions.sort();
        positions.dedup();
        assert_eq!(positions.len(), 9);
    }

    #[test]
    fn test_redrawn_threshold_distribution() {
        // With the threshold redrawn every tick, the first spawn lands inside
        // [min, max] and on average earlier than the midpoint of the range.
        let config = Difficulty::Medium.config();
        let mut total = 0u64;
        let runs = 400;
        for seed in 0..runs {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut sched = SpawnScheduler::new(0);
            let mut now = 0;
            loop {
                now += 16;
                if sched.try_spawn(&[], &config, 0, now, &mut rng).is_some() {
                    break;
                }
            }
            assert!(now > config.spawn_interval_min_ms);
            assert!(now <= config.spawn_interval_max_ms + 16);
            total += now;
        }
        let mean = total / runs;
        assert!(mean < (config.spawn_interval_min_ms + config.spawn_interval_max_ms) / 2);
    }
}
