//! Combo streaks and scoring
//!
//! Each hit is worth the combo level it produces; misses reset the streak.
//! Displayed score is `hits - misses`.

use serde::{Deserialize, Serialize};

use crate::consts::{COMBO_WINDOW_MS, EPIC_COMBO, GREAT_COMBO};

/// Effect intensity bracket selected by combo magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Normal,
    Great,
    Epic,
}

impl Tier {
    pub fn for_combo(combo: u32) -> Self {
        if combo >= EPIC_COMBO {
            Tier::Epic
        } else if combo >= GREAT_COMBO {
            Tier::Great
        } else {
            Tier::Normal
        }
    }

    /// Screen shake (amplitude px, duration ms) requested by this tier
    pub fn shake(&self) -> (i32, u64) {
        match self {
            Tier::Normal => (5, 200),
            Tier::Great => (10, 300),
            Tier::Epic => (15, 400),
        }
    }
}

/// Result of scoring a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub combo: u32,
    pub score_gain: u32,
    pub tier: Tier,
}

/// Hit/miss counters and the combo streak
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboTracker {
    pub hits: u32,
    pub misses: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub last_hit_ms: Option<u64>,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score a successful hit at `now`
    pub fn register_hit(&mut self, now: u64) -> HitOutcome {
        let in_window = self
            .last_hit_ms
            .is_some_and(|last| now.saturating_sub(last) < COMBO_WINDOW_MS);
        self.combo = if in_window { self.combo + 1 } else { 1 };
        self.max_combo = self.max_combo.max(self.combo);
        self.last_hit_ms = Some(now);

        let score_gain = self.combo;
        self.hits += score_gain;

        HitOutcome {
            combo: self.combo,
            score_gain,
            tier: Tier::for_combo(self.combo),
        }
    }

    /// A click that landed on nothing, or a zombie that expired unhit
    pub fn register_miss(&mut self) {
        self.misses += 1;
        self.combo = 0;
    }

    /// Displayed score
    pub fn score(&self) -> i64 {
        self.hits as i64 - self.misses as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_hit_starts_combo() {
        let mut c = ComboTracker::new();
        let out = c.register_hit(100);
        assert_eq!(out.combo, 1);
        assert_eq!(out.score_gain, 1);
        assert_eq!(out.tier, Tier::Normal);
        assert_eq!(c.hits, 1);
    }

    #[test]
    fn test_window_boundary() {
        let mut c = ComboTracker::new();
        c.register_hit(1000);
        assert_eq!(c.register_hit(2999).combo, 2);
        // Exactly the window length apart is outside
        assert_eq!(c.register_hit(4999).combo, 1);
    }

    #[test]
    fn test_miss_resets_combo() {
        let mut c = ComboTracker::new();
        c.register_hit(0);
        c.register_hit(100);
        c.register_miss();
        assert_eq!(c.combo, 0);
        assert_eq!(c.misses, 1);
        assert_eq!(c.register_hit(200).combo, 1);
        assert_eq!(c.max_combo, 2);
        assert_eq!(c.score(), 1 + 2 + 1 - 1);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(Tier::for_combo(0), Tier::Normal);
        assert_eq!(Tier::for_combo(4), Tier::Normal);
        assert_eq!(Tier::for_combo(5), Tier::Great);
        assert_eq!(Tier::for_combo(9), Tier::Great);
        assert_eq!(Tier::for_combo(10), Tier::Epic);
        assert_eq!(Tier::for_combo(99), Tier::Epic);
    }

    #[derive(Debug, Clone)]
    enum Event {
        Hit(u64),
        Miss,
    }

    fn event_strategy() -> impl Strategy<Value = Event> {
        prop_oneof![
            3 => (0u64..4000).prop_map(Event::Hit),
            1 => Just(Event::Miss),
        ]
    }

    proptest! {
        #[test]
        fn prop_combo_accounting(events in prop::collection::vec(event_strategy(), 0..200)) {
            let mut c = ComboTracker::new();
            let mut now = 0u64;
            let mut expected_hits = 0u32;
            let mut expected_misses = 0u32;

            for ev in events {
                let prev_max = c.max_combo;
                let prev_combo = c.combo;
                let prev_last = c.last_hit_ms;
                match ev {
                    Event::Hit(gap) => {
                        now += gap;
                        let out = c.register_hit(now);
                        let continued = prev_last.is_some_and(|l| now - l < COMBO_WINDOW_MS);
                        let expected = if continued { prev_combo + 1 } else { 1 };
                        prop_assert_eq!(out.combo, expected);
                        prop_assert_eq!(out.score_gain, out.combo);
                        prop_assert_eq!(out.tier, Tier::for_combo(out.combo));
                        expected_hits += out.score_gain;
                    }
                    Event::Miss => {
                        c.register_miss();
                        prop_assert_eq!(c.combo, 0);
                        expected_misses += 1;
                    }
                }
                prop_assert!(c.max_combo >= prev_max);
                prop_assert!(c.max_combo >= c.combo);
            }

            prop_assert_eq!(c.hits, expected_hits);
            prop_assert_eq!(c.misses, expected_misses);
            prop_assert_eq!(c.score(), expected_hits as i64 - expected_misses as i64);
        }
    }
}
