//! Fixed-rate game tick and screen state machine
//!
//! Menu -> Difficulty -> Playing (-> game over overlay) -> Difficulty | Menu.
//! One call to [`tick`] processes this frame's input, then advances the
//! active session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::session::{ClickOutcome, Session};
use super::state::{Difficulty, GameEvent, GamePhase, MusicCue, SoundId, Stats};
use crate::consts::{GAME_OVER_MUSIC_FADE_MS, MENU_MUSIC_FADE_MS};

/// Commands produced by UI buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Menu: "Play Game"
    OpenDifficulty,
    /// Menu: "Quit"
    Quit,
    /// Difficulty screen preset buttons
    StartGame(Difficulty),
    /// Difficulty "Back", game over "Main Menu"
    BackToMenu,
    /// Game over "Play Again"
    PlayAgain,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position, if it moved this frame
    pub pointer: Option<Vec2>,
    /// Left clicks on the play field
    pub clicks: Vec<Vec2>,
    /// Button presses, in order
    pub commands: Vec<UiCommand>,
    /// Escape key
    pub escape: bool,
    /// Window close request
    pub close: bool,
}

/// Whether the outer loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Toggles that affect what the core produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    pub screen_shake: bool,
    pub pointer_trail: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            screen_shake: true,
            pointer_trail: true,
        }
    }
}

/// Whole-game state: current screen, the active session and the RNG
#[derive(Debug, Clone)]
pub struct Game {
    pub seed: u64,
    pub phase: GamePhase,
    pub session: Session,
    pub options: GameOptions,
    /// Last known pointer position
    pub pointer: Vec2,
    events: Vec<GameEvent>,
    rng: Pcg32,
}

impl Game {
    /// New game on the menu screen. Queues the menu music.
    pub fn new(seed: u64, now: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            session: Session::new(Difficulty::default(), now),
            options: GameOptions::default(),
            pointer: Vec2::ZERO,
            events: vec![GameEvent::Music(MusicCue::Play)],
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn with_options(mut self, options: GameOptions) -> Self {
        self.options = options;
        self
    }

    /// Snapshot for the HUD, computed on demand
    pub fn stats(&self) -> Stats {
        self.session.stats()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::Playing && self.session.game_over
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Screen {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.events.push(GameEvent::PhaseChanged(phase));
    }

    /// Full reset: fresh session, menu music restarted
    fn enter_menu(&mut self, now: u64) {
        self.set_phase(GamePhase::Menu);
        self.events
            .push(GameEvent::Music(MusicCue::FadeOut(MENU_MUSIC_FADE_MS)));
        self.events.push(GameEvent::Music(MusicCue::Play));
        self.session = Session::new(self.session.difficulty, now);
    }

    /// Begin a session with the chosen preset
    pub fn start_game(&mut self, difficulty: Difficulty, now: u64) {
        self.session = Session::new(difficulty, now);
        log::info!(
            "Starting {} session: {:?}",
            difficulty.as_str(),
            self.session.config
        );
        self.set_phase(GamePhase::Playing);
        self.events.push(GameEvent::SessionStarted(difficulty));
        self.events.push(GameEvent::Music(MusicCue::Play));
    }

    /// Interpret a button command. Commands that make no sense on the
    /// current screen are ignored.
    pub fn apply_command(&mut self, command: UiCommand, now: u64) -> Flow {
        let game_over = self.is_game_over();
        let accepted = match (self.phase, command) {
            (GamePhase::Menu, UiCommand::OpenDifficulty) => {
                self.set_phase(GamePhase::Difficulty);
                true
            }
            (GamePhase::Menu, UiCommand::Quit) => {
                self.events.push(GameEvent::Sound(SoundId::Click));
                return Flow::Quit;
            }
            (GamePhase::Difficulty, UiCommand::StartGame(difficulty)) => {
                self.start_game(difficulty, now);
                true
            }
            (GamePhase::Difficulty, UiCommand::BackToMenu) => {
                self.enter_menu(now);
                true
            }
            (GamePhase::Playing, UiCommand::PlayAgain) if game_over => {
                self.set_phase(GamePhase::Difficulty);
                true
            }
            (GamePhase::Playing, UiCommand::BackToMenu) if game_over => {
                self.enter_menu(now);
                true
            }
            _ => false,
        };

        if accepted {
            self.events.push(GameEvent::Sound(SoundId::Click));
        } else {
            log::debug!("Ignoring {:?} on {:?}", command, self.phase);
        }
        Flow::Continue
    }

    /// Escape: quit from the menu, otherwise back to the menu
    pub fn escape(&mut self, now: u64) -> Flow {
        if self.phase == GamePhase::Menu {
            return Flow::Quit;
        }
        self.enter_menu(now);
        Flow::Continue
    }

    /// Left click on the play field
    pub fn click(&mut self, pos: Vec2, now: u64) -> ClickOutcome {
        if self.phase != GamePhase::Playing {
            return ClickOutcome::Ignored;
        }
        let outcome = self.session.handle_click(pos, now, &mut self.rng);
        if matches!(outcome, ClickOutcome::Hit { .. }) {
            self.events.push(GameEvent::Sound(SoundId::Splat));
        }
        outcome
    }

    /// Advance the active session one tick (no-op off the Playing screen)
    fn update(&mut self, now: u64) {
        if self.phase != GamePhase::Playing || self.session.game_over {
            return;
        }

        if self.options.pointer_trail {
            self.session.effects.trail.push(self.pointer);
        }

        let result = self.session.update(now, &mut self.rng);

        if let Some(id) = result.spawned {
            self.events.push(GameEvent::ZombieSpawned { id });
        }
        for &id in &result.expired {
            log::debug!("Zombie {} expired unhit", id);
            self.events.push(GameEvent::ZombieExpired { id });
        }
        if result.ended {
            let stats = self.session.stats();
            log::info!(
                "Game over ({}): score {} (hits {}, misses {}, max combo {})",
                stats.difficulty.as_str(),
                stats.score(),
                stats.hits,
                stats.misses,
                stats.max_combo
            );
            self.events
                .push(GameEvent::Music(MusicCue::FadeOut(GAME_OVER_MUSIC_FADE_MS)));
            self.events.push(GameEvent::GameOver(stats));
        }
    }
}

/// Process one frame of input and advance the simulation
pub fn tick(game: &mut Game, input: &TickInput, now: u64) -> Flow {
    if input.close {
        return Flow::Quit;
    }

    if let Some(pos) = input.pointer {
        game.pointer = pos;
    }

    if input.escape && game.escape(now) == Flow::Quit {
        return Flow::Quit;
    }

    for &command in &input.commands {
        if game.apply_command(command, now) == Flow::Quit {
            return Flow::Quit;
        }
    }

    for &pos in &input.clicks {
        game.click(pos, now);
    }

    game.update(now);

    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::combo::Tier;
    use crate::sim::zombie::ZombiePhase;

    fn start(difficulty: Difficulty, seed: u64) -> Game {
        let mut game = Game::new(seed, 0);
        let to_difficulty = TickInput {
            commands: vec![UiCommand::OpenDifficulty],
            ..Default::default()
        };
        tick(&mut game, &to_difficulty, 0);
        assert_eq!(game.phase, GamePhase::Difficulty);
        let pick = TickInput {
            commands: vec![UiCommand::StartGame(difficulty)],
            ..Default::default()
        };
        tick(&mut game, &pick, 0);
        assert_eq!(game.phase, GamePhase::Playing);
        game.drain_events();
        game
    }

    fn click_at(pos: Vec2) -> TickInput {
        TickInput {
            clicks: vec![pos],
            ..Default::default()
        }
    }

    /// Tick at 16 ms until a zombie appears; returns the time it did
    fn run_until_spawn(game: &mut Game, mut now: u64) -> u64 {
        let idle = TickInput::default();
        while game.session.zombies.is_empty() {
            now += TICK_MS;
            tick(game, &idle, now);
            assert!(now < 10_000, "no spawn");
        }
        now
    }

    #[test]
    fn test_menu_flow() {
        let mut game = Game::new(1, 0);
        assert_eq!(game.phase, GamePhase::Menu);
        assert_eq!(game.drain_events(), vec![GameEvent::Music(MusicCue::Play)]);

        // Commands for other screens are ignored
        let wrong = TickInput {
            commands: vec![UiCommand::StartGame(Difficulty::Hard), UiCommand::PlayAgain],
            ..Default::default()
        };
        assert_eq!(tick(&mut game, &wrong, 16), Flow::Continue);
        assert_eq!(game.phase, GamePhase::Menu);
        assert!(game.drain_events().is_empty());

        let back = TickInput {
            commands: vec![UiCommand::OpenDifficulty, UiCommand::BackToMenu],
            ..Default::default()
        };
        tick(&mut game, &back, 32);
        assert_eq!(game.phase, GamePhase::Menu);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Music(MusicCue::FadeOut(MENU_MUSIC_FADE_MS))));
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == GameEvent::Sound(SoundId::Click))
                .count(),
            2
        );

        let quit = TickInput {
            commands: vec![UiCommand::Quit],
            ..Default::default()
        };
        assert_eq!(tick(&mut game, &quit, 48), Flow::Quit);
    }

    #[test]
    fn test_escape_and_close() {
        let mut game = start(Difficulty::Easy, 2);
        let esc = TickInput {
            escape: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut game, &esc, 100), Flow::Continue);
        assert_eq!(game.phase, GamePhase::Menu);
        assert_eq!(tick(&mut game, &esc, 116), Flow::Quit);

        let mut game = start(Difficulty::Easy, 2);
        let close = TickInput {
            close: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut game, &close, 100), Flow::Quit);
    }

    #[test]
    fn test_medium_spawn_and_hit_scenario() {
        let mut game = start(Difficulty::Medium, 7);
        assert!(game.session.zombies.is_empty());
        assert_eq!(game.session.config.duration_ms, 60_000);
        assert_eq!(game.session.config.max_zombies_on_screen, 5);

        let spawned_at = run_until_spawn(&mut game, 0);
        assert!(spawned_at > 1000 && spawned_at <= 2016);
        assert_eq!(game.session.zombies.len(), 1);
        let zombie = game.session.zombies[0].clone();
        assert!(SPAWN_POINTS.contains(&zombie.pos));
        assert!(
            game.drain_events()
                .contains(&GameEvent::ZombieSpawned { id: zombie.id })
        );

        let now = spawned_at + 200;
        assert_eq!(game.session.zombies[0].phase(now), ZombiePhase::PoppingUp);
        let corner = zombie.rect().min + Vec2::splat(1.0);
        tick(&mut game, &click_at(corner), now);

        assert!(game.session.zombies[0].hit);
        let stats = game.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.combo, 1);
        assert_eq!(game.session.effects.shake.amount, 5);
        assert!(game.session.effects.waves.is_empty());
        assert!(game.session.effects.explosions.is_empty());
        assert!(
            game.drain_events()
                .contains(&GameEvent::Sound(SoundId::Splat))
        );
    }

    #[test]
    fn test_classic_zombie_never_expires() {
        let mut game = start(Difficulty::Classic, 11);
        let mut now = run_until_spawn(&mut game, 0);
        let first = game.session.zombies[0].clone();
        assert_eq!(first.lifetime_ms, None);

        let idle = TickInput::default();
        for _ in 0..10_000 {
            now += TICK_MS;
            tick(&mut game, &idle, now);
            if game.is_game_over() {
                break;
            }
            let z = game.session.zombie(first.id).expect("classic zombie vanished");
            assert!(!z.should_disappear(now));
        }
        assert_eq!(game.stats().misses, 0);
        assert!(game.session.zombie(first.id).is_some());
        // Capacity is never exceeded
        assert!(game.session.zombies.len() <= 3);
    }

    #[test]
    fn test_combo_great_tier_then_reset() {
        let mut game = start(Difficulty::Classic, 3);
        // Place six zombies directly so hits are not limited by spawn pacing
        for (i, p) in SPAWN_POINTS[..6].iter().enumerate() {
            game.session
                .zombies
                .push(crate::sim::Zombie::with_lifetime(100 + i as u32, *p, 0, None));
        }

        let mut now = 400;
        for p in &SPAWN_POINTS[..4] {
            tick(&mut game, &click_at(*p), now);
            now += 300;
        }
        assert_eq!(game.stats().combo, 4);
        assert!(game.session.effects.waves.is_empty());

        let fifth = now;
        tick(&mut game, &click_at(SPAWN_POINTS[4]), fifth);
        assert_eq!(game.stats().combo, 5);
        assert_eq!(game.session.effects.waves.len(), 1);
        assert!(game.session.effects.stars.len() >= 5);
        assert_eq!(Tier::for_combo(game.stats().combo), Tier::Great);

        tick(&mut game, &click_at(SPAWN_POINTS[5]), fifth + 2500);
        assert_eq!(game.stats().combo, 1);
        assert_eq!(game.stats().max_combo, 5);
        assert_eq!(game.stats().hits, 1 + 2 + 3 + 4 + 5 + 1);
    }

    #[test]
    fn test_game_over_overlay_and_restart() {
        let mut game = start(Difficulty::Hard, 5);
        let idle = TickInput::default();
        let mut now = 0;
        while !game.is_game_over() {
            now += TICK_MS;
            tick(&mut game, &idle, now);
        }
        assert_eq!(now, 45_008);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Music(MusicCue::FadeOut(GAME_OVER_MUSIC_FADE_MS))));
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver(_))));
        assert_eq!(game.phase, GamePhase::Playing);

        // Frozen: clicks ignored, nothing ages
        let before = game.stats();
        tick(&mut game, &click_at(Vec2::new(5.0, 5.0)), now + 16);
        assert_eq!(game.stats(), before);

        let again = TickInput {
            commands: vec![UiCommand::PlayAgain],
            ..Default::default()
        };
        tick(&mut game, &again, now + 32);
        assert_eq!(game.phase, GamePhase::Difficulty);

        let pick = TickInput {
            commands: vec![UiCommand::StartGame(Difficulty::Easy)],
            ..Default::default()
        };
        tick(&mut game, &pick, now + 48);
        assert_eq!(game.phase, GamePhase::Playing);
        assert!(!game.session.game_over);
        assert!(game.session.zombies.is_empty());
        assert_eq!(game.stats().hits, 0);
        assert_eq!(game.stats().session_start_ms, now + 48);
    }

    #[test]
    fn test_menu_resets_everything() {
        let mut game = start(Difficulty::Medium, 9);
        let mut now = run_until_spawn(&mut game, 0);
        now += 100;
        tick(&mut game, &click_at(Vec2::new(1.0, 1.0)), now);
        assert_eq!(game.stats().misses, 1);
        assert!(game.session.effects.count() > 0);

        let esc = TickInput {
            escape: true,
            ..Default::default()
        };
        tick(&mut game, &esc, now + 16);
        assert!(game.session.zombies.is_empty());
        assert_eq!(game.session.effects.count(), 0);
        assert!(game.session.effects.trail.is_empty());
        assert_eq!(game.stats().misses, 0);
        assert_eq!(game.stats().max_combo, 0);
    }

    #[test]
    fn test_trail_follows_pointer_while_playing() {
        let mut game = start(Difficulty::Medium, 4);
        for i in 0..20 {
            let input = TickInput {
                pointer: Some(Vec2::new(i as f32 * 10.0, 50.0)),
                ..Default::default()
            };
            tick(&mut game, &input, 16 * (i + 1));
        }
        assert_eq!(game.session.effects.trail.len(), TRAIL_CAPACITY);
        assert_eq!(
            game.session.effects.trail.positions().last(),
            Some(&Vec2::new(190.0, 50.0))
        );

        let mut quiet = start(Difficulty::Medium, 4).with_options(GameOptions {
            screen_shake: true,
            pointer_trail: false,
        });
        let before = quiet.session.effects.trail.len();
        let input = TickInput {
            pointer: Some(Vec2::new(400.0, 300.0)),
            ..Default::default()
        };
        tick(&mut quiet, &input, 16);
        tick(&mut quiet, &input, 32);
        assert_eq!(quiet.session.effects.trail.len(), before);
    }

    #[test]
    fn test_determinism() {
        let mut a = start(Difficulty::Hard, 99);
        let mut b = start(Difficulty::Hard, 99);
        let mut now = 0;
        for i in 0..600u64 {
            now += TICK_MS;
            let input = if i % 40 == 0 {
                click_at(SPAWN_POINTS[(i / 40) as usize % 9])
            } else {
                TickInput::default()
            };
            tick(&mut a, &input, now);
            tick(&mut b, &input, now);
        }
        assert_eq!(a.stats(), b.stats());
        let pa: Vec<Vec2> = a.session.zombies.iter().map(|z| z.pos).collect();
        let pb: Vec<Vec2> = b.session.zombies.iter().map(|z| z.pos).collect();
        assert_eq!(pa, pb);
        assert_eq!(a.session.effects.count(), b.session.effects.count());
    }
}
