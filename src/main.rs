//! Zombie Smash entry point
//!
//! Headless runner: drives the game on a manual clock with a simple bot
//! standing in for the player, then prints the final stats.
//!
//! Usage: `zombie-smash [classic|easy|medium|hard]`

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use zombie_smash::Settings;
use zombie_smash::assets::{AssetCatalog, EmptySource};
use zombie_smash::audio::{AudioManager, LogBackend};
use zombie_smash::platform::{Clock, InputEvent, ManualClock, PointerButton};
use zombie_smash::render::build_frame;
use zombie_smash::sim::{Difficulty, Flow, Game, GameEvent, Stats, TickInput, UiCommand, tick};
use zombie_smash::ui::{Screen, Ui};

/// Hard stop in case the session never ends
const MAX_FRAMES: u64 = 20_000;

/// Stand-in player: navigates the menus, then clicks zombies after a
/// human-ish reaction delay and occasionally misclicks.
struct Bot {
    difficulty: Difficulty,
    rng: Pcg32,
    next_action_ms: u64,
}

impl Bot {
    fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed_b07),
            next_action_ms: 0,
        }
    }

    fn click(pos: Vec2) -> [InputEvent; 2] {
        [
            InputEvent::PointerMove(pos),
            InputEvent::PointerDown {
                button: PointerButton::Left,
                pos,
            },
        ]
    }

    fn press(ui: &Ui, screen: Screen, command: UiCommand) -> Vec<InputEvent> {
        ui.buttons(screen)
            .iter()
            .find(|b| b.command == command)
            .map(|b| Self::click(b.rect.center()).to_vec())
            .unwrap_or_default()
    }

    fn events(&mut self, game: &Game, ui: &Ui, now: u64) -> Vec<InputEvent> {
        match Screen::of(game) {
            Screen::Menu => Self::press(ui, Screen::Menu, UiCommand::OpenDifficulty),
            Screen::Difficulty => {
                Self::press(ui, Screen::Difficulty, UiCommand::StartGame(self.difficulty))
            }
            Screen::GameOver => Vec::new(),
            Screen::Playing => {
                if now < self.next_action_ms {
                    return Vec::new();
                }
                let reaction = self.rng.random_range(250..=900);
                let target = game
                    .session
                    .zombies
                    .iter()
                    .find(|z| z.is_alive(now) && z.age(now) >= reaction);
                let Some(zombie) = target else {
                    return Vec::new();
                };
                self.next_action_ms = now + self.rng.random_range(80..=300);
                let pos = if self.rng.random_bool(0.1) {
                    zombie.pos + Vec2::new(60.0, 0.0)
                } else {
                    zombie.pos
                };
                Self::click(pos).to_vec()
            }
        }
    }
}

fn parse_difficulty() -> Difficulty {
    match std::env::args().nth(1) {
        None => Difficulty::default(),
        Some(arg) => Difficulty::from_str(&arg).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using {}", arg, Difficulty::default().as_str());
            Difficulty::default()
        }),
    }
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn run(settings: &Settings, difficulty: Difficulty) -> Option<Stats> {
    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!("Zombie Smash (headless) starting, seed {}", seed);

    let catalog = AssetCatalog::load(&EmptySource);
    let mut audio = AudioManager::new(LogBackend::default()).with_catalog(&catalog);
    audio.apply_settings(settings);

    let mut clock = ManualClock::new(0);
    let mut game = Game::new(seed, clock.now_ms()).with_options(settings.game_options());
    let mut ui = Ui::new();
    let mut bot = Bot::new(difficulty, seed);
    let frame_ms = settings.frame_ms();

    let mut result = None;
    for frame_no in 0..MAX_FRAMES {
        let now = clock.now_ms();
        let events = bot.events(&game, &ui, now);
        let input: TickInput = ui.translate(&game, &events);
        if tick(&mut game, &input, now) == Flow::Quit {
            break;
        }

        for event in game.drain_events() {
            audio.handle_event(&event);
            if let GameEvent::GameOver(stats) = event {
                result = Some(stats);
            }
        }

        let frame = build_frame(&game, &ui, now);
        if frame_no % 600 == 0 {
            log::debug!(
                "frame {}: {} draw commands, {} zombies, {} effects",
                frame_no,
                frame.len(),
                game.session.zombies.len(),
                game.session.effects.count()
            );
        }

        if result.is_some() {
            break;
        }
        clock.advance(frame_ms);
    }

    let backend = audio.backend();
    log::info!(
        "Audio: {} sounds, {} music cues",
        backend.sounds_played,
        backend.music_cues
    );
    result
}

fn main() {
    env_logger::init();

    let settings = Settings::load();
    let difficulty = parse_difficulty();

    match run(&settings, difficulty) {
        Some(stats) => {
            println!("Difficulty: {}", stats.difficulty.as_str());
            println!("Hits:       {}", stats.hits);
            println!("Misses:     {}", stats.misses);
            println!("Score:      {}", stats.score());
            println!("Max combo:  {}", stats.max_combo);
        }
        None => {
            log::warn!("Session did not finish within {} frames", MAX_FRAMES);
            std::process::exit(1);
        }
    }
}
