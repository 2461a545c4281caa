//! Buttons, input translation and HUD view models
//!
//! Raw [`InputEvent`]s are turned into a [`TickInput`] here, so the
//! simulation only ever sees commands and play-field clicks.

use glam::Vec2;

use crate::Rect;
use crate::colors::{self, Rgb};
use crate::consts::{BUTTON_SIZE, SCREEN_WIDTH};
use crate::platform::{InputEvent, Key};
use crate::sim::effects::TextSize;
use crate::sim::{Difficulty, Game, GamePhase, Stats, TickInput, UiCommand};

/// Left edge shared by every button column
pub const BUTTON_X: f32 = 300.0;

/// Rectangular push button
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: &'static str,
    pub command: UiCommand,
    pub hovered: bool,
}

impl Button {
    pub fn new(y: f32, label: &'static str, command: UiCommand) -> Self {
        Self {
            rect: Rect::new(BUTTON_X, y, BUTTON_SIZE.x, BUTTON_SIZE.y),
            label,
            command,
            hovered: false,
        }
    }

    pub fn update_hover(&mut self, pointer: Vec2) {
        self.hovered = self.rect.contains(pointer);
    }
}

pub fn menu_buttons() -> Vec<Button> {
    vec![
        Button::new(220.0, "Play Game", UiCommand::OpenDifficulty),
        Button::new(320.0, "Quit", UiCommand::Quit),
    ]
}

pub fn difficulty_buttons() -> Vec<Button> {
    let mut buttons: Vec<Button> = Difficulty::ALL
        .iter()
        .zip([140.0, 220.0, 300.0, 380.0])
        .map(|(d, y)| Button::new(y, d.label(), UiCommand::StartGame(*d)))
        .collect();
    buttons.push(Button::new(460.0, "Back", UiCommand::BackToMenu));
    buttons
}

pub fn game_over_buttons() -> Vec<Button> {
    vec![
        Button::new(370.0, "Play Again", UiCommand::PlayAgain),
        Button::new(450.0, "Main Menu", UiCommand::BackToMenu),
    ]
}

/// Which button set is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Difficulty,
    Playing,
    GameOver,
}

impl Screen {
    pub fn of(game: &Game) -> Self {
        match game.phase {
            GamePhase::Menu => Screen::Menu,
            GamePhase::Difficulty => Screen::Difficulty,
            GamePhase::Playing if game.session.game_over => Screen::GameOver,
            GamePhase::Playing => Screen::Playing,
        }
    }
}

/// All button layouts plus their hover state
#[derive(Debug, Clone)]
pub struct Ui {
    pub menu: Vec<Button>,
    pub difficulty: Vec<Button>,
    pub game_over: Vec<Button>,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self {
            menu: menu_buttons(),
            difficulty: difficulty_buttons(),
            game_over: game_over_buttons(),
        }
    }

    pub fn buttons(&self, screen: Screen) -> &[Button] {
        match screen {
            Screen::Menu => &self.menu,
            Screen::Difficulty => &self.difficulty,
            Screen::GameOver => &self.game_over,
            Screen::Playing => &[],
        }
    }

    fn all_buttons_mut(&mut self) -> impl Iterator<Item = &mut Button> {
        self.menu
            .iter_mut()
            .chain(self.difficulty.iter_mut())
            .chain(self.game_over.iter_mut())
    }

    /// Button pressed by a left click at `pos` on `screen`. Menu and
    /// difficulty buttons need hover; game-over buttons only need the
    /// click inside their rect.
    fn pressed(&self, screen: Screen, pos: Vec2) -> Option<UiCommand> {
        let needs_hover = screen != Screen::GameOver;
        self.buttons(screen)
            .iter()
            .find(|b| if needs_hover { b.hovered } else { b.rect.contains(pos) })
            .map(|b| b.command)
    }

    /// Turn this frame's raw events into tick input for the current screen
    pub fn translate(&mut self, game: &Game, events: &[InputEvent]) -> TickInput {
        let screen = Screen::of(game);
        let mut input = TickInput::default();

        for event in events {
            match *event {
                InputEvent::PointerMove(pos) => {
                    input.pointer = Some(pos);
                    for button in self.all_buttons_mut() {
                        button.update_hover(pos);
                    }
                }
                InputEvent::PointerDown { .. } => {
                    let Some(pos) = event.left_click() else {
                        continue;
                    };
                    match screen {
                        Screen::Playing => input.clicks.push(pos),
                        _ => input.commands.extend(self.pressed(screen, pos)),
                    }
                }
                InputEvent::KeyDown(Key::Escape) => input.escape = true,
                InputEvent::WindowClose => input.close = true,
            }
        }

        input
    }
}

/// Horizontal anchor for a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
    TopRight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub text: String,
    pub pos: Vec2,
    pub anchor: Anchor,
    pub size: TextSize,
    pub color: Rgb,
    pub scale: f32,
}

impl HudText {
    fn at(text: String, pos: Vec2, size: TextSize, color: Rgb) -> Self {
        Self {
            text,
            pos,
            anchor: Anchor::TopLeft,
            size,
            color,
            scale: 1.0,
        }
    }
}

/// In-game HUD contents for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub hits: HudText,
    /// Hits line gets a glow while a combo is running
    pub hits_glow: bool,
    pub misses: HudText,
    pub score: HudText,
    pub mode: HudText,
    pub combo_banner: Option<HudText>,
    pub max_combo: Option<HudText>,
    pub timer: HudText,
    pub seconds_left: i64,
}

impl HudView {
    pub fn from_stats(stats: &Stats, now: u64) -> Self {
        let t = now as f32;
        let hit_color = if stats.combo == 0 {
            colors::GREEN
        } else {
            colors::score_color(stats.combo)
        };

        let combo_banner = (stats.combo > 1).then(|| HudText {
            text: format!("COMBO x{}!", stats.combo),
            pos: Vec2::new(120.0, 180.0),
            anchor: Anchor::Center,
            size: TextSize::Medium,
            color: colors::rainbow(t * 0.01),
            scale: 1.0 + 0.3 * (t * 0.01).sin(),
        });

        let max_combo = (stats.max_combo > 1).then(|| {
            HudText::at(
                format!("Max Combo: {}", stats.max_combo),
                Vec2::new(10.0, 210.0),
                TextSize::Small,
                colors::GOLD,
            )
        });

        let seconds_left = stats.time_left_ms(now).div_euclid(1000).max(0);
        let (timer_color, timer_scale) = if seconds_left <= 10 {
            let blink = (now / 250) % 2 == 1;
            let color = if blink { colors::RED } else { colors::ORANGE };
            (color, 1.0 + 0.2 * (t * 0.02).sin())
        } else if seconds_left <= 30 {
            (colors::ORANGE, 1.0 + 0.1 * (t * 0.01).sin())
        } else {
            (colors::WHITE, 1.0)
        };

        Self {
            hits: HudText::at(
                format!("Hits: {}", stats.hits),
                Vec2::new(10.0, 10.0),
                TextSize::Medium,
                hit_color,
            ),
            hits_glow: stats.combo > 1,
            misses: HudText::at(
                format!("Misses: {}", stats.misses),
                Vec2::new(10.0, 50.0),
                TextSize::Medium,
                colors::RED,
            ),
            score: HudText::at(
                format!("Score: {}", stats.score()),
                Vec2::new(10.0, 90.0),
                TextSize::Medium,
                colors::WHITE,
            ),
            mode: HudText::at(
                format!("Mode: {}", stats.difficulty.as_str()),
                Vec2::new(10.0, 130.0),
                TextSize::Small,
                colors::WHITE,
            ),
            combo_banner,
            max_combo,
            timer: HudText {
                text: format!("Time: {seconds_left}"),
                pos: Vec2::new(SCREEN_WIDTH - 10.0, 10.0),
                anchor: Anchor::TopRight,
                size: TextSize::Medium,
                color: timer_color,
                scale: timer_scale,
            },
            seconds_left,
        }
    }

    /// Every line in draw order
    pub fn lines(&self) -> impl Iterator<Item = &HudText> {
        [&self.hits, &self.misses, &self.score, &self.mode]
            .into_iter()
            .chain(self.combo_banner.as_ref())
            .chain(self.max_combo.as_ref())
            .chain(std::iter::once(&self.timer))
    }
}

/// Game-over overlay contents
#[derive(Debug, Clone, PartialEq)]
pub struct GameOverView {
    pub final_score: i64,
    pub difficulty: Difficulty,
    pub mode_note: &'static str,
    pub max_combo: u32,
}

impl GameOverView {
    pub fn from_stats(stats: &Stats) -> Self {
        let mode_note = if stats.difficulty == Difficulty::Classic {
            "(Zombies don't disappear automatically)"
        } else {
            "(Zombies have limited lifetime)"
        };
        Self {
            final_score: stats.score(),
            difficulty: stats.difficulty,
            mode_note,
            max_combo: stats.max_combo,
        }
    }

    /// Centered lines with their vertical positions and colors
    pub fn lines(&self) -> Vec<HudText> {
        let centered = |text: String, y: f32, size: TextSize, color: Rgb| HudText {
            text,
            pos: Vec2::new(SCREEN_WIDTH / 2.0, y),
            anchor: Anchor::Center,
            size,
            color,
            scale: 1.0,
        };
        vec![
            centered("GAME OVER!".to_string(), 180.0, TextSize::Large, colors::RED),
            centered(
                format!("Final Score: {}", self.final_score),
                240.0,
                TextSize::Medium,
                colors::WHITE,
            ),
            centered(
                format!("Difficulty: {}", self.difficulty.as_str()),
                270.0,
                TextSize::Small,
                colors::WHITE,
            ),
            centered(self.mode_note.to_string(), 300.0, TextSize::Small, colors::LIGHT_GRAY),
            centered(
                format!("Max Combo: {}", self.max_combo),
                330.0,
                TextSize::Small,
                colors::GOLD,
            ),
        ]
    }
}
