//! Frame building
//!
//! Turns game state into an ordered list of backend-agnostic draw commands.
//! A frontend walks [`Frame::commands`] in order and applies
//! [`Frame::offset_for`] to each layer; nothing here touches a GPU.

use glam::Vec2;

use crate::assets::ImageId;
use crate::colors::{self, Rgb};
use crate::consts::*;
use crate::sim::effects::{Effects, TextSize};
use crate::sim::{Game, GamePhase, Zombie};
use crate::ui::{Anchor, Button, GameOverView, HudText, HudView, Screen, Ui};

/// Draw layers, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Entities,
    SplatOverlays,
    SpecialEffects,
    Particles,
    FloatingTexts,
    Ui,
    PointerTrail,
}

impl Layer {
    /// Gameplay layers move with screen shake; UI and trail stay put
    pub fn is_shaken(self) -> bool {
        self < Layer::Ui
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        image: ImageId,
        center: Vec2,
        size: Vec2,
        /// Degrees, counter-clockwise
        rotation: f32,
        alpha: u8,
        /// Draw as a flat silhouette in this color
        tint: Option<Rgb>,
    },
    Text {
        text: String,
        pos: Vec2,
        anchor: Anchor,
        size: TextSize,
        color: Rgb,
        alpha: u8,
        scale: f32,
    },
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgb,
        alpha: u8,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Rgb,
        alpha: u8,
    },
    Line {
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color: Rgb,
        alpha: u8,
    },
    Dot {
        pos: Vec2,
        radius: f32,
        color: Rgb,
        alpha: u8,
    },
    /// Full-screen translucent fill
    Overlay { color: Rgb, alpha: u8 },
}

impl DrawCommand {
    fn sprite(image: ImageId, center: Vec2, size: Vec2) -> Self {
        DrawCommand::Sprite {
            image,
            center,
            size,
            rotation: 0.0,
            alpha: 255,
            tint: None,
        }
    }

    fn hud_text(line: &HudText, alpha: u8) -> Self {
        DrawCommand::Text {
            text: line.text.clone(),
            pos: line.pos,
            anchor: line.anchor,
            size: line.size,
            color: line.color,
            alpha,
            scale: line.scale,
        }
    }
}

/// One frame of draw commands, sorted by layer
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub commands: Vec<(Layer, DrawCommand)>,
    pub shake_offset: Vec2,
}

impl Frame {
    fn push(&mut self, layer: Layer, command: DrawCommand) {
        self.commands.push((layer, command));
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, c)| c)
    }

    pub fn offset_for(&self, layer: Layer) -> Vec2 {
        if layer.is_shaken() {
            self.shake_offset
        } else {
            Vec2::ZERO
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

pub fn build_frame(game: &Game, ui: &Ui, now: u64) -> Frame {
    let mut frame = Frame::default();
    match Screen::of(game) {
        Screen::Menu => menu_screen(&mut frame, ui, "Zombie Head Smash", Screen::Menu, now),
        Screen::Difficulty => {
            menu_screen(&mut frame, ui, "Choose Difficulty", Screen::Difficulty, now)
        }
        Screen::Playing | Screen::GameOver => playing_screen(&mut frame, game, ui, now),
    }
    debug_assert!(frame.commands.windows(2).all(|w| w[0].0 <= w[1].0));
    frame
}

fn full_screen(image: ImageId) -> DrawCommand {
    DrawCommand::sprite(
        image,
        Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
    )
}

fn menu_screen(frame: &mut Frame, ui: &Ui, title: &str, screen: Screen, now: u64) {
    frame.push(Layer::Background, full_screen(ImageId::MenuBackground));

    let pulse = 1.0 + 0.1 * (now as f32 * 0.003).sin();
    let title_pos = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - 180.0);
    for i in 0..5u8 {
        frame.push(
            Layer::Ui,
            DrawCommand::Text {
                text: title.to_string(),
                pos: title_pos,
                anchor: Anchor::Center,
                size: TextSize::Large,
                color: colors::ZOMBIE_GREEN,
                alpha: 30 - i * 5,
                scale: pulse + i as f32 * 0.02,
            },
        );
    }
    frame.push(
        Layer::Ui,
        DrawCommand::Text {
            text: title.to_string(),
            pos: title_pos,
            anchor: Anchor::Center,
            size: TextSize::Large,
            color: colors::WHITE,
            alpha: 255,
            scale: pulse,
        },
    );

    for button in ui.buttons(screen) {
        push_button(frame, button);
    }
}

fn push_button(frame: &mut Frame, button: &Button) {
    let image = if button.hovered {
        ImageId::ButtonHover
    } else {
        ImageId::ButtonNormal
    };
    let center = button.rect.center();
    frame.push(Layer::Ui, DrawCommand::sprite(image, center, button.rect.size));
    frame.push(
        Layer::Ui,
        DrawCommand::Text {
            text: button.label.to_string(),
            pos: center,
            anchor: Anchor::Center,
            size: TextSize::Medium,
            color: colors::WHITE,
            alpha: 255,
            scale: 1.0,
        },
    );
}

fn playing_screen(frame: &mut Frame, game: &Game, ui: &Ui, now: u64) {
    let session = &game.session;
    let effects = &session.effects;

    if game.options.screen_shake {
        frame.shake_offset = effects.shake_offset;
    }

    frame.push(Layer::Background, full_screen(ImageId::Background));

    for zombie in &session.zombies {
        push_zombie(frame, zombie, now);
    }
    for zombie in &session.zombies {
        push_splat(frame, zombie, now);
    }

    push_effects(frame, effects);

    let stats = game.stats();
    let hud = HudView::from_stats(&stats, now);
    if hud.hits_glow {
        for i in 0..3u8 {
            let mut glow = hud.hits.clone();
            glow.pos -= Vec2::splat(i as f32);
            frame.push(Layer::Ui, DrawCommand::hud_text(&glow, 50 - i * 15));
        }
    }
    for line in hud.lines() {
        frame.push(Layer::Ui, DrawCommand::hud_text(line, 255));
    }

    if game.is_game_over() {
        frame.push(
            Layer::Ui,
            DrawCommand::Overlay {
                color: colors::BLACK,
                alpha: 150,
            },
        );
        for line in GameOverView::from_stats(&stats).lines() {
            frame.push(Layer::Ui, DrawCommand::hud_text(&line, 255));
        }
        for button in ui.buttons(Screen::GameOver) {
            push_button(frame, button);
        }
    }

    if game.options.pointer_trail {
        for seg in effects.trail.segments(stats.combo, now) {
            frame.push(
                Layer::PointerTrail,
                DrawCommand::Line {
                    from: seg.from,
                    to: seg.to,
                    thickness: seg.thickness,
                    color: seg.color,
                    alpha: seg.alpha,
                },
            );
        }
    }
}

fn push_zombie(frame: &mut Frame, zombie: &Zombie, now: u64) {
    let pop = zombie.pop_transform(now);
    let mut center = zombie.pos + Vec2::new(0.0, pop.bounce);
    let size = ZOMBIE_SIZE * pop.scale;

    if let Some(warning) = zombie.warning_effect(now) {
        center.x += warning.wiggle;
        for i in 0..3u8 {
            let alpha = warning.glow.saturating_sub(i * 20);
            if alpha == 0 {
                continue;
            }
            frame.push(
                Layer::Entities,
                DrawCommand::Sprite {
                    image: ImageId::ZombieHead,
                    center,
                    size: size + Vec2::splat(i as f32 * 2.0),
                    rotation: 0.0,
                    alpha,
                    tint: Some(colors::BLOOD_RED),
                },
            );
        }
    }

    frame.push(Layer::Entities, DrawCommand::sprite(ImageId::ZombieHead, center, size));
}

fn push_splat(frame: &mut Frame, zombie: &Zombie, now: u64) {
    let Some(s) = zombie.splat_progress(now) else {
        return;
    };
    let scale = 1.0 + 0.8 * s;
    for i in 0..3 {
        let alpha = 255 - 80 * i - (s * 100.0) as i32;
        frame.push(
            Layer::SplatOverlays,
            DrawCommand::Sprite {
                image: ImageId::Splat,
                center: zombie.pos,
                size: SPLAT_SIZE * (scale + 0.1 * i as f32),
                rotation: 0.0,
                alpha: alpha.clamp(0, 255) as u8,
                tint: None,
            },
        );
    }
    frame.push(
        Layer::SplatOverlays,
        DrawCommand::Sprite {
            image: ImageId::Splat,
            center: zombie.pos,
            size: SPLAT_SIZE * scale,
            rotation: 360.0 * s,
            alpha: 255,
            tint: None,
        },
    );
}

fn push_effects(frame: &mut Frame, effects: &Effects) {
    for explosion in &effects.explosions {
        for ring in explosion.rings() {
            frame.push(
                Layer::SpecialEffects,
                DrawCommand::Ring {
                    center: explosion.center,
                    radius: ring.radius,
                    width: ring.width,
                    color: explosion.color,
                    alpha: ring.alpha,
                },
            );
        }
    }
    for wave in &effects.waves {
        for ring in wave.rings() {
            frame.push(
                Layer::SpecialEffects,
                DrawCommand::Ring {
                    center: wave.center,
                    radius: ring.radius,
                    width: ring.width,
                    color: wave.color,
                    alpha: ring.alpha,
                },
            );
        }
    }
    for star in &effects.stars {
        frame.push(
            Layer::SpecialEffects,
            DrawCommand::Polygon {
                points: star.outline().to_vec(),
                color: star.color,
                alpha: star.alpha.clamp(0.0, 255.0) as u8,
            },
        );
    }

    for particle in &effects.particles {
        frame.push(
            Layer::Particles,
            DrawCommand::Dot {
                pos: particle.pos,
                radius: PARTICLE_RADIUS,
                color: particle.color,
                alpha: particle.alpha(),
            },
        );
    }

    for text in &effects.texts {
        frame.push(
            Layer::FloatingTexts,
            DrawCommand::Text {
                text: text.text.clone(),
                pos: text.pos(),
                anchor: Anchor::Center,
                size: text.size,
                color: text.color,
                alpha: text.alpha(),
                scale: 1.0,
            },
        );
    }
    for text in &effects.rainbow_texts {
        frame.push(
            Layer::FloatingTexts,
            DrawCommand::Text {
                text: text.text.clone(),
                pos: text.pos(),
                anchor: Anchor::Center,
                size: TextSize::Medium,
                color: text.color(),
                alpha: text.alpha(),
                scale: text.scale(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, TickInput, tick};

    fn playing(difficulty: Difficulty) -> Game {
        let mut game = Game::new(3, 0);
        game.start_game(difficulty, 0);
        game
    }

    fn sprites(frame: &Frame, layer: Layer, image: ImageId) -> usize {
        frame
            .layer(layer)
            .filter(|c| matches!(c, DrawCommand::Sprite { image: i, .. } if *i == image))
            .count()
    }

    #[test]
    fn test_layer_order_and_shake() {
        assert!(Layer::Background < Layer::Entities);
        assert!(Layer::FloatingTexts < Layer::Ui);
        assert!(Layer::FloatingTexts.is_shaken());
        assert!(!Layer::Ui.is_shaken());
        assert!(!Layer::PointerTrail.is_shaken());

        let frame = Frame {
            commands: Vec::new(),
            shake_offset: Vec2::new(3.0, -2.0),
        };
        assert_eq!(frame.offset_for(Layer::Particles), Vec2::new(3.0, -2.0));
        assert_eq!(frame.offset_for(Layer::Ui), Vec2::ZERO);
    }

    #[test]
    fn test_menu_frame() {
        let game = Game::new(1, 0);
        let ui = Ui::new();
        let frame = build_frame(&game, &ui, 0);
        assert_eq!(sprites(&frame, Layer::Background, ImageId::MenuBackground), 1);
        assert_eq!(sprites(&frame, Layer::Ui, ImageId::ButtonNormal), 2);
        let labels: Vec<&str> = frame
            .layer(Layer::Ui)
            .filter_map(|c| match c {
                DrawCommand::Text { text, alpha: 255, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Zombie Head Smash", "Play Game", "Quit"]);
    }

    #[test]
    fn test_hovered_button_uses_hover_image() {
        let mut game = Game::new(1, 0);
        game.apply_command(crate::sim::UiCommand::OpenDifficulty, 0);
        let mut ui = Ui::new();
        ui.translate(
            &game,
            &[crate::platform::InputEvent::PointerMove(Vec2::new(400.0, 320.0))],
        );
        let frame = build_frame(&game, &ui, 0);
        assert_eq!(sprites(&frame, Layer::Ui, ImageId::ButtonHover), 1);
        assert_eq!(sprites(&frame, Layer::Ui, ImageId::ButtonNormal), 4);
    }

    #[test]
    fn test_playing_frame_has_zombies_splats_and_hud() {
        let mut game = playing(Difficulty::Classic);
        game.session
            .zombies
            .push(Zombie::with_lifetime(1, SPAWN_POINTS[0], 0, None));
        game.session
            .zombies
            .push(Zombie::with_lifetime(2, SPAWN_POINTS[1], 0, None));
        tick(
            &mut game,
            &TickInput {
                clicks: vec![SPAWN_POINTS[1]],
                ..Default::default()
            },
            500,
        );

        let ui = Ui::new();
        let frame = build_frame(&game, &ui, 600);
        assert_eq!(sprites(&frame, Layer::Background, ImageId::Background), 1);
        assert_eq!(sprites(&frame, Layer::Entities, ImageId::ZombieHead), 2);
        assert_eq!(sprites(&frame, Layer::SplatOverlays, ImageId::Splat), 4);
        assert!(frame.layer(Layer::Particles).count() >= 20);
        assert!(frame.layer(Layer::FloatingTexts).count() >= 1);
        assert!(
            frame
                .layer(Layer::Ui)
                .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Hits: 1"))
        );
        assert!(frame.shake_offset.x.abs() <= 5.0 && frame.shake_offset.y.abs() <= 5.0);
        assert!(!frame.layer(Layer::Ui).any(|c| matches!(c, DrawCommand::Overlay { .. })));
    }

    #[test]
    fn test_splat_layers_fade() {
        let mut zombie = Zombie::with_lifetime(1, SPAWN_POINTS[4], 0, None);
        zombie.hit_zombie(1000);
        let mut frame = Frame::default();
        push_splat(&mut frame, &zombie, 1400);
        let alphas: Vec<u8> = frame
            .commands
            .iter()
            .filter_map(|(_, c)| match c {
                DrawCommand::Sprite { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![155, 75, 0, 255]);
        match &frame.commands[3].1 {
            DrawCommand::Sprite { size, rotation, .. } => {
                assert!((size.x - 144.0).abs() < 1e-3);
                assert!((rotation - 360.0).abs() < 1e-3);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_warning_glow_and_wiggle() {
        let zombie = Zombie::with_lifetime(1, SPAWN_POINTS[0], 0, Some(3000));
        let mut frame = Frame::default();
        push_zombie(&mut frame, &zombie, 2900);
        // glow 80: layers at 80, 60, 40 plus the sprite itself
        assert_eq!(frame.len(), 4);
        let tinted = frame
            .commands
            .iter()
            .filter(|(_, c)| matches!(c, DrawCommand::Sprite { tint: Some(_), .. }))
            .count();
        assert_eq!(tinted, 3);
    }

    #[test]
    fn test_game_over_overlay_and_disabled_options() {
        let mut game = playing(Difficulty::Hard).with_options(crate::sim::GameOptions {
            screen_shake: false,
            pointer_trail: false,
        });
        game.session.effects.shake.add_shake(10, 300);
        tick(&mut game, &TickInput::default(), 45_000);
        assert!(game.is_game_over());

        let frame = build_frame(&game, &Ui::new(), 45_000);
        assert_eq!(frame.shake_offset, Vec2::ZERO);
        assert_eq!(frame.layer(Layer::PointerTrail).count(), 0);
        assert!(frame.layer(Layer::Ui).any(|c| matches!(c, DrawCommand::Overlay { alpha: 150, .. })));
        assert!(
            frame
                .layer(Layer::Ui)
                .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "GAME OVER!"))
        );
        assert_eq!(sprites(&frame, Layer::Ui, ImageId::ButtonNormal), 2);
    }

    #[test]
    fn test_trail_drawn_on_top() {
        let mut game = playing(Difficulty::Medium);
        for i in 0..5u64 {
            let input = TickInput {
                pointer: Some(Vec2::new(10.0 * i as f32, 10.0)),
                ..Default::default()
            };
            tick(&mut game, &input, 16 * (i + 1));
        }
        let frame = build_frame(&game, &Ui::new(), 100);
        // 4 segments, 3 glow layers each
        assert_eq!(frame.layer(Layer::PointerTrail).count(), 12);
        assert_eq!(frame.commands.last().map(|(l, _)| *l), Some(Layer::PointerTrail));
    }
}
