//! Frame description handed to the host renderer
//!
//! Nothing here touches a graphics API. [`build_frame`] walks the game state
//! and emits a flat list of draw commands in back-to-front order.

use glam::Vec2;

use crate::consts::{LIFE_BAR_HEIGHT, LIFE_BAR_OFFSET_Y, LIFE_BAR_WIDTH};
use crate::sim::{GamePhase, GameState, Rect, UpgradeChoice};
use crate::ui::{self, Slider, VolumeOverlay};

pub const LIFE_BAR_BACKGROUND: u32 = 0x808080;
pub const LIFE_BAR_FILL: u32 = 0xff0000;
pub const ATTACK_OUTLINE: u32 = 0x00ff00;
pub const HIT_TINT: u32 = 0xff0000;
pub const TEXT_COLOR: u32 = 0xffffff;
pub const MENU_HIGHLIGHT: u32 = 0xffff00;

/// Blink half-period of the title prompt
const PROMPT_BLINK_MS: u64 = 500;

pub const TITLE_TEXT: &str = "Solitary Struggle of Christmas";
pub const START_PROMPT: &str = "Press Any Key to Start";
pub const GAME_OVER_TEXT: &str = "Game Over";
pub const RETRY_PROMPT: &str = "Retry? (Press R)";

/// Host-side image to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    Player,
    Enemy,
    Star,
}

/// A single draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: u32,
        alpha: f32,
    },
    StrokeRect {
        rect: Rect,
        color: u32,
        alpha: f32,
        width: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: u32,
        /// Anchor at the text center instead of its top-left
        centered: bool,
    },
    Sprite {
        id: SpriteId,
        pos: Vec2,
        /// Multiplicative color tint
        tint: Option<u32>,
        alpha: f32,
    },
}

impl DrawCommand {
    fn text(text: impl Into<String>, pos: Vec2, size: f32) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            color: TEXT_COLOR,
            centered: false,
        }
    }

    fn centered_text(text: impl Into<String>, pos: Vec2, size: f32, color: u32) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            color,
            centered: true,
        }
    }
}

/// Background and fill for a life bar under a body at `pos`
pub fn life_bar(pos: Vec2, fraction: f32) -> [DrawCommand; 2] {
    let x = pos.x - LIFE_BAR_WIDTH / 2.0;
    let y = pos.y + LIFE_BAR_OFFSET_Y;
    [
        DrawCommand::FillRect {
            rect: Rect::new(x, y, LIFE_BAR_WIDTH, LIFE_BAR_HEIGHT),
            color: LIFE_BAR_BACKGROUND,
            alpha: 1.0,
        },
        DrawCommand::FillRect {
            rect: Rect::new(x, y, LIFE_BAR_WIDTH * fraction.clamp(0.0, 1.0), LIFE_BAR_HEIGHT),
            color: LIFE_BAR_FILL,
            alpha: 1.0,
        },
    ]
}

/// Build the draw list for one frame. `time_ms` is wall time, used for the
/// blinking title prompt.
pub fn build_frame(state: &GameState, overlay: &VolumeOverlay, time_ms: u64) -> Vec<DrawCommand> {
    let mut frame = Vec::with_capacity(16 + state.enemies.len() * 3 + state.sparkles.len());
    frame.push(DrawCommand::Sprite {
        id: SpriteId::Background,
        pos: state.world_bounds().center(),
        tint: None,
        alpha: 1.0,
    });

    if state.phase == GamePhase::Title {
        draw_title(state, time_ms, &mut frame);
    } else {
        draw_world(state, &mut frame);
        draw_hud(state, &mut frame);
        if state.phase == GamePhase::LevelUp {
            draw_upgrade_menu(state, &mut frame);
        }
    }

    draw_overlay(overlay, &mut frame);
    frame
}

fn draw_title(state: &GameState, time_ms: u64, frame: &mut Vec<DrawCommand>) {
    let center = state.world_bounds().center();
    frame.push(DrawCommand::centered_text(
        TITLE_TEXT,
        center - Vec2::new(0.0, 50.0),
        48.0,
        TEXT_COLOR,
    ));
    if (time_ms / PROMPT_BLINK_MS) % 2 == 0 {
        frame.push(DrawCommand::centered_text(
            START_PROMPT,
            center + Vec2::new(0.0, 50.0),
            24.0,
            TEXT_COLOR,
        ));
    }
}

fn draw_world(state: &GameState, frame: &mut Vec<DrawCommand>) {
    for enemy in &state.enemies {
        frame.push(DrawCommand::Sprite {
            id: SpriteId::Enemy,
            pos: enemy.pos,
            tint: enemy.tinted.then_some(HIT_TINT),
            alpha: 1.0,
        });
        frame.extend(life_bar(enemy.pos, enemy.life_fraction()));
    }

    let player = &state.player;
    frame.push(DrawCommand::Sprite {
        id: SpriteId::Player,
        pos: player.pos,
        tint: player.tinted.then_some(HIT_TINT),
        alpha: 1.0,
    });
    frame.extend(life_bar(player.pos, player.life_fraction()));

    if player.attacking {
        frame.push(DrawCommand::StrokeRect {
            rect: player.attack_area(),
            color: ATTACK_OUTLINE,
            alpha: 0.8,
            width: 2.0,
        });
    }

    for popup in &state.popups {
        frame.push(DrawCommand::centered_text(
            popup.amount.to_string(),
            popup.pos,
            20.0,
            TEXT_COLOR,
        ));
    }

    for sparkle in &state.sparkles {
        frame.push(DrawCommand::Sprite {
            id: SpriteId::Star,
            pos: sparkle.pos,
            tint: None,
            alpha: sparkle.alpha,
        });
    }
}

fn draw_hud(state: &GameState, frame: &mut Vec<DrawCommand>) {
    let score = if state.phase == GamePhase::GameOver {
        GAME_OVER_TEXT.to_string()
    } else {
        ui::score_text(state)
    };
    frame.push(DrawCommand::text(score, Vec2::new(16.0, 16.0), 32.0));
    frame.push(DrawCommand::text(ui::time_text(state), Vec2::new(16.0, 56.0), 24.0));
    frame.push(DrawCommand::text(ui::experience_text(state), Vec2::new(16.0, 88.0), 24.0));
    frame.push(DrawCommand::text(ui::level_text(state), Vec2::new(16.0, 120.0), 24.0));

    if state.phase == GamePhase::GameOver {
        let center = state.world_bounds().center();
        frame.push(DrawCommand::centered_text(
            RETRY_PROMPT,
            center,
            32.0,
            TEXT_COLOR,
        ));
    }
}

fn draw_upgrade_menu(state: &GameState, frame: &mut Vec<DrawCommand>) {
    let Some(menu) = &state.upgrade_menu else {
        return;
    };
    let center = state.world_bounds().center();
    frame.push(DrawCommand::FillRect {
        rect: Rect::from_center(center, Vec2::new(200.0, 100.0)),
        color: 0x000000,
        alpha: 0.8,
    });
    frame.push(DrawCommand::centered_text(
        format!("Level {}!", state.progression.level),
        center - Vec2::new(0.0, 70.0),
        28.0,
        TEXT_COLOR,
    ));
    for (i, choice) in UpgradeChoice::ALL.iter().enumerate() {
        let color = if i == menu.cursor() {
            MENU_HIGHLIGHT
        } else {
            TEXT_COLOR
        };
        frame.push(DrawCommand::centered_text(
            choice.label(),
            center + Vec2::new(0.0, i as f32 * 40.0 - 20.0),
            24.0,
            color,
        ));
    }
}

fn draw_overlay(overlay: &VolumeOverlay, frame: &mut Vec<DrawCommand>) {
    let Some(widgets) = overlay.widgets() else {
        return;
    };
    frame.push(DrawCommand::FillRect {
        rect: widgets.panel,
        color: 0x000000,
        alpha: 0.8,
    });
    for slider in [&widgets.effect, &widgets.music] {
        draw_slider(slider, frame);
    }
}

fn draw_slider(slider: &Slider, frame: &mut Vec<DrawCommand>) {
    frame.push(DrawCommand::centered_text(
        slider.label_text(),
        slider.center - Vec2::new(0.0, 30.0),
        20.0,
        TEXT_COLOR,
    ));
    frame.push(DrawCommand::FillRect {
        rect: Rect::new(slider.left(), slider.center.y - 2.0, slider.width, 4.0),
        color: LIFE_BAR_BACKGROUND,
        alpha: 1.0,
    });
    frame.push(DrawCommand::FillRect {
        rect: Rect::from_center(Vec2::new(slider.handle_x(), slider.center.y), Vec2::splat(8.0)),
        color: TEXT_COLOR,
        alpha: 1.0,
    });
}
