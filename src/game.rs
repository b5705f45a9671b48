//! Frame driver
//!
//! Converts variable host frame times into fixed simulation ticks, routes the
//! volume overlay input, and forwards simulation events to audio.

use crate::audio::{AudioManager, SoundCue};
use crate::consts::{MAX_SUBSTEPS, SIM_DT_MS};
use crate::error::GameError;
use crate::render::{DrawCommand, build_frame};
use crate::settings::{Channel, Settings};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::VolumeOverlay;

/// Longest frame we will simulate; anything slower is dropped
const MAX_FRAME_MS: u32 = 100;

/// Host input for one frame
#[derive(Debug, Clone, Default)]
pub struct GameInput {
    /// Gameplay keys
    pub tick: TickInput,
    /// Overlay toggle key pressed this frame
    pub toggle_overlay: bool,
    /// Slider handle dragged to an x position
    pub slider_drag: Option<(Channel, f32)>,
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    overlay: VolumeOverlay,
    settings: Settings,
    audio: AudioManager,
    accumulator_ms: u32,
    wall_ms: u64,
    /// Held keys plus one-shot presses not yet seen by a tick
    input: TickInput,
}

impl Game {
    /// Create a game on the title screen. Fails if `tuning` does not validate.
    pub fn new(
        seed: u64,
        tuning: Tuning,
        settings: Settings,
        mut audio: AudioManager,
    ) -> Result<Self, GameError> {
        tuning.validate()?;
        let state = GameState::new(seed, tuning);
        let overlay = VolumeOverlay::new(state.world_bounds().center());
        audio.apply_volumes(&settings);
        audio.play(SoundCue::TitleAmbience);
        Ok(Self {
            state,
            overlay,
            settings,
            audio,
            accumulator_ms: 0,
            wall_ms: 0,
            input: TickInput::default(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn overlay(&self) -> &VolumeOverlay {
        &self.overlay
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// Advance by `dt_ms` of wall time and return the events it produced
    pub fn update(&mut self, dt_ms: u32, input: &GameInput) -> Vec<GameEvent> {
        if input.toggle_overlay {
            let open = self.overlay.toggle(&self.settings);
            self.state.overlay_open = open;
            log::info!("Volume overlay {}", if open { "opened" } else { "closed" });
        }

        if let Some((channel, x)) = input.slider_drag {
            if self.overlay.drag(channel, x, &mut self.settings).is_some() {
                self.audio.apply_volumes(&self.settings);
            }
        }

        self.merge_input(&input.tick);

        let dt_ms = dt_ms.min(MAX_FRAME_MS);
        self.wall_ms += dt_ms as u64;
        self.accumulator_ms += dt_ms;

        let mut substeps = 0;
        while self.accumulator_ms >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT_MS);
            self.accumulator_ms -= SIM_DT_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.clear_one_shots();
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator_ms = self.accumulator_ms.min(SIM_DT_MS);
        }

        let events = self.state.drain_events();
        for event in &events {
            self.audio.handle_event(event);
        }
        events
    }

    /// Draw list for the current state
    pub fn render(&self) -> Vec<DrawCommand> {
        build_frame(&self.state, &self.overlay, self.wall_ms)
    }

    fn merge_input(&mut self, next: &TickInput) {
        let pending = &mut self.input;
        pending.left = next.left;
        pending.right = next.right;
        pending.up = next.up;
        pending.down = next.down;
        pending.idle_mode = next.idle_mode;

        // Keys pressed to dismiss the overlay must not start a run behind it
        if !self.state.overlay_open {
            pending.start |= next.start;
            pending.retry |= next.retry;
            pending.menu_up |= next.menu_up;
            pending.menu_down |= next.menu_down;
            pending.menu_confirm |= next.menu_confirm;
            if next.upgrade.is_some() {
                pending.upgrade = next.upgrade;
            }
        }
    }

    fn clear_one_shots(&mut self) {
        self.input.start = false;
        self.input.retry = false;
        self.input.menu_up = false;
        self.input.menu_down = false;
        self.input.menu_confirm = false;
        self.input.upgrade = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEmitter;
    use crate::sim::GamePhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct VolumeProbe(Rc<RefCell<f32>>);

    impl SoundEmitter for VolumeProbe {
        fn play(&mut self) {}
        fn stop(&mut self) {}
        fn set_volume(&mut self, volume: f32) {
            *self.0.borrow_mut() = volume;
        }
    }

    fn game() -> Game {
        let tuning = Tuning {
            spawn_interval_ms: 1_000_000,
            ..Tuning::default()
        };
        Game::new(7, tuning, Settings::default(), AudioManager::default()).unwrap()
    }

    fn press_start() -> GameInput {
        GameInput {
            tick: TickInput {
                start: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn toggle() -> GameInput {
        GameInput {
            toggle_overlay: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_start_and_fixed_steps() {
        let mut game = game();
        let events = game.update(16, &press_start());
        assert!(events.contains(&GameEvent::GameStarted));
        assert_eq!(game.state().phase, GamePhase::Playing);

        game.update(50, &GameInput::default());
        // 16ms frame: 1 tick starts the game; the leftover 6ms + 50ms = 5 ticks
        assert_eq!(game.state().clock_ms, 50);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut game = game();
        game.update(10, &press_start());
        game.update(5000, &GameInput::default());
        assert_eq!(
            game.state().clock_ms,
            (MAX_SUBSTEPS * SIM_DT_MS) as u64
        );
    }

    #[test]
    fn test_overlay_pauses_simulation() {
        let mut game = game();
        game.update(10, &press_start());
        game.update(100, &GameInput::default());
        let clock = game.state().clock_ms;

        game.update(16, &toggle());
        assert!(game.overlay().is_visible());
        for _ in 0..20 {
            game.update(50, &GameInput::default());
        }
        assert_eq!(game.state().clock_ms, clock);

        game.update(16, &toggle());
        assert!(!game.overlay().is_visible());
        game.update(50, &GameInput::default());
        assert!(game.state().clock_ms > clock);
    }

    #[test]
    fn test_start_blocked_behind_overlay() {
        let mut game = game();
        game.update(16, &toggle());
        game.update(16, &press_start());
        assert_eq!(game.state().phase, GamePhase::Title);
    }

    #[test]
    fn test_idle_mode_waits_behind_overlay() {
        let mut game = game();
        game.update(16, &toggle());
        let idle = GameInput {
            tick: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            ..Default::default()
        };
        game.update(16, &idle);
        assert_eq!(game.state().phase, GamePhase::Title);
        assert!(game.overlay().is_visible());

        game.update(16, &toggle());
        game.update(16, &idle);
        assert_eq!(game.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            player_max_life: 0,
            ..Tuning::default()
        };
        let result = Game::new(7, tuning, Settings::default(), AudioManager::default());
        assert!(matches!(result, Err(GameError::InvalidTuning(_))));
    }

    #[test]
    fn test_slider_drag_reaches_emitters() {
        let mut game = game();
        let volume = Rc::new(RefCell::new(1.0));
        game.audio_mut()
            .register(SoundCue::BackgroundMusic, Box::new(VolumeProbe(volume.clone())));

        game.update(16, &toggle());
        let drag = GameInput {
            slider_drag: Some((Channel::Music, 350.0)),
            ..Default::default()
        };
        game.update(16, &drag);
        assert_eq!(game.settings().music_volume, 0.25);
        assert_eq!(*volume.borrow(), 0.25);
    }

    #[test]
    fn test_drag_ignored_when_overlay_hidden() {
        let mut game = game();
        let drag = GameInput {
            slider_drag: Some((Channel::Effect, 300.0)),
            ..Default::default()
        };
        game.update(16, &drag);
        assert_eq!(game.settings().effect_volume, 1.0);
    }

    #[test]
    fn test_one_shot_menu_input_applies_once() {
        let mut game = game();
        game.update(10, &press_start());
        {
            let state = game.state_mut();
            state.queued_level_ups = 1;
            state.offer_next_upgrade();
        }
        let down = GameInput {
            tick: TickInput {
                menu_down: true,
                ..Default::default()
            },
            ..Default::default()
        };
        // Several substeps in one frame; the press moves the cursor once
        game.update(50, &down);
        let cursor = game.state().upgrade_menu.as_ref().map(|m| m.cursor());
        assert_eq!(cursor, Some(1));
    }

    #[test]
    fn test_render_follows_overlay() {
        let mut game = game();
        let closed = game.render().len();
        game.update(16, &toggle());
        assert!(game.render().len() > closed);
    }
}
