//! Volume overlay and HUD text
//!
//! The overlay owns its widgets only while visible. Hiding it drops them, so
//! repeated show/hide cycles never accumulate anything.

use glam::Vec2;

use crate::settings::{Channel, Settings};
use crate::sim::{GameState, Rect};

/// Overlay panel size
pub const OVERLAY_WIDTH: f32 = 400.0;
pub const OVERLAY_HEIGHT: f32 = 300.0;
/// Slider track width
pub const SLIDER_WIDTH: f32 = 200.0;
/// Vertical offsets of the two sliders from the overlay center
const EFFECT_SLIDER_OFFSET_Y: f32 = -45.0;
const MUSIC_SLIDER_OFFSET_Y: f32 = 55.0;

/// A horizontal volume slider
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub channel: Channel,
    /// Track center
    pub center: Vec2,
    pub width: f32,
    pub value: f32,
}

impl Slider {
    pub fn new(channel: Channel, center: Vec2, value: f32) -> Self {
        Self {
            channel,
            center,
            width: SLIDER_WIDTH,
            value,
        }
    }

    /// Left end of the track
    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    /// Handle x position for the current value
    pub fn handle_x(&self) -> f32 {
        self.left() + self.value * self.width
    }

    /// Value for a handle dragged to `x`
    pub fn value_at(&self, x: f32) -> f32 {
        ((x - self.left()) / self.width).clamp(0.0, 1.0)
    }

    /// e.g. "Music Volume: 40%"
    pub fn label_text(&self) -> String {
        format!(
            "{}: {}%",
            self.channel.as_str(),
            (self.value * 100.0).round() as i32
        )
    }
}

/// Widgets that exist only while the overlay is shown
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayWidgets {
    pub panel: Rect,
    pub effect: Slider,
    pub music: Slider,
}

impl OverlayWidgets {
    fn build(center: Vec2, settings: &Settings) -> Self {
        Self {
            panel: Rect::from_center(center, Vec2::new(OVERLAY_WIDTH, OVERLAY_HEIGHT) / 2.0),
            effect: Slider::new(
                Channel::Effect,
                center + Vec2::new(0.0, EFFECT_SLIDER_OFFSET_Y),
                settings.effect_volume,
            ),
            music: Slider::new(
                Channel::Music,
                center + Vec2::new(0.0, MUSIC_SLIDER_OFFSET_Y),
                settings.music_volume,
            ),
        }
    }

    pub fn slider(&self, channel: Channel) -> &Slider {
        match channel {
            Channel::Effect => &self.effect,
            Channel::Music => &self.music,
        }
    }

    fn slider_mut(&mut self, channel: Channel) -> &mut Slider {
        match channel {
            Channel::Effect => &mut self.effect,
            Channel::Music => &mut self.music,
        }
    }
}

/// Modal volume settings overlay
#[derive(Debug, Clone)]
pub struct VolumeOverlay {
    center: Vec2,
    widgets: Option<OverlayWidgets>,
}

impl VolumeOverlay {
    /// Overlay centered at `center` (normally the middle of the screen)
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            widgets: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.widgets.is_some()
    }

    pub fn widgets(&self) -> Option<&OverlayWidgets> {
        self.widgets.as_ref()
    }

    /// Build the widgets from the current settings
    pub fn show(&mut self, settings: &Settings) {
        if self.widgets.is_none() {
            log::debug!("Volume overlay shown");
            self.widgets = Some(OverlayWidgets::build(self.center, settings));
        }
    }

    /// Drop all widget state
    pub fn hide(&mut self) {
        if self.widgets.take().is_some() {
            log::debug!("Volume overlay hidden");
        }
    }

    /// Returns whether the overlay is now visible
    pub fn toggle(&mut self, settings: &Settings) -> bool {
        if self.is_visible() {
            self.hide();
        } else {
            self.show(settings);
        }
        self.is_visible()
    }

    /// Drag a slider handle to `x` and store the new volume.
    ///
    /// Returns the applied value, or `None` if the overlay is hidden or the
    /// position was rejected.
    pub fn drag(&mut self, channel: Channel, x: f32, settings: &mut Settings) -> Option<f32> {
        let slider = self.widgets.as_mut()?.slider_mut(channel);
        match settings.set_volume(channel, slider.value_at(x)) {
            Ok(value) => {
                slider.value = value;
                Some(value)
            }
            Err(e) => {
                log::warn!("Ignoring slider drag: {}", e);
                None
            }
        }
    }
}

/// Format whole seconds as `MM:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn score_text(state: &GameState) -> String {
    format!("Score: {}", state.score)
}

pub fn time_text(state: &GameState) -> String {
    format!("Time: {}", format_clock(state.elapsed_secs))
}

pub fn experience_text(state: &GameState) -> String {
    format!(
        "EXP: {} / {}",
        state.progression.experience, state.progression.experience_to_next
    )
}

pub fn level_text(state: &GameState) -> String {
    format!("Level: {}", state.progression.level)
}
