//! Audio boundary
//!
//! The game never decodes or mixes audio. It drives sound-emitter handles
//! supplied by the host: play, stop and set-volume. Simulation events are
//! mapped to cues here.

use crate::settings::{Channel, Settings};
use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player reached a new level
    LevelUp,
    /// Player attack went off
    PlayerAttack,
    /// An enemy took damage
    EnemyHit,
    /// In-game music loop
    BackgroundMusic,
    /// Title screen ambience loop
    TitleAmbience,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::LevelUp,
        SoundCue::PlayerAttack,
        SoundCue::EnemyHit,
        SoundCue::BackgroundMusic,
        SoundCue::TitleAmbience,
    ];

    /// Which volume slider controls this cue
    pub fn channel(&self) -> Channel {
        match self {
            SoundCue::BackgroundMusic | SoundCue::TitleAmbience => Channel::Music,
            _ => Channel::Effect,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::LevelUp => "level_up",
            SoundCue::PlayerAttack => "player_attack",
            SoundCue::EnemyHit => "enemy_hit",
            SoundCue::BackgroundMusic => "background_music",
            SoundCue::TitleAmbience => "title_ambience",
        }
    }
}

/// A host-owned sound handle
pub trait SoundEmitter {
    fn play(&mut self);
    fn stop(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// Emitter that only logs; used by the headless driver
#[derive(Debug, Clone)]
pub struct LogEmitter {
    cue: SoundCue,
    volume: f32,
}

impl LogEmitter {
    pub fn new(cue: SoundCue) -> Self {
        Self { cue, volume: 1.0 }
    }
}

impl SoundEmitter for LogEmitter {
    fn play(&mut self) {
        log::debug!("play {} (volume {:.2})", self.cue.as_str(), self.volume);
    }

    fn stop(&mut self) {
        log::debug!("stop {}", self.cue.as_str());
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

/// Audio manager for the game
pub struct AudioManager {
    emitters: Vec<(SoundCue, Box<dyn SoundEmitter>)>,
    settings: Settings,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AudioManager {
    pub fn new(settings: Settings) -> Self {
        Self {
            emitters: Vec::new(),
            settings,
        }
    }

    /// Manager with a [`LogEmitter`] for every cue
    pub fn logging(settings: Settings) -> Self {
        let mut audio = Self::new(settings);
        for cue in SoundCue::ALL {
            audio.register(cue, Box::new(LogEmitter::new(cue)));
        }
        audio
    }

    /// Register an emitter for a cue; it immediately receives its channel volume
    pub fn register(&mut self, cue: SoundCue, mut emitter: Box<dyn SoundEmitter>) {
        emitter.set_volume(self.settings.volume(cue.channel()));
        self.emitters.push((cue, emitter));
    }

    pub fn registered(&self) -> usize {
        self.emitters.len()
    }

    /// Push new volumes to every registered emitter
    pub fn apply_volumes(&mut self, settings: &Settings) {
        self.settings = settings.clone();
        for (cue, emitter) in &mut self.emitters {
            emitter.set_volume(settings.volume(cue.channel()));
        }
    }

    /// Play a sound cue
    pub fn play(&mut self, cue: SoundCue) {
        for (_, emitter) in self.emitters.iter_mut().filter(|(c, _)| *c == cue) {
            emitter.play();
        }
    }

    pub fn stop(&mut self, cue: SoundCue) {
        for (_, emitter) in self.emitters.iter_mut().filter(|(c, _)| *c == cue) {
            emitter.stop();
        }
    }

    /// React to a simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted => {
                self.stop(SoundCue::TitleAmbience);
                self.play(SoundCue::BackgroundMusic);
            }
            GameEvent::SessionReset => self.play(SoundCue::BackgroundMusic),
            GameEvent::PlayerAttacked { .. } => self.play(SoundCue::PlayerAttack),
            GameEvent::EnemyHit { .. } => self.play(SoundCue::EnemyHit),
            GameEvent::LevelUp { .. } => self.play(SoundCue::LevelUp),
            GameEvent::GameOver { .. } => self.stop(SoundCue::BackgroundMusic),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Play,
        Stop,
        Volume(f32),
    }

    struct Recorder(Rc<RefCell<Vec<Call>>>);

    impl SoundEmitter for Recorder {
        fn play(&mut self) {
            self.0.borrow_mut().push(Call::Play);
        }
        fn stop(&mut self) {
            self.0.borrow_mut().push(Call::Stop);
        }
        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().push(Call::Volume(volume));
        }
    }

    fn recorder() -> (Box<dyn SoundEmitter>, Rc<RefCell<Vec<Call>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Box::new(Recorder(log.clone())), log)
    }

    #[test]
    fn test_register_sets_channel_volume() {
        let settings = Settings {
            effect_volume: 0.3,
            music_volume: 0.6,
        };
        let mut audio = AudioManager::new(settings);
        let (hit, hit_log) = recorder();
        let (music, music_log) = recorder();
        audio.register(SoundCue::EnemyHit, hit);
        audio.register(SoundCue::BackgroundMusic, music);

        assert_eq!(*hit_log.borrow(), vec![Call::Volume(0.3)]);
        assert_eq!(*music_log.borrow(), vec![Call::Volume(0.6)]);
    }

    #[test]
    fn test_apply_volumes_propagates_by_channel() {
        let mut audio = AudioManager::default();
        let (hit, hit_log) = recorder();
        let (music, music_log) = recorder();
        audio.register(SoundCue::EnemyHit, hit);
        audio.register(SoundCue::TitleAmbience, music);

        let settings = Settings {
            effect_volume: 0.5,
            music_volume: 0.1,
        };
        audio.apply_volumes(&settings);
        assert_eq!(hit_log.borrow().last(), Some(&Call::Volume(0.5)));
        assert_eq!(music_log.borrow().last(), Some(&Call::Volume(0.1)));
    }

    #[test]
    fn test_events_drive_cues() {
        let mut audio = AudioManager::default();
        let (title, title_log) = recorder();
        let (music, music_log) = recorder();
        let (level, level_log) = recorder();
        audio.register(SoundCue::TitleAmbience, title);
        audio.register(SoundCue::BackgroundMusic, music);
        audio.register(SoundCue::LevelUp, level);

        audio.handle_event(&GameEvent::GameStarted);
        audio.handle_event(&GameEvent::LevelUp { level: 2 });
        audio.handle_event(&GameEvent::GameOver {
            score: 0,
            elapsed_secs: 0,
        });

        assert_eq!(title_log.borrow().last(), Some(&Call::Stop));
        assert_eq!(music_log.borrow()[1..], [Call::Play, Call::Stop]);
        assert_eq!(level_log.borrow().last(), Some(&Call::Play));
    }

    #[test]
    fn test_logging_manager_registers_every_cue() {
        let audio = AudioManager::logging(Settings::default());
        assert_eq!(audio.registered(), SoundCue::ALL.len());
    }
}
