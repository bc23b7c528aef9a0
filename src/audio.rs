use log::{info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::AudioConfig;
use crate::session::GameEvent;

type Sound = Buffered<Decoder<BufReader<File>>>;

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Shot,
    /// Bullet striking an enemy
    Hit,
    /// Enemy reaching the player
    Collision,
}

impl Cue {
    /// The cue a game event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired => Some(Cue::Shot),
            GameEvent::EnemyHit => Some(Cue::Hit),
            GameEvent::PlayerHit => Some(Cue::Collision),
            _ => None,
        }
    }

    /// The configured file this cue plays
    pub fn file_name<'a>(&self, config: &'a AudioConfig) -> &'a str {
        match self {
            Cue::Shot => &config.shot_file,
            Cue::Hit => &config.hit_file,
            Cue::Collision => &config.collision_file,
        }
    }
}

struct Output {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    /// Pre-loaded and buffered cues (None if loading failed)
    shot: Option<Sound>,
    hit: Option<Sound>,
    collision: Option<Sound>,
    music: Option<Sound>,
    /// Kept alive so the loop keeps playing
    music_sink: Option<Sink>,
}

/// Audio manager for background music and sound effects. Every failure
/// degrades to silence.
pub struct AudioManager {
    output: Option<Output>,
    config: AudioConfig,
}

impl AudioManager {
    /// Opens the default output device and pre-loads every sound
    pub fn new(config: &AudioConfig) -> Self {
        if !config.enabled {
            info!("audio disabled by configuration");
            return Self::silent(config);
        }

        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(err) => {
                warn!("failed to open audio output, continuing without audio: {}", err);
                return Self::silent(config);
            }
        };

        let dir = Path::new(&config.sounds_dir);
        let output = Output {
            _stream: stream,
            stream_handle,
            shot: load_sound(&dir.join(Cue::Shot.file_name(config))),
            hit: load_sound(&dir.join(Cue::Hit.file_name(config))),
            collision: load_sound(&dir.join(Cue::Collision.file_name(config))),
            music: load_sound(&dir.join(&config.music_file)),
            music_sink: None,
        };

        Self {
            output: Some(output),
            config: config.clone(),
        }
    }

    /// A manager that never makes a sound
    pub fn silent(config: &AudioConfig) -> Self {
        Self {
            output: None,
            config: config.clone(),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.output.is_none()
    }

    /// Starts the background loop; calling it again while it plays does nothing
    pub fn start_music(&mut self) {
        let Some(output) = self.output.as_mut() else {
            return;
        };
        if output.music_sink.is_some() {
            return;
        }
        let Some(music) = &output.music else {
            return;
        };
        match Sink::try_new(&output.stream_handle) {
            Ok(sink) => {
                sink.set_volume(self.config.music_volume);
                sink.append(music.clone().repeat_infinite());
                output.music_sink = Some(sink);
            }
            Err(err) => warn!("failed to start background music: {}", err),
        }
    }

    /// Plays a cue and forgets about it
    pub fn play(&self, cue: Cue) {
        let Some(output) = &self.output else {
            return;
        };
        let (sound, volume) = match cue {
            Cue::Shot => (&output.shot, self.config.shot_volume),
            Cue::Hit => (&output.hit, self.config.hit_volume),
            Cue::Collision => (&output.collision, self.config.collision_volume),
        };
        // Only play if the sound was successfully loaded
        if let Some(sound) = sound {
            // Ignore errors for sound playback - don't want to crash the game
            if let Ok(sink) = Sink::try_new(&output.stream_handle) {
                sink.set_volume(volume);
                // Clone the buffered source (fast - just clones references)
                sink.append(sound.clone());
                sink.detach();
            }
        }
    }

    pub fn play_events(&self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(Cue::for_event) {
            self.play(cue);
        }
    }
}

fn load_sound(path: &Path) -> Option<Sound> {
    let decoded = File::open(path)
        .map_err(|err| err.to_string())
        .and_then(|file| Decoder::new(BufReader::new(file)).map_err(|err| err.to_string()));
    match decoded {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            warn!("could not load sound {}: {}", path.display(), err);
            None
        }
    }
}
