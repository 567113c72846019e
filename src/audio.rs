//! Fire-and-forget sound effects.
//!
//! Game logic only ever calls [`SoundSink::play`], which never blocks and
//! never fails: backend errors are caught here and logged.

use std::io::Write;

use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEffect {
    Shoot,
    Explosion,
}

impl SoundEffect {
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explosion => "explosion",
        }
    }

    /// Frequency (Hz) and length (ms) of the synthesized blip.
    pub fn tone(self) -> (f32, u64) {
        match self {
            SoundEffect::Shoot => (880.0, 60),
            SoundEffect::Explosion => (110.0, 180),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SoundError {
    #[error("sound backend unavailable: {0}")]
    Unavailable(String),

    #[error("terminal bell failed: {0}")]
    Bell(#[from] std::io::Error),

    #[cfg(feature = "audio")]
    #[error("audio device error: {0}")]
    Stream(#[from] rodio::StreamError),

    #[cfg(feature = "audio")]
    #[error("audio playback error: {0}")]
    Play(#[from] rodio::PlayError),
}

/// Capability to play a sound effect without waiting for it.
pub trait SoundSink {
    /// Start playback. Implementations must return promptly.
    fn try_play(&self, effect: SoundEffect) -> Result<(), SoundError>;

    /// Start playback, logging any failure. Never retried.
    fn play(&self, effect: SoundEffect) {
        if let Err(err) = self.try_play(effect) {
            warn!(effect = effect.name(), error = %err, "sound effect failed");
        }
    }
}

/// Plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Muted;

impl SoundSink for Muted {
    fn try_play(&self, _effect: SoundEffect) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Rings the terminal bell for every effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn try_play(&self, _effect: SoundEffect) -> Result<(), SoundError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(feature = "audio")]
pub use tone::TonePlayer;

#[cfg(feature = "audio")]
mod tone {
    use std::time::Duration;

    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle};

    use super::{SoundEffect, SoundError, SoundSink};

    /// Short sine blips mixed into the default output device.
    pub struct TonePlayer {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl TonePlayer {
        pub fn open() -> Result<Self, SoundError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    impl SoundSink for TonePlayer {
        fn try_play(&self, effect: SoundEffect) -> Result<(), SoundError> {
            let (freq, ms) = effect.tone();
            let source = SineWave::new(freq)
                .take_duration(Duration::from_millis(ms))
                .amplify(0.15);
            self.handle.play_raw(source)?;
            Ok(())
        }
    }
}

/// Open the tone backend, if this build has one.
pub fn open_tone_player() -> Result<Box<dyn SoundSink>, SoundError> {
    #[cfg(feature = "audio")]
    {
        Ok(Box::new(TonePlayer::open()?))
    }
    #[cfg(not(feature = "audio"))]
    {
        Err(SoundError::Unavailable(
            "built without the `audio` feature".into(),
        ))
    }
}
