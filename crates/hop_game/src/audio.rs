//! Sound effect playback. The game runs silently when no output device
//! is available.

use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::assets::SoundHandle;

pub struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Audio {
    pub fn try_new() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                log::info!("Audio output opened");
                Some(Self {
                    _stream: stream,
                    handle,
                })
            }
            Err(err) => {
                log::warn!("Audio disabled: {err}");
                None
            }
        }
    }

    /// Fire and forget: the sound keeps playing after this returns.
    pub fn play(&self, sound: &SoundHandle) {
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::warn!("No sink for '{}': {err}", sound.path().display());
                return;
            }
        };
        match sound.decoder() {
            Ok(source) => {
                sink.append(source);
                sink.detach();
            }
            Err(err) => log::warn!("Failed to decode '{}': {err}", sound.path().display()),
        }
    }
}
