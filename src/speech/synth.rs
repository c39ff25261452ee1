//! Speech synthesizer abstraction
//!
//! Provides a unified interface to the host text-to-speech engine. The
//! front-end uses this to enumerate voices and to speak text with the
//! resolved voice.

use crate::voice::VoiceDescriptor;
use crate::{AxvoiceError, Result};
use log::info;

/// Callback invoked when the host's voice set changes
pub type VoicesChangedCallback = Box<dyn FnMut() + Send>;

/// Commands sent to a speech backend
#[derive(Debug, Clone)]
pub enum SpeechCommand {
    /// Speak a string of text
    Speak(String),
    /// Cancel/silence current speech
    Cancel,
    /// Set speech rate (multiplier, 1.0 = normal)
    SetRate(f32),
    /// Set speech pitch (multiplier, 1.0 = normal)
    SetPitch(f32),
    /// Select a voice
    SetVoice(VoiceDescriptor),
}

/// Which knobs a backend supports
///
/// Callers degrade gracefully when a knob is missing: log a warning and
/// carry on rather than failing the whole request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynthFeatures {
    pub rate: bool,
    pub pitch: bool,
    pub voice: bool,
    /// Backend can report whether speech is still playing
    pub is_speaking: bool,
    /// Backend pushes voices-changed notifications
    pub voices_changed: bool,
}

/// Speech synthesizer trait
///
/// All backends implement this. The host engine owns the voice catalog;
/// this trait only observes it and plays speech through it.
pub trait Synth: Send {
    /// Send a raw command to the backend
    fn send(&mut self, cmd: SpeechCommand) -> Result<()>;

    /// Enumerate the currently known voices
    ///
    /// An empty list means the host has not finished enumerating yet;
    /// it is a valid transient state, not an error.
    fn voices(&mut self) -> Result<Vec<VoiceDescriptor>>;

    /// Subscribe to voices-changed notifications
    ///
    /// Backends without such a signal accept and ignore the callback;
    /// check `features().voices_changed` before relying on it.
    fn on_voices_changed(&mut self, callback: Option<VoicesChangedCallback>) -> Result<()>;

    /// Which knobs this backend supports
    fn features(&self) -> SynthFeatures;

    /// Select the voice to speak with
    fn set_voice(&mut self, voice: &VoiceDescriptor) -> Result<()>;

    /// Set speech rate (multiplier, 1.0 = normal speed)
    fn set_rate(&mut self, rate: f32) -> Result<()>;

    /// Set speech pitch (multiplier, 1.0 = normal pitch)
    fn set_pitch(&mut self, pitch: f32) -> Result<()>;

    /// Speak text
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Is speech still playing?
    fn is_speaking(&mut self) -> Result<bool>;

    /// Cancel/silence current speech
    fn cancel(&mut self) -> Result<()>;
}

/// Create the platform-appropriate speech synthesizer
///
/// Uses the native backend (Speech Dispatcher on Linux, AVFoundation on
/// macOS, WinRT on Windows) with a helpful message when unavailable.
pub fn create_synth() -> Result<Box<dyn Synth>> {
    use super::backends::native::NativeSynth;

    let platform = std::env::consts::OS;
    info!("Creating speech synthesizer for platform: {}", platform);

    match NativeSynth::new() {
        Ok(synth) => {
            info!("✓ Successfully initialized native TTS backend");
            Ok(Box::new(synth))
        }
        Err(e) => Err(AxvoiceError::Speech(format!(
            "No speech engine available on '{}'.\n\
             On Linux, install Speech Dispatcher: sudo apt install speech-dispatcher\n\
             Error: {}",
            platform, e
        ))),
    }
}
