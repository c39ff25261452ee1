//! Native TTS backend using the tts crate
//!
//! The `tts` crate provides a unified interface to:
//! - Speech Dispatcher on Linux (via native bindings)
//! - AVFoundation on macOS/iOS (via native bindings)
//! - WinRT on Windows
//!
//! Rate and pitch arrive as multipliers (1.0 = normal) and are mapped
//! into whatever range the platform engine uses.

use crate::speech::{SpeechCommand, Synth, SynthFeatures, VoicesChangedCallback};
use crate::voice::VoiceDescriptor;
use crate::{AxvoiceError, Result};
use log::{debug, error, warn};
use tts::Tts as TtsCrate;

/// Native TTS backend
pub struct NativeSynth {
    /// The tts crate's TTS instance
    tts: TtsCrate,

    /// Cached rate multiplier
    rate: Option<f32>,

    /// Cached pitch multiplier
    pitch: Option<f32>,

    /// Cached voice identifier
    voice_uri: Option<String>,
}

impl NativeSynth {
    /// Create a new native TTS synthesizer
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let tts = TtsCrate::default()
            .map_err(|e| AxvoiceError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        debug!("Native TTS backend created successfully");

        Ok(Self {
            tts,
            rate: None,
            pitch: None,
            voice_uri: None,
        })
    }

    /// Map a rate multiplier into the platform's rate range
    ///
    /// 1.0 maps to the platform's normal rate; the result is clamped to
    /// what the engine accepts.
    fn convert_rate(&self, multiplier: f32) -> f32 {
        let scaled = self.tts.normal_rate() * multiplier;
        scaled.clamp(self.tts.min_rate(), self.tts.max_rate())
    }

    /// Map a pitch multiplier into the platform's pitch range
    fn convert_pitch(&self, multiplier: f32) -> f32 {
        let scaled = self.tts.normal_pitch() * multiplier;
        scaled.clamp(self.tts.min_pitch(), self.tts.max_pitch())
    }
}

impl Synth for NativeSynth {
    fn send(&mut self, cmd: SpeechCommand) -> Result<()> {
        match cmd {
            SpeechCommand::Speak(text) => self.speak(&text),
            SpeechCommand::Cancel => self.cancel(),
            SpeechCommand::SetRate(rate) => self.set_rate(rate),
            SpeechCommand::SetPitch(pitch) => self.set_pitch(pitch),
            SpeechCommand::SetVoice(voice) => self.set_voice(&voice),
        }
    }

    fn voices(&mut self) -> Result<Vec<VoiceDescriptor>> {
        let voices = self
            .tts
            .voices()
            .map_err(|e| AxvoiceError::Speech(format!("Failed to enumerate voices: {}", e)))?;

        Ok(voices
            .iter()
            .map(|v| VoiceDescriptor::new(v.name(), v.language().to_string(), v.id()))
            .collect())
    }

    fn on_voices_changed(&mut self, _callback: Option<VoicesChangedCallback>) -> Result<()> {
        // No desktop engine pushes this signal today; the retry poller
        // carries refresh duty instead.
        warn!("Voices-changed notifications not supported by this backend");
        Ok(())
    }

    fn features(&self) -> SynthFeatures {
        let features = self.tts.supported_features();
        SynthFeatures {
            rate: features.rate,
            pitch: features.pitch,
            voice: features.voice,
            is_speaking: features.is_speaking,
            voices_changed: false,
        }
    }

    fn set_voice(&mut self, voice: &VoiceDescriptor) -> Result<()> {
        debug!("Setting voice to {} ({})", voice.name, voice.uri);
        self.voice_uri = Some(voice.uri.clone());

        let features = self.tts.supported_features();
        if !features.voice {
            warn!("Voice selection not supported on this platform");
            return Ok(());
        }

        let host_voices = self
            .tts
            .voices()
            .map_err(|e| AxvoiceError::Speech(format!("Failed to enumerate voices: {}", e)))?;

        if let Some(host_voice) = host_voices.iter().find(|v| v.id() == voice.uri) {
            self.tts
                .set_voice(host_voice)
                .map_err(|e| AxvoiceError::Speech(format!("Failed to set voice: {}", e)))?;
        } else {
            warn!(
                "Voice {} not among the {} host voices",
                voice.uri,
                host_voices.len()
            );
        }

        Ok(())
    }

    fn set_rate(&mut self, rate: f32) -> Result<()> {
        debug!("Setting rate multiplier to {}", rate);
        self.rate = Some(rate);

        let features = self.tts.supported_features();
        if !features.rate {
            warn!("Rate control not supported on this platform");
            return Ok(());
        }

        let converted_rate = self.convert_rate(rate);
        self.tts
            .set_rate(converted_rate)
            .map_err(|e| AxvoiceError::Speech(format!("Failed to set rate: {}", e)))?;

        Ok(())
    }

    fn set_pitch(&mut self, pitch: f32) -> Result<()> {
        debug!("Setting pitch multiplier to {}", pitch);
        self.pitch = Some(pitch);

        let features = self.tts.supported_features();
        if !features.pitch {
            warn!("Pitch control not supported on this platform");
            return Ok(());
        }

        let converted_pitch = self.convert_pitch(pitch);
        self.tts
            .set_pitch(converted_pitch)
            .map_err(|e| AxvoiceError::Speech(format!("Failed to set pitch: {}", e)))?;

        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        debug!("Speaking: {}", text);
        self.tts.speak(text, false).map_err(|e| {
            error!("Failed to speak: {}", e);
            AxvoiceError::Speech(format!("Speak failed: {}", e))
        })?;

        Ok(())
    }

    fn is_speaking(&mut self) -> Result<bool> {
        let features = self.tts.supported_features();
        if !features.is_speaking {
            return Ok(false);
        }

        self.tts
            .is_speaking()
            .map_err(|e| AxvoiceError::Speech(format!("Failed to query speech state: {}", e)))
    }

    fn cancel(&mut self) -> Result<()> {
        debug!("Canceling speech");
        self.tts.stop().map_err(|e| {
            error!("Failed to cancel speech: {}", e);
            AxvoiceError::Speech(format!("Cancel failed: {}", e))
        })?;

        Ok(())
    }
}
