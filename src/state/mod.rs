//! Application state management
//!
//! The State struct is the central data structure for the front-end,
//! holding configuration, the speech synthesizer, the voice catalog
//! loader, and the current voice selection.

pub mod config;

use crate::speech::{create_synth, Synth};
use crate::voice::{LanguageFilter, LoadStatus, VoiceDescriptor, VoiceLoader};
use crate::{AxvoiceError, Result};
use config::Config;
use log::{info, warn};

/// Texts longer than this log a warning before synthesis
pub const TEXT_WARN_LIMIT: usize = 20_000;

/// Main application state for the speech front-end
///
/// The catalog has a single writer: all refreshes, whether timer-driven
/// or notification-driven, go through the loader owned here.
pub struct State {
    /// Configuration loaded from ~/.axvoice.cfg
    pub config: Config,

    /// Speech synthesizer (the host TTS engine boundary)
    pub synth: Box<dyn Synth>,

    /// Voice catalog loader: bounded retry polling plus change
    /// notifications, both feeding one snapshot
    pub loader: VoiceLoader,

    /// Stable identifier of the chosen voice, empty when none chosen.
    /// A selection that goes stale against a refreshed catalog is
    /// cleared and re-resolved through the fallback chain.
    pub selected_uri: String,

    /// Menu filter derived from config
    filter: LanguageFilter,

    /// Effective rate multiplier
    rate: f32,

    /// Effective pitch multiplier
    pitch: f32,
}

impl State {
    /// Create application state with the platform synthesizer
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        info!("Configuration loaded from {:?}", config.path());

        let synth = create_synth()?;
        info!("Speech synthesizer created");

        Self::with_synth(config, synth)
    }

    /// Build state around an existing synthesizer
    ///
    /// Applies the configured rate and pitch to the synthesizer.
    /// Tests use this with a scripted synthesizer.
    pub fn with_synth(config: Config, mut synth: Box<dyn Synth>) -> Result<Self> {
        let loader = VoiceLoader::new(config.retry_interval(), config.retry_max_attempts());
        let filter = config.language_filter();
        let selected_uri = config.voice_uri();
        let rate = config.rate();
        let pitch = config.pitch();

        synth.set_rate(rate)?;
        synth.set_pitch(pitch)?;
        info!("Speech rate {} pitch {}", rate, pitch);

        Ok(Self {
            config,
            synth,
            loader,
            selected_uri,
            filter,
            rate,
            pitch,
        })
    }

    /// Save configuration to disk
    pub fn save_config(&self) -> Result<()> {
        self.config.save()
    }

    /// Persist the effective voice, rate, and pitch
    pub fn save_settings(&mut self) -> Result<()> {
        let uri = self.selected_uri.clone();
        let rate = self.rate.to_string();
        let pitch = self.pitch.to_string();
        self.config.set("speech", "voice_uri", &uri);
        self.config.set("speech", "rate", &rate);
        self.config.set("speech", "pitch", &pitch);
        self.config.save()
    }

    // ========== Voice catalog ==========

    /// Refresh the catalog from the host and revalidate the selection
    pub fn refresh_voices(&mut self) -> Result<()> {
        self.loader.refresh(self.synth.as_mut())?;
        self.revalidate_selection();
        Ok(())
    }

    /// Run one retry step if the poll deadline has passed
    pub fn poll_voices(&mut self) -> Result<LoadStatus> {
        let status = self.loader.poll_due(self.synth.as_mut())?;
        self.revalidate_selection();
        Ok(status)
    }

    /// Handle a host voices-changed notification
    pub fn notify_voices_changed(&mut self) -> Result<()> {
        self.loader.notify_changed(self.synth.as_mut())?;
        self.revalidate_selection();
        Ok(())
    }

    /// Clear a selection that no longer matches any catalog voice
    ///
    /// Only meaningful once the catalog is non-empty; an empty catalog
    /// says nothing about whether the selection is stale.
    fn revalidate_selection(&mut self) {
        if self.selected_uri.is_empty() || !self.loader.is_ready() {
            return;
        }
        if self.loader.catalog().find_by_uri(&self.selected_uri).is_none() {
            warn!(
                "Selected voice {} no longer available, will re-resolve",
                self.selected_uri
            );
            self.selected_uri.clear();
        }
    }

    /// The filtered, sorted voice menu
    pub fn voice_menu(&self) -> Vec<VoiceDescriptor> {
        self.loader.catalog().filter_and_sort(&self.filter)
    }

    /// Record the user's explicit voice choice
    ///
    /// Returns whether the uri matched a catalog voice. A non-matching
    /// uri is kept anyway and falls through the resolution chain, so a
    /// voice that reappears on a later refresh is picked up again.
    pub fn select_voice(&mut self, uri: &str) -> bool {
        self.selected_uri = uri.to_string();
        self.loader.catalog().find_by_uri(uri).is_some()
    }

    /// The voice speech would use right now, if any
    pub fn resolved_voice(&self) -> Option<&VoiceDescriptor> {
        self.loader.catalog().resolve_selected(&self.selected_uri)
    }

    // ========== Speech ==========

    /// Set the rate multiplier and apply it to the synthesizer
    pub fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.rate = rate;
        self.synth.set_rate(rate)
    }

    /// Set the pitch multiplier and apply it to the synthesizer
    pub fn set_pitch(&mut self, pitch: f32) -> Result<()> {
        self.pitch = pitch;
        self.synth.set_pitch(pitch)
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Speak text with the resolved voice
    ///
    /// Cancels any ongoing speech first, the way a new play request
    /// replaces the old one. Fails with VoiceUnavailable when no voice
    /// can be resolved; callers surface that as "wait and retry".
    pub fn speak(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        if text.chars().count() > TEXT_WARN_LIMIT {
            warn!(
                "Text is longer than {} characters; synthesis may be slow",
                TEXT_WARN_LIMIT
            );
        }

        let voice = self
            .resolved_voice()
            .cloned()
            .ok_or(AxvoiceError::VoiceUnavailable {
                attempts: self.loader.attempts(),
            })?;

        info!("Speaking with voice: {} ({})", voice.name, voice.language);

        self.synth.cancel()?;
        self.synth.set_voice(&voice)?;
        self.synth.speak(text)
    }

    /// Cancel any pending speech
    pub fn cancel_speech(&mut self) -> Result<()> {
        self.synth.cancel()
    }
}
