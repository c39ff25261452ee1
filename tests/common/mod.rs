//! Shared test double for the Synth trait

#![allow(dead_code)]

use axvoice::speech::{SpeechCommand, Synth, SynthFeatures, VoicesChangedCallback};
use axvoice::voice::VoiceDescriptor;
use axvoice::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// What the mock was asked to do, in order
#[derive(Debug, Clone, PartialEq)]
pub enum MockEvent {
    Spoke(String),
    SetVoice(String),
    SetRate(f32),
    SetPitch(f32),
    Cancel,
}

/// Scripted synthesizer
///
/// Each call to voices() pops the next enumeration result from the
/// script; once the script is exhausted the last result repeats, the way
/// a real host keeps answering with its current catalog. Everything else
/// is recorded into a shared event log the test can inspect even after
/// the mock is boxed away.
pub struct MockSynth {
    script: VecDeque<Vec<VoiceDescriptor>>,
    current: Vec<VoiceDescriptor>,
    events: Arc<Mutex<Vec<MockEvent>>>,
}

impl MockSynth {
    pub fn new(script: Vec<Vec<VoiceDescriptor>>) -> Self {
        Self {
            script: script.into(),
            current: Vec::new(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A host that never reports any voices
    pub fn silent() -> Self {
        Self::new(vec![])
    }

    pub fn push_voices(&mut self, voices: Vec<VoiceDescriptor>) {
        self.script.push_back(voices);
    }

    /// Handle to the event log, valid after the mock is boxed
    pub fn events_handle(&self) -> Arc<Mutex<Vec<MockEvent>>> {
        Arc::clone(&self.events)
    }

    fn record(&self, event: MockEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Synth for MockSynth {
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
        if let Some(next) = self.script.pop_front() {
            self.current = next;
        }
        Ok(self.current.clone())
    }

    fn on_voices_changed(&mut self, _callback: Option<VoicesChangedCallback>) -> Result<()> {
        Ok(())
    }

    fn features(&self) -> SynthFeatures {
        SynthFeatures {
            rate: true,
            pitch: true,
            voice: true,
            is_speaking: false,
            voices_changed: false,
        }
    }

    fn set_voice(&mut self, voice: &VoiceDescriptor) -> Result<()> {
        self.record(MockEvent::SetVoice(voice.uri.clone()));
        Ok(())
    }

    fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.record(MockEvent::SetRate(rate));
        Ok(())
    }

    fn set_pitch(&mut self, pitch: f32) -> Result<()> {
        self.record(MockEvent::SetPitch(pitch));
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        self.record(MockEvent::Spoke(text.to_string()));
        Ok(())
    }

    fn is_speaking(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn cancel(&mut self) -> Result<()> {
        self.record(MockEvent::Cancel);
        Ok(())
    }
}

pub fn voice(name: &str, language: &str, uri: &str) -> VoiceDescriptor {
    VoiceDescriptor::new(name, language, uri)
}

/// The catalog used by most scenarios: one UK, one US, one German voice
pub fn sample_catalog() -> Vec<VoiceDescriptor> {
    vec![
        voice("Zoe", "en-GB", "v1"),
        voice("Amy", "en-US", "v2"),
        voice("Hans", "de-DE", "v3"),
    ]
}
