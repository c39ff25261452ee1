//! Bounded retry loading of the voice catalog
//!
//! The host may take an unbounded amount of time to report voices and may
//! report them zero, one, or many times. Two producers feed the catalog:
//! a timer-driven poll and the host's voices-changed notification. Both
//! land in the same wholesale snapshot replacement, so whichever fires
//! last determines the final state with no correctness difference.

use crate::speech::Synth;
use crate::voice::VoiceCatalog;
use crate::{AxvoiceError, Result};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Outcome of one retry step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Catalog has voices; polling has stopped
    Ready,
    /// Catalog still empty; another poll is scheduled
    Waiting,
}

/// Maintains a fresh view of the host's voices with a bounded retry loop
pub struct VoiceLoader {
    /// Last-known snapshot, replaced wholesale on every refresh
    catalog: VoiceCatalog,

    /// Fixed delay between empty polls
    interval: Duration,

    /// Empty polls allowed before reporting VoiceUnavailable
    max_attempts: u32,

    /// Empty polls taken in the current round
    attempts: u32,

    /// Deadline of the next poll; None once voices arrived or the
    /// attempt budget ran out
    next_poll: Option<Instant>,
}

impl VoiceLoader {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            catalog: VoiceCatalog::default(),
            interval,
            max_attempts: max_attempts.max(1),
            attempts: 0,
            next_poll: Some(Instant::now()),
        }
    }

    /// Last-known catalog snapshot
    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// Has a non-empty catalog been observed?
    pub fn is_ready(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// Empty polls taken in the current round
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Replace the catalog with a fresh host snapshot
    ///
    /// The poll and notification paths both land here, so calling it
    /// repeatedly or out of order cannot produce a stale catalog. An
    /// empty result is Ok: the host just has not finished enumerating.
    pub fn refresh(&mut self, synth: &mut dyn Synth) -> Result<&VoiceCatalog> {
        let voices = synth.voices()?;
        debug!("Catalog refresh: {} voice(s)", voices.len());
        self.catalog = VoiceCatalog::new(voices);
        if self.is_ready() {
            // Non-empty snapshot observed: the retry timer stops
            self.next_poll = None;
        }
        Ok(&self.catalog)
    }

    /// Host announced that its voice set changed
    pub fn notify_changed(&mut self, synth: &mut dyn Synth) -> Result<&VoiceCatalog> {
        debug!("Voices-changed notification received");
        self.refresh(synth)
    }

    /// Run one retry step if the poll deadline has passed
    ///
    /// Returns `Ready` once a non-empty catalog has been observed and
    /// `Waiting` while the catalog is empty with attempts remaining.
    /// Exhausting the attempt budget yields `VoiceUnavailable`, which is
    /// recoverable: a later notification or [`restart`](Self::restart)
    /// begins a fresh round.
    pub fn poll_due(&mut self, synth: &mut dyn Synth) -> Result<LoadStatus> {
        if self.is_ready() {
            return Ok(LoadStatus::Ready);
        }

        match self.next_poll {
            Some(deadline) if Instant::now() >= deadline => {
                self.attempts += 1;
                debug!("Voice poll attempt {}/{}", self.attempts, self.max_attempts);
                self.refresh(synth)?;

                if self.is_ready() {
                    info!("Voice catalog ready after {} attempt(s)", self.attempts);
                    Ok(LoadStatus::Ready)
                } else if self.attempts >= self.max_attempts {
                    warn!(
                        "No voices after {} attempt(s), giving up until restarted",
                        self.attempts
                    );
                    self.next_poll = None;
                    Err(AxvoiceError::VoiceUnavailable {
                        attempts: self.attempts,
                    })
                } else {
                    self.next_poll = Some(Instant::now() + self.interval);
                    Ok(LoadStatus::Waiting)
                }
            }
            Some(_) => Ok(LoadStatus::Waiting),
            None => Err(AxvoiceError::VoiceUnavailable {
                attempts: self.attempts,
            }),
        }
    }

    /// Begin a fresh retry round after exhaustion
    pub fn restart(&mut self) {
        debug!("Restarting voice polling");
        self.attempts = 0;
        self.next_poll = Some(Instant::now());
    }

    /// Time until the next scheduled poll
    ///
    /// Returns None when no poll is scheduled (catalog ready or budget
    /// exhausted). Used to set event-loop timeouts.
    pub fn time_until_next_poll(&self) -> Option<Duration> {
        self.next_poll
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}
