//! Voice loader retry and convergence tests
//!
//! The loader polls a scripted host with a zero interval so every poll
//! is immediately due.

mod common;

use axvoice::voice::{LoadStatus, VoiceLoader};
use axvoice::AxvoiceError;
use common::{sample_catalog, voice, MockSynth};
use std::time::Duration;

fn make_loader(max_attempts: u32) -> VoiceLoader {
    VoiceLoader::new(Duration::ZERO, max_attempts)
}

#[test]
fn test_polls_until_voices_arrive_then_stops() {
    // Host reports nothing twice, then its catalog
    let mut synth = MockSynth::new(vec![vec![], vec![], sample_catalog()]);
    let mut loader = make_loader(10);

    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Waiting);
    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Waiting);
    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Ready);

    assert!(loader.is_ready());
    assert_eq!(loader.catalog().len(), 3);
    // The retry timer stops once a non-empty snapshot is observed
    assert!(loader.time_until_next_poll().is_none());

    // Further polls are no-ops
    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Ready);
}

#[test]
fn test_retry_is_bounded_and_recoverable() {
    let mut synth = MockSynth::silent();
    let mut loader = make_loader(3);

    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Waiting);
    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Waiting);

    // Third empty poll exhausts the budget
    let err = loader.poll_due(&mut synth).unwrap_err();
    assert!(matches!(err, AxvoiceError::VoiceUnavailable { attempts: 3 }));

    // Still unavailable, not panicking and not polling forever
    let err = loader.poll_due(&mut synth).unwrap_err();
    assert!(matches!(err, AxvoiceError::VoiceUnavailable { .. }));
    assert!(loader.time_until_next_poll().is_none());

    // A fresh round recovers once the host comes up
    synth.push_voices(sample_catalog());
    loader.restart();
    assert_eq!(loader.attempts(), 0);
    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Ready);
}

#[test]
fn test_notification_recovers_after_exhaustion() {
    let mut synth = MockSynth::silent();
    let mut loader = make_loader(1);

    assert!(loader.poll_due(&mut synth).is_err());

    // Late host notification still brings the catalog up
    synth.push_voices(sample_catalog());
    loader.notify_changed(&mut synth).unwrap();
    assert!(loader.is_ready());
    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Ready);
}

#[test]
fn test_poll_and_notification_converge() {
    // Whichever path runs, the resulting catalog and resolution are the
    // same for the same host state
    let mut poll_synth = MockSynth::new(vec![sample_catalog()]);
    let mut poll_loader = make_loader(10);
    poll_loader.poll_due(&mut poll_synth).unwrap();

    let mut notify_synth = MockSynth::new(vec![sample_catalog()]);
    let mut notify_loader = make_loader(10);
    notify_loader.notify_changed(&mut notify_synth).unwrap();

    assert_eq!(
        poll_loader.catalog().voices(),
        notify_loader.catalog().voices()
    );
    assert_eq!(
        poll_loader.catalog().resolve_selected(""),
        notify_loader.catalog().resolve_selected("")
    );

    // Running the other producer afterwards changes nothing
    notify_loader.poll_due(&mut notify_synth).unwrap();
    assert_eq!(
        poll_loader.catalog().voices(),
        notify_loader.catalog().voices()
    );
}

#[test]
fn test_refresh_replaces_the_snapshot_wholesale() {
    let mut synth = MockSynth::new(vec![
        vec![voice("Old", "en-US", "old")],
        vec![voice("New", "en-GB", "new")],
    ]);
    let mut loader = make_loader(10);

    loader.refresh(&mut synth).unwrap();
    assert!(loader.catalog().find_by_uri("old").is_some());

    loader.refresh(&mut synth).unwrap();
    assert!(loader.catalog().find_by_uri("old").is_none());
    assert!(loader.catalog().find_by_uri("new").is_some());
    assert_eq!(loader.catalog().len(), 1);
}

#[test]
fn test_refresh_is_idempotent() {
    let mut synth = MockSynth::new(vec![sample_catalog()]);
    let mut loader = make_loader(10);

    loader.refresh(&mut synth).unwrap();
    let first: Vec<_> = loader.catalog().voices().to_vec();

    // The script is exhausted, so the host keeps answering the same
    loader.refresh(&mut synth).unwrap();
    loader.notify_changed(&mut synth).unwrap();
    assert_eq!(loader.catalog().voices(), first.as_slice());
}

#[test]
fn test_interval_schedules_the_next_poll() {
    let mut synth = MockSynth::silent();
    let mut loader = VoiceLoader::new(Duration::from_secs(60), 10);

    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Waiting);

    // Second poll is not due yet and must not consume an attempt
    assert_eq!(loader.poll_due(&mut synth).unwrap(), LoadStatus::Waiting);
    assert_eq!(loader.attempts(), 1);

    let wait = loader.time_until_next_poll().unwrap();
    assert!(wait <= Duration::from_secs(60));
    assert!(wait > Duration::from_secs(50));
}
