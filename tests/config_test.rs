//! Configuration loading tests
//!
//! Tests that configuration loads correctly, provides expected default
//! values, and rejects out-of-range settings.

use axvoice::state::config::Config;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_default_config_created_on_first_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("axvoice.cfg");

    let config = Config::load_from(path.clone()).expect("Failed to create config");

    // The default file lands on disk
    assert!(path.exists());
    assert_eq!(config.path(), &path);

    assert_eq!(config.voice_uri(), "");
    assert_eq!(config.rate(), 1.0);
    assert_eq!(config.pitch(), 1.0);
    assert_eq!(config.languages(), vec!["en-us", "en-gb"]);
    assert_eq!(config.preferred_region(), "us");
    assert_eq!(config.retry_interval(), Duration::from_millis(500));
    assert_eq!(config.retry_max_attempts(), 20);
}

#[test]
fn test_out_of_range_values_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("axvoice.cfg");
    std::fs::write(
        &path,
        "[speech]\nrate=50.0\npitch=-3.0\n\n[voices]\nretry_max_attempts=0\n",
    )
    .unwrap();

    let config = Config::load_from(path).unwrap();
    assert_eq!(config.rate(), 1.0);
    assert_eq!(config.pitch(), 1.0);
    // At least one attempt always happens
    assert_eq!(config.retry_max_attempts(), 1);
}

#[test]
fn test_set_save_reload_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("axvoice.cfg");

    let mut config = Config::load_from(path.clone()).unwrap();
    config.set("speech", "voice_uri", "v42");
    config.save().unwrap();

    let reloaded = Config::load_from(path).unwrap();
    assert_eq!(reloaded.voice_uri(), "v42");
}

#[test]
fn test_language_filter_follows_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("axvoice.cfg");
    std::fs::write(
        &path,
        "[voices]\nlanguages = de, fr-FR\npreferred_region = de\n",
    )
    .unwrap();

    let config = Config::load_from(path).unwrap();
    assert_eq!(config.languages(), vec!["de", "fr-fr"]);
    assert_eq!(config.preferred_region(), "de");

    let filter = config.language_filter();
    assert_eq!(filter.prefixes(), ["de", "fr-fr"]);
}

#[test]
fn test_unparseable_values_fall_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("axvoice.cfg");
    std::fs::write(&path, "[speech]\nrate=fast\n\n[voices]\nretry_interval_ms=soon\n").unwrap();

    let config = Config::load_from(path).unwrap();
    assert_eq!(config.rate(), 1.0);
    assert_eq!(config.retry_interval(), Duration::from_millis(500));
}
