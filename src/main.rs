//! axvoice main entry point
//!
//! Command-line front-end: waits for the host to report voices, resolves
//! the voice to use, and either lists the voice menu or speaks text.

use axvoice::state::State;
use axvoice::voice::{language_name, LoadStatus};
use axvoice::{AxvoiceError, Result};
use log::{error, info, warn};
use std::io::Read;
use std::ops::RangeInclusive;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const USAGE: &str = "\
Usage: axvoice [OPTIONS] [TEXT]...

Speaks TEXT (or standard input when no TEXT is given) using the host
text-to-speech engine.

Options:
  --list-voices     List the voice menu and exit
  --all             With --list-voices, list every voice the host knows
  --json            With --list-voices, print a JSON array
  --voice <URI>     Speak with the voice identified by URI
  --rate <N>        Rate multiplier (0.1 to 10.0, 1.0 = normal)
  --pitch <N>       Pitch multiplier (0.0 to 2.0, 1.0 = normal)
  --save            Persist voice, rate and pitch to the config file
  -d, --debug       Verbose logging to axvoice.log
  -h, --help        Show this help";

/// Parsed command line
#[derive(Debug, Default)]
struct CliArgs {
    list_voices: bool,
    all: bool,
    json: bool,
    voice: Option<String>,
    rate: Option<f32>,
    pitch: Option<f32>,
    save: bool,
    debug: bool,
    help: bool,
    text: Vec<String>,
}

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return;
    }

    // Initialize logger
    if args.debug {
        // Debug mode: write to axvoice.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("axvoice.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open axvoice.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "axvoice version {} starting (debug mode, logging to axvoice.log)",
            axvoice::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run(args) {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let mut state = State::new()?;
    info!("State initialized - config from {:?}", state.config.path());

    // Subscribe to host voices-changed notifications. Desktop engines
    // rarely push this signal; the bounded poller below is the fallback
    // path, and both feed the same catalog refresh.
    let voices_changed = Arc::new(AtomicBool::new(false));
    if state.synth.features().voices_changed {
        let flag = Arc::clone(&voices_changed);
        state.synth.on_voices_changed(Some(Box::new(move || {
            flag.store(true, Ordering::Relaxed);
        })))?;
    }

    wait_for_voices(&mut state, &voices_changed)?;

    if let Some(uri) = &args.voice {
        if !state.select_voice(uri) {
            warn!("Voice {} not in the current catalog", uri);
            eprintln!(
                "Warning: voice '{}' is not available; using the default instead",
                uri
            );
        }
    }
    if let Some(rate) = args.rate {
        state.set_rate(rate)?;
    }
    if let Some(pitch) = args.pitch {
        state.set_pitch(pitch)?;
    }

    if args.save {
        state.save_settings()?;
        println!("Settings saved to {}", state.config.path().display());
    }

    if args.list_voices {
        return list_voices(&state, args.all, args.json);
    }

    let text = gather_text(&args)?;

    // Input validation belongs here, before synthesis is invoked
    if text.trim().is_empty() {
        return Err(AxvoiceError::Other(
            "Please enter some text to speak".to_string(),
        ));
    }

    state.speak(text.trim())?;
    wait_for_speech(&mut state)
}

/// Drive the catalog retry loop until voices arrive or the bound is hit
///
/// The host push and the poll timer race; both are idempotent producers
/// of the same refreshed catalog, so whichever fires last wins.
fn wait_for_voices(state: &mut State, voices_changed: &AtomicBool) -> Result<()> {
    loop {
        if voices_changed.swap(false, Ordering::Relaxed) {
            state.notify_voices_changed()?;
        }

        match state.poll_voices() {
            Ok(LoadStatus::Ready) => {
                info!("{} voice(s) available", state.loader.catalog().len());
                return Ok(());
            }
            Ok(LoadStatus::Waiting) => {
                let timeout = state
                    .loader
                    .time_until_next_poll()
                    .map(|d| d.min(Duration::from_millis(100)))
                    .unwrap_or(Duration::from_millis(100));
                thread::sleep(timeout);
            }
            Err(e @ AxvoiceError::VoiceUnavailable { .. }) => {
                eprintln!("No voices are available yet. Wait a moment and try again.");
                return Err(e);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Print the voice menu
fn list_voices(state: &State, all: bool, json: bool) -> Result<()> {
    let voices = if all {
        state.loader.catalog().voices().to_vec()
    } else {
        state.voice_menu()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&voices)?);
        return Ok(());
    }

    if voices.is_empty() {
        println!("No voices match the current language filter");
        return Ok(());
    }

    let selected = state.resolved_voice().map(|v| v.uri.clone());
    for voice in &voices {
        let marker = if selected.as_deref() == Some(voice.uri.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<28} {:<8} {:<20} {}",
            marker,
            voice.name,
            voice.language,
            language_name(&voice.language),
            voice.uri
        );
    }

    Ok(())
}

/// Text from the command line, or standard input when none was given
fn gather_text(args: &CliArgs) -> Result<String> {
    if !args.text.is_empty() {
        return Ok(args.text.join(" "));
    }

    info!("Reading text from standard input");
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Block until the engine finishes speaking
fn wait_for_speech(state: &mut State) -> Result<()> {
    if !state.synth.features().is_speaking {
        warn!("Cannot observe speech progress on this platform");
        return Ok(());
    }

    // The engine may take a moment to start reporting activity
    thread::sleep(Duration::from_millis(150));
    while state.synth.is_speaking()? {
        thread::sleep(Duration::from_millis(100));
    }
    Ok(())
}

fn parse_args(argv: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut args = CliArgs::default();
    let mut argv = argv;

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--list-voices" => args.list_voices = true,
            "--all" => args.all = true,
            "--json" => args.json = true,
            "--save" => args.save = true,
            "--debug" | "-d" => args.debug = true,
            "--help" | "-h" => args.help = true,
            "--voice" => args.voice = Some(expect_value("--voice", argv.next())?),
            "--rate" => args.rate = Some(parse_multiplier("--rate", argv.next(), 0.1..=10.0)?),
            "--pitch" => args.pitch = Some(parse_multiplier("--pitch", argv.next(), 0.0..=2.0)?),
            other if other.len() > 1 && other.starts_with('-') => {
                return Err(AxvoiceError::Other(format!("Unknown option: {}", other)));
            }
            _ => args.text.push(arg),
        }
    }

    Ok(args)
}

fn expect_value(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| AxvoiceError::Other(format!("{} requires a value", flag)))
}

fn parse_multiplier(
    flag: &str,
    value: Option<String>,
    range: RangeInclusive<f32>,
) -> Result<f32> {
    let raw = expect_value(flag, value)?;
    let parsed: f32 = raw
        .parse()
        .map_err(|_| AxvoiceError::Other(format!("{} expects a number, got '{}'", flag, raw)))?;

    if !range.contains(&parsed) {
        return Err(AxvoiceError::Other(format!(
            "{} must be between {} and {}",
            flag,
            range.start(),
            range.end()
        )));
    }

    Ok(parsed)
}
