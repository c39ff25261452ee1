//! axvoice - text-to-speech voice picker and speech front-end
//!
//! Maintains a catalog of the synthetic voices known to the host TTS
//! engine, deterministically resolves which voice to speak with, and
//! speaks text at a configurable rate and pitch.

pub mod error;
pub mod speech;
pub mod state;
pub mod voice;

pub use error::{AxvoiceError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "axvoice";
