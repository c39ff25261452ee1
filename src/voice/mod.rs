//! Voice catalog: descriptors, menu ordering, selection resolution, and
//! bounded retry loading

pub mod catalog;
pub mod descriptor;
pub mod loader;

pub use catalog::{LanguageFilter, VoiceCatalog};
pub use descriptor::{language_name, VoiceDescriptor};
pub use loader::{LoadStatus, VoiceLoader};
