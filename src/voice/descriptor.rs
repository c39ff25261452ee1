//! Voice descriptor value type

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// One synthesizable voice exposed by the host TTS engine
///
/// Immutable once constructed; the resolver only reads and copies these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceDescriptor {
    /// Human-readable voice name (e.g. "Samantha")
    pub name: String,

    /// BCP 47 language tag (e.g. "en-US")
    pub language: String,

    /// Stable identifier used to re-select the voice across refreshes
    pub uri: String,
}

impl VoiceDescriptor {
    pub fn new(
        name: impl Into<String>,
        language: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            uri: uri.into(),
        }
    }

    /// Case-insensitive prefix test on the language tag
    pub fn language_starts_with(&self, prefix: &str) -> bool {
        self.language
            .to_lowercase()
            .starts_with(&prefix.to_lowercase())
    }

    /// Case-insensitive substring test on the language tag
    pub fn language_contains(&self, marker: &str) -> bool {
        self.language
            .to_lowercase()
            .contains(&marker.to_lowercase())
    }
}

impl fmt::Display for VoiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.language)
    }
}

/// Display names for common language tags
///
/// Used by the voice menu so users see "American English" next to "en-US"
static LANGUAGE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("en-us", "American English");
    m.insert("en-gb", "British English");
    m.insert("en-au", "Australian English");
    m.insert("en-in", "Indian English");
    m.insert("de-de", "German");
    m.insert("es-es", "Spanish");
    m.insert("es-mx", "Mexican Spanish");
    m.insert("fr-fr", "French");
    m.insert("it-it", "Italian");
    m.insert("ja-jp", "Japanese");
    m.insert("pt-br", "Brazilian Portuguese");
    m.insert("zh-cn", "Mandarin Chinese");
    m
});

/// Human-readable name for a language tag, or the tag itself when unknown
pub fn language_name(tag: &str) -> &str {
    let key = tag.to_lowercase();
    LANGUAGE_NAMES.get(key.as_str()).copied().unwrap_or(tag)
}
