//! Voice catalog snapshot, menu ordering, and selection resolution

use crate::voice::VoiceDescriptor;
use log::debug;

/// Which voices the menu shows and which regional marker sorts first
#[derive(Debug, Clone)]
pub struct LanguageFilter {
    /// Lowercase language-tag prefixes that pass the filter
    prefixes: Vec<String>,

    /// Lowercase regional marker; tags containing it sort before the rest
    preferred_marker: String,
}

impl LanguageFilter {
    pub fn new<I, S>(prefixes: I, preferred_marker: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
            preferred_marker: preferred_marker.to_lowercase(),
        }
    }

    /// Does this voice's language tag pass the filter?
    pub fn matches(&self, voice: &VoiceDescriptor) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| voice.language_starts_with(prefix))
    }

    /// Does this voice carry the preferred regional marker?
    pub fn prefers(&self, voice: &VoiceDescriptor) -> bool {
        !self.preferred_marker.is_empty() && voice.language_contains(&self.preferred_marker)
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for LanguageFilter {
    /// US and UK English voices, US first
    fn default() -> Self {
        Self::new(["en-us", "en-gb"], "us")
    }
}

/// Snapshot of all voices currently known to the host
///
/// Starts empty at startup and is replaced wholesale on every refresh.
/// Emptiness is a valid transient state while the host is still
/// enumerating, not an error.
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    voices: Vec<VoiceDescriptor>,
}

impl VoiceCatalog {
    pub fn new(voices: Vec<VoiceDescriptor>) -> Self {
        Self { voices }
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// All voices in the order the host supplied them
    pub fn voices(&self) -> &[VoiceDescriptor] {
        &self.voices
    }

    /// Look up a voice by its stable identifier
    pub fn find_by_uri(&self, uri: &str) -> Option<&VoiceDescriptor> {
        self.voices.iter().find(|v| v.uri == uri)
    }

    /// Filter to the criterion and impose the menu order
    ///
    /// Keeps exactly the voices whose language tag passes the filter.
    /// Primary sort key: presence of the preferred regional marker
    /// (matching voices first). Secondary key: case-insensitive name.
    /// The sort is stable, so equal-key voices keep their catalog order
    /// across repeated calls.
    pub fn filter_and_sort(&self, filter: &LanguageFilter) -> Vec<VoiceDescriptor> {
        let mut menu: Vec<VoiceDescriptor> = self
            .voices
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect();

        menu.sort_by(|a, b| {
            filter
                .prefers(b)
                .cmp(&filter.prefers(a))
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        menu
    }

    /// Resolve the voice to use for the given explicit choice
    ///
    /// Resolution order:
    /// 1. the catalog voice whose uri matches `explicit_uri` (if non-empty)
    /// 2. the first voice whose language tag starts with "en-us"
    /// 3. the first voice whose language tag starts with "en-gb"
    /// 4. the first voice in catalog order
    /// 5. `None` when the catalog is empty
    ///
    /// A non-empty `explicit_uri` that matches nothing is stale and falls
    /// through to the language fallbacks.
    pub fn resolve_selected(&self, explicit_uri: &str) -> Option<&VoiceDescriptor> {
        if !explicit_uri.is_empty() {
            if let Some(voice) = self.find_by_uri(explicit_uri) {
                return Some(voice);
            }
            debug!("Selected voice {} not in catalog, falling back", explicit_uri);
        }

        self.voices
            .iter()
            .find(|v| v.language_starts_with("en-us"))
            .or_else(|| self.voices.iter().find(|v| v.language_starts_with("en-gb")))
            .or_else(|| self.voices.first())
    }
}
