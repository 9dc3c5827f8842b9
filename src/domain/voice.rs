//! Voice list handling
//!
//! The speech platform reports its voices late and may report them more
//! than once. `VoiceCatalog` holds the currently resolved list, exposes it
//! as selectable options and notifies subscribers whenever it changes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of the option shown before the platform has reported any voices
pub const PLACEHOLDER_LABEL: &str = "No available voice options";

/// A synthesis voice as reported by the speech platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            is_default: false,
        }
    }

    /// Marks this voice as the platform default
    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Display label, e.g. `Alex (en-US) -- DEFAULT`
    pub fn label(&self) -> String {
        let mut label = format!("{} ({})", self.name, self.lang);
        if self.is_default {
            label.push_str(" -- DEFAULT");
        }
        label
    }
}

/// One entry of the voice selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceOption {
    pub label: String,
    /// Voice name this option selects; None for the placeholder
    pub name: Option<String>,
    pub lang: Option<String>,
}

impl From<&Voice> for VoiceOption {
    fn from(voice: &Voice) -> Self {
        Self {
            label: voice.label(),
            name: Some(voice.name.clone()),
            lang: Some(voice.lang.clone()),
        }
    }
}

/// Handle returned by [`VoiceCatalog::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Voice])>;

/// Observable list of available voices
pub struct VoiceCatalog {
    voices: Vec<Voice>,
    populated: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl VoiceCatalog {
    /// Creates an unpopulated catalog showing only the placeholder
    pub fn new() -> Self {
        Self {
            voices: Vec::new(),
            populated: false,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Currently resolved voices
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Whether the selector should accept input
    ///
    /// The selector stays disabled until the platform reports at least once,
    /// even if that report is empty.
    pub fn is_enabled(&self) -> bool {
        self.populated
    }

    /// Options to render in the selector
    pub fn options(&self) -> Vec<VoiceOption> {
        if !self.populated {
            return vec![VoiceOption {
                label: PLACEHOLDER_LABEL.to_string(),
                name: None,
                lang: None,
            }];
        }
        self.voices.iter().map(VoiceOption::from).collect()
    }

    /// Replaces the list with a fresh platform report and notifies subscribers
    pub fn replace(&mut self, voices: Vec<Voice>) {
        log::debug!("Voice catalog refreshed with {} voices", voices.len());
        self.voices = voices;
        self.populated = true;

        for (_, listener) in &mut self.listeners {
            listener(&self.voices);
        }
    }

    /// Registers a listener called after every refresh
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[Voice]) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Looks `name` up in the current list, see [`resolve_voice`]
    pub fn resolve(&self, name: Option<&str>) -> Option<Voice> {
        resolve_voice(&self.voices, name)
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VoiceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceCatalog")
            .field("voices", &self.voices)
            .field("populated", &self.populated)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Finds the voice called `name` in `voices`
///
/// Returns None when nothing is selected or nothing matches, which means the
/// platform default voice is used. When several voices share a name the last
/// one wins.
pub fn resolve_voice(voices: &[Voice], name: Option<&str>) -> Option<Voice> {
    let name = name?;
    voices.iter().rev().find(|voice| voice.name == name).cloned()
}
