//! Top and bottom caption text

/// Separator placed between the two captions when they are read aloud
pub const NARRATION_SEPARATOR: &str = ", ";

/// The two caption strings overlaid on the image
///
/// Both fields are edited independently by form input and always cleared
/// together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionPair {
    pub top: String,
    pub bottom: String,
}

impl CaptionPair {
    /// Creates a caption pair
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// True when neither caption has any non-whitespace content
    pub fn is_blank(&self) -> bool {
        self.top.trim().is_empty() && self.bottom.trim().is_empty()
    }

    /// Empties both captions
    pub fn clear(&mut self) {
        self.top.clear();
        self.bottom.clear();
    }

    /// Text handed to speech synthesis
    pub fn narration_text(&self) -> String {
        format!("{}{}{}", self.top, NARRATION_SEPARATOR, self.bottom)
    }
}
