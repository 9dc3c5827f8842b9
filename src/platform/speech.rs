//! Speech synthesis boundary
//!
//! The host platform owns the actual synthesis engine. The core hands it a
//! finished [`Utterance`] and never waits for playback to complete.

use std::io::Write;

use thiserror::Error;

use crate::domain::voice::Voice;

/// Speech synthesis errors
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Speech platform unavailable: {0}")]
    Unavailable(String),
}

/// A single request to speak text
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// None selects the platform default voice
    pub voice: Option<Voice>,
    /// Gain in `[0.0, 1.0]`
    pub volume: f32,
}

/// A text-to-speech platform
pub trait SpeechSynthesizer {
    /// Voices the platform can currently speak with
    ///
    /// May be empty until the platform finishes loading.
    fn voices(&self) -> Vec<Voice>;

    /// Queues an utterance for playback and returns immediately
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;
}

/// Speech platform that writes each utterance as a transcript line
///
/// Used by the command-line front-end, which has no audio device of its own.
#[derive(Debug)]
pub struct TranscriptSynthesizer<W: Write> {
    out: W,
    voices: Vec<Voice>,
}

impl<W: Write> TranscriptSynthesizer<W> {
    pub fn new(out: W, voices: Vec<Voice>) -> Self {
        Self { out, voices }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TranscriptSynthesizer<std::io::Stdout> {
    /// Transcript synthesizer printing to stdout
    pub fn stdout(voices: Vec<Voice>) -> Self {
        Self::new(std::io::stdout(), voices)
    }
}

impl<W: Write> SpeechSynthesizer for TranscriptSynthesizer<W> {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let voice = utterance
            .voice
            .as_ref()
            .map(Voice::label)
            .unwrap_or_else(|| "platform default".to_string());

        writeln!(
            self.out,
            "[{} @ {:.0}%] {}",
            voice,
            utterance.volume * 100.0,
            utterance.text
        )?;
        self.out.flush()?;
        Ok(())
    }
}
