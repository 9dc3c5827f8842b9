//! Application state management
//!
//! Defines the UI state machine as a pure reducer: given the current state
//! and an event it returns the next state plus the side effects the
//! controller must perform. Nothing in here touches the surface or the
//! speech platform directly.

use crate::domain::caption::CaptionPair;
use crate::domain::core::{Placement, Size};
use crate::domain::layout::fit;
use crate::domain::voice::Voice;
use crate::domain::volume::VolumeLevel;
use crate::platform::speech::Utterance;

/// Which stage of the load → generate → narrate flow the user is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    /// Nothing loaded; only image selection is possible
    #[default]
    Empty,
    /// An image is on the surface and captions can be generated
    ImageLoaded,
    /// Captions are drawn; the meme can be narrated or cleared
    Captioned,
}

impl UiState {
    /// Which actions are currently permitted
    pub fn enablement(self) -> Enablement {
        match self {
            UiState::Empty => Enablement {
                can_generate: false,
                can_clear: false,
                can_narrate: false,
            },
            UiState::ImageLoaded => Enablement {
                can_generate: true,
                can_clear: true,
                can_narrate: false,
            },
            UiState::Captioned => Enablement {
                can_generate: false,
                can_clear: true,
                can_narrate: true,
            },
        }
    }
}

/// Enabled flags for the generate, clear and narrate controls
///
/// Loading an image is always allowed and so has no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enablement {
    pub can_generate: bool,
    pub can_clear: bool,
    pub can_narrate: bool,
}

/// Everything narration needs, resolved by the caller at narrate time
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationRequest {
    pub captions: CaptionPair,
    /// None selects the platform default voice
    pub voice: Option<Voice>,
    pub volume: VolumeLevel,
}

/// Discrete user-triggered events
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    /// A new image finished decoding; carries its natural size
    ImageSelected(Size),
    /// The caption form was submitted with these values
    GenerateSubmitted(CaptionPair),
    /// The clear control was activated
    ClearRequested,
    /// The narrate control was activated
    NarrateRequested(NarrationRequest),
}

/// Side effects requested by a transition, applied in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Reset every surface pixel to transparent
    ClearSurface,
    /// Paint the configured background over the whole surface
    FillBackground,
    /// Draw the pending image at this placement
    DrawImage(Placement),
    /// Render both captions onto the surface
    DrawCaptions(CaptionPair),
    /// Empty both caption input fields
    ResetCaptions,
    /// Hand an utterance to the speech platform without waiting
    Speak(Utterance),
}

/// Result of processing one event
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: UiState,
    pub effects: Vec<Effect>,
}

impl Transition {
    /// A transition that changes nothing
    pub fn unchanged(state: UiState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    /// True if the event was ignored
    pub fn is_noop(&self, previous: UiState) -> bool {
        self.state == previous && self.effects.is_empty()
    }
}

/// State machine for UI state transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes an event and returns the next state with its effects
    ///
    /// # Arguments
    /// * `current_state` - State before the event
    /// * `event` - Event to process
    /// * `canvas` - Fixed surface size used for image placement
    ///
    /// Events that are not valid in `current_state` are ignored.
    pub fn process_event(current_state: UiState, event: &StateEvent, canvas: Size) -> Transition {
        match (current_state, event) {
            // Any state: a freshly decoded image replaces whatever was shown
            (_, StateEvent::ImageSelected(image)) => match fit(canvas, *image) {
                Ok(placement) => {
                    log::debug!("STATE MACHINE: {:?} -> ImageLoaded", current_state);
                    Transition {
                        state: UiState::ImageLoaded,
                        effects: vec![
                            Effect::ClearSurface,
                            Effect::FillBackground,
                            Effect::DrawImage(placement),
                        ],
                    }
                }
                Err(e) => {
                    log::warn!("Ignoring selected image: {}", e);
                    Transition::unchanged(current_state)
                }
            },

            (UiState::ImageLoaded, StateEvent::GenerateSubmitted(captions)) => {
                if captions.is_blank() {
                    return Transition::unchanged(current_state);
                }
                log::debug!("STATE MACHINE: ImageLoaded -> Captioned");
                Transition {
                    state: UiState::Captioned,
                    effects: vec![Effect::DrawCaptions(captions.clone())],
                }
            }

            (UiState::ImageLoaded | UiState::Captioned, StateEvent::ClearRequested) => {
                log::debug!("STATE MACHINE: {:?} -> Empty", current_state);
                Transition {
                    state: UiState::Empty,
                    effects: vec![Effect::ResetCaptions, Effect::ClearSurface],
                }
            }

            (UiState::Captioned, StateEvent::NarrateRequested(request)) => Transition {
                state: UiState::Captioned,
                effects: vec![Effect::Speak(Utterance {
                    text: request.captions.narration_text(),
                    voice: request.voice.clone(),
                    volume: request.volume.gain(),
                })],
            },

            // Invalid transitions - ignore event
            (state, _) => Transition::unchanged(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CANVAS: Size = Size { w: 400, h: 400 };

    fn narrate(top: &str, bottom: &str) -> StateEvent {
        StateEvent::NarrateRequested(NarrationRequest {
            captions: CaptionPair::new(top, bottom),
            voice: None,
            volume: VolumeLevel::default(),
        })
    }

    fn generate(top: &str, bottom: &str) -> StateEvent {
        StateEvent::GenerateSubmitted(CaptionPair::new(top, bottom))
    }

    #[test]
    fn default_state_is_empty() {
        assert_eq!(UiState::default(), UiState::Empty);
    }

    #[test]
    fn enablement_table() {
        let flags = |s: UiState| {
            let e = s.enablement();
            (e.can_generate, e.can_clear, e.can_narrate)
        };
        assert_eq!(flags(UiState::Empty), (false, false, false));
        assert_eq!(flags(UiState::ImageLoaded), (true, true, false));
        assert_eq!(flags(UiState::Captioned), (false, true, true));
    }

    #[test]
    fn image_selection_loads_from_every_state() {
        for state in [UiState::Empty, UiState::ImageLoaded, UiState::Captioned] {
            let t = StateMachine::process_event(
                state,
                &StateEvent::ImageSelected(Size::new(800, 400)),
                CANVAS,
            );
            assert_eq!(t.state, UiState::ImageLoaded);
            assert_eq!(
                t.effects,
                vec![
                    Effect::ClearSurface,
                    Effect::FillBackground,
                    Effect::DrawImage(Placement::new(400.0, 200.0, 0.0, 100.0)),
                ]
            );
        }
    }

    #[test]
    fn zero_sized_image_is_ignored() {
        let t = StateMachine::process_event(
            UiState::Captioned,
            &StateEvent::ImageSelected(Size::new(640, 0)),
            CANVAS,
        );
        assert!(t.is_noop(UiState::Captioned));
    }

    #[test]
    fn generate_from_empty_is_noop() {
        let t = StateMachine::process_event(UiState::Empty, &generate("A", "B"), CANVAS);
        assert!(t.is_noop(UiState::Empty));
    }

    #[test]
    fn generate_with_blank_captions_is_noop() {
        for (top, bottom) in [("", ""), ("  ", "\t")] {
            let t = StateMachine::process_event(UiState::ImageLoaded, &generate(top, bottom), CANVAS);
            assert!(t.is_noop(UiState::ImageLoaded));
        }
    }

    #[test]
    fn generate_with_top_caption_draws_text() {
        let t = StateMachine::process_event(UiState::ImageLoaded, &generate("A", ""), CANVAS);
        assert_eq!(t.state, UiState::Captioned);
        assert_eq!(t.effects, vec![Effect::DrawCaptions(CaptionPair::new("A", ""))]);
    }

    #[test]
    fn generate_again_after_captioned_is_noop() {
        let t = StateMachine::process_event(UiState::Captioned, &generate("A", "B"), CANVAS);
        assert!(t.is_noop(UiState::Captioned));
    }

    #[test]
    fn clear_from_captioned_returns_to_empty() {
        let t = StateMachine::process_event(UiState::Captioned, &StateEvent::ClearRequested, CANVAS);
        assert_eq!(t.state, UiState::Empty);
        assert_eq!(t.effects, vec![Effect::ResetCaptions, Effect::ClearSurface]);
    }

    #[test]
    fn clear_from_image_loaded_returns_to_empty() {
        let t =
            StateMachine::process_event(UiState::ImageLoaded, &StateEvent::ClearRequested, CANVAS);
        assert_eq!(t.state, UiState::Empty);
    }

    #[test]
    fn repeated_clear_from_empty_has_no_effect() {
        let mut state = UiState::Empty;
        for _ in 0..3 {
            let t = StateMachine::process_event(state, &StateEvent::ClearRequested, CANVAS);
            assert!(t.is_noop(state));
            state = t.state;
        }
    }

    #[test]
    fn narrate_outside_captioned_is_noop() {
        for state in [UiState::Empty, UiState::ImageLoaded] {
            let t = StateMachine::process_event(state, &narrate("A", "B"), CANVAS);
            assert!(t.is_noop(state));
        }
    }

    #[test]
    fn narrate_speaks_joined_captions() {
        let event = StateEvent::NarrateRequested(NarrationRequest {
            captions: CaptionPair::new("one does not simply", "narrate a meme"),
            voice: Some(Voice::new("Alex", "en-US")),
            volume: VolumeLevel::new(50),
        });

        let t = StateMachine::process_event(UiState::Captioned, &event, CANVAS);
        assert_eq!(t.state, UiState::Captioned);
        assert_eq!(
            t.effects,
            vec![Effect::Speak(Utterance {
                text: "one does not simply, narrate a meme".into(),
                voice: Some(Voice::new("Alex", "en-US")),
                volume: 0.5,
            })]
        );
    }
}
