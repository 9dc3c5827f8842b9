//! Application controller and coordination layer
//!
//! The controller owns the drawing surface, the caption form, the voice
//! catalog, the volume slider and the speech platform. It turns user
//! actions into state machine events and applies the resulting effects.

use std::path::Path;

use tiny_skia::Color;

use crate::app::state::{
    Effect, Enablement, NarrationRequest, StateEvent, StateMachine, Transition, UiState,
};
use crate::config::{ConfigError, MemeConfig};
use crate::domain::caption::CaptionPair;
use crate::domain::core::Size;
use crate::domain::voice::VoiceCatalog;
use crate::domain::volume::{VolumeIcon, VolumeLevel};
use crate::platform::decode::{self, DecodeError, SourceImage};
use crate::platform::speech::{SpeechSynthesizer, Utterance};
use crate::ui::renderer::{CaptionLayout, CaptionRenderer};
use crate::ui::surface::{DrawingSurface, SurfaceError, color_from_rgba};

/// Application errors that can occur during controller operations
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Image error: {0}")]
    Decode(#[from] DecodeError),
}

/// Main application controller
///
/// Single-threaded: every method runs to completion on the caller's event
/// loop. Speech is handed off and never awaited.
pub struct MemeController<S: SpeechSynthesizer> {
    config: MemeConfig,
    state: UiState,
    captions: CaptionPair,
    surface: DrawingSurface,
    renderer: CaptionRenderer,
    /// Image waiting for its `ImageSelected` effects to be applied
    pending_image: Option<SourceImage>,
    voices: VoiceCatalog,
    selected_voice: Option<String>,
    volume: VolumeLevel,
    speech: S,
}

impl<S: SpeechSynthesizer> MemeController<S> {
    /// Creates a controller, locating a caption font from the configuration
    pub fn new(config: MemeConfig, speech: S) -> Result<Self, AppError> {
        let renderer = CaptionRenderer::load(&config.caption.font_candidates());
        Self::with_renderer(config, speech, renderer)
    }

    /// Creates a controller with an explicit caption renderer
    pub fn with_renderer(
        mut config: MemeConfig,
        speech: S,
        renderer: CaptionRenderer,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let surface = DrawingSurface::new(config.canvas_size())?;
        let volume = VolumeLevel::new(config.default_volume);

        let mut controller = Self {
            config,
            state: UiState::default(),
            captions: CaptionPair::default(),
            surface,
            renderer,
            pending_image: None,
            voices: VoiceCatalog::new(),
            selected_voice: None,
            volume,
            speech,
        };

        // The platform may already know its voices; it reports again later if not
        controller.refresh_voices();

        log::info!(
            "Controller ready with a {}x{} canvas",
            controller.config.canvas_width,
            controller.config.canvas_height
        );
        Ok(controller)
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn enablement(&self) -> Enablement {
        self.state.enablement()
    }

    pub fn config(&self) -> &MemeConfig {
        &self.config
    }

    pub fn canvas_size(&self) -> Size {
        self.surface.size()
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn captions(&self) -> &CaptionPair {
        &self.captions
    }

    pub fn set_top_text(&mut self, text: impl Into<String>) {
        self.captions.top = text.into();
    }

    pub fn set_bottom_text(&mut self, text: impl Into<String>) {
        self.captions.bottom = text.into();
    }

    pub fn volume(&self) -> VolumeLevel {
        self.volume
    }

    /// Moves the volume slider and returns the icon to display
    pub fn set_volume(&mut self, level: u8) -> VolumeIcon {
        self.volume = VolumeLevel::new(level);
        self.volume.icon()
    }

    pub fn voices(&self) -> &VoiceCatalog {
        &self.voices
    }

    /// Mutable access for subscribing to voice list changes
    pub fn voices_mut(&mut self) -> &mut VoiceCatalog {
        &mut self.voices
    }

    /// Pulls the current voice list from the speech platform
    ///
    /// Call again whenever the platform signals that its voices changed.
    pub fn refresh_voices(&mut self) {
        self.voices.replace(self.speech.voices());
    }

    /// Chooses a voice by name; None reverts to the platform default
    pub fn select_voice(&mut self, name: Option<&str>) {
        self.selected_voice = name.map(str::to_string);
    }

    pub fn selected_voice(&self) -> Option<&str> {
        self.selected_voice.as_deref()
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    /// Decodes image bytes and loads the result onto the surface
    ///
    /// A decode failure leaves the state untouched.
    pub fn select_image_bytes(&mut self, bytes: &[u8]) -> Result<UiState, AppError> {
        let image = decode::decode_image(bytes)?;
        Ok(self.image_selected(image))
    }

    /// Reads, decodes and loads an image file
    pub fn select_image_file(&mut self, path: &Path) -> Result<UiState, AppError> {
        let image = decode::load_image(path)?;
        log::info!("Selected image {}", path.display());
        Ok(self.image_selected(image))
    }

    /// Loads an already decoded image
    pub fn image_selected(&mut self, image: SourceImage) -> UiState {
        let size = image.natural_size();
        self.pending_image = Some(image);
        let state = self.dispatch(StateEvent::ImageSelected(size));
        self.pending_image = None;
        state
    }

    /// Submits the caption form
    pub fn submit_captions(&mut self) -> UiState {
        self.dispatch(StateEvent::GenerateSubmitted(self.captions.clone()))
    }

    /// Clears the captions and the surface
    pub fn clear(&mut self) -> UiState {
        self.dispatch(StateEvent::ClearRequested)
    }

    /// Reads the captions aloud with the selected voice and volume
    pub fn narrate(&mut self) -> UiState {
        let request = NarrationRequest {
            captions: self.captions.clone(),
            voice: self.voices.resolve(self.selected_voice.as_deref()),
            volume: self.volume,
        };
        self.dispatch(StateEvent::NarrateRequested(request))
    }

    /// Writes the current surface to a PNG file
    pub fn export_png(&self, path: &Path) -> Result<(), AppError> {
        self.surface.save_png(path)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }

    /// Processes a state event and applies its effects
    pub fn dispatch(&mut self, event: StateEvent) -> UiState {
        let previous = self.state;
        let transition = StateMachine::process_event(previous, &event, self.surface.size());

        if transition.is_noop(previous) {
            log::debug!("Event ignored in state {:?}: {:?}", previous, event);
            return previous;
        }

        self.apply(transition)
    }

    fn apply(&mut self, transition: Transition) -> UiState {
        let Transition { state, effects } = transition;
        for effect in effects {
            match effect {
                Effect::ClearSurface => self.surface.clear(),
                Effect::FillBackground => {
                    let background: Color = color_from_rgba(self.config.background);
                    self.surface.fill_background(background);
                }
                Effect::DrawImage(placement) => match &self.pending_image {
                    Some(image) => self.surface.draw_image(image, &placement),
                    None => log::warn!("Image placement computed without a pending image"),
                },
                Effect::DrawCaptions(captions) => self.draw_captions(&captions),
                Effect::ResetCaptions => self.captions.clear(),
                Effect::Speak(utterance) => self.speak(&utterance),
            }
        }

        if state != self.state {
            log::info!("UI state {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        state
    }

    fn draw_captions(&mut self, captions: &CaptionPair) {
        let layout =
            CaptionLayout::from_captions(captions, self.surface.size(), &self.config.caption);
        if let Err(e) = self.renderer.render(self.surface.pixmap_mut(), &layout) {
            log::warn!("Captions not drawn: {}", e);
        }
    }

    fn speak(&mut self, utterance: &Utterance) {
        log::info!(
            "Narrating {:?} with {} at volume {:.2}",
            utterance.text,
            utterance
                .voice
                .as_ref()
                .map(|v| v.name.as_str())
                .unwrap_or("the default voice"),
            utterance.volume
        );
        if let Err(e) = self.speech.speak(utterance) {
            log::warn!("Narration failed: {}", e);
        }
    }
}
