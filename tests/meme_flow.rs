use std::io::Cursor;

use meme_maker::domain::voice::Voice;
use meme_maker::platform::speech::{SpeechError, SpeechSynthesizer, Utterance};
use meme_maker::ui::CaptionRenderer;
use meme_maker::{MemeConfig, MemeController, UiState};

#[derive(Default)]
struct RecordingSynthesizer {
    voices: Vec<Voice>,
    spoken: Vec<Utterance>,
    fail: bool,
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        if self.fail {
            return Err(SpeechError::Unavailable("no audio device".into()));
        }
        self.spoken.push(utterance.clone());
        Ok(())
    }
}

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn controller(speech: RecordingSynthesizer) -> MemeController<RecordingSynthesizer> {
    MemeController::with_renderer(MemeConfig::default(), speech, CaptionRenderer::new(None))
        .unwrap()
}

#[test]
fn load_generate_narrate_clear() {
    let mut controller = controller(RecordingSynthesizer {
        voices: vec![Voice::new("Alex", "en-US").with_default(true)],
        ..Default::default()
    });

    assert_eq!(
        controller.select_image_bytes(&png_bytes(30, 60, [0, 0, 255, 255])).unwrap(),
        UiState::ImageLoaded
    );
    // Portrait image: bars left and right
    assert_eq!(controller.surface().pixel_rgba(20, 200), Some([0, 0, 0, 255]));
    assert_eq!(controller.surface().pixel_rgba(200, 200), Some([0, 0, 255, 255]));

    // Blank submission changes nothing
    controller.set_top_text("   ");
    assert_eq!(controller.submit_captions(), UiState::ImageLoaded);

    controller.set_top_text("A");
    controller.set_bottom_text("B");
    assert_eq!(controller.submit_captions(), UiState::Captioned);

    controller.select_voice(Some("Alex"));
    controller.set_volume(100);
    assert_eq!(controller.narrate(), UiState::Captioned);
    assert_eq!(controller.speech().spoken.len(), 1);
    assert_eq!(controller.speech().spoken[0].text, "A, B");
    assert_eq!(controller.speech().spoken[0].volume, 1.0);

    assert_eq!(controller.clear(), UiState::Empty);
    assert!(controller.surface().is_blank());
    assert!(controller.captions().top.is_empty());
    assert!(controller.captions().bottom.is_empty());

    // Clearing again is idempotent
    assert_eq!(controller.clear(), UiState::Empty);
}

#[test]
fn new_image_replaces_captioned_meme() {
    let mut controller = controller(RecordingSynthesizer::default());
    controller.select_image_bytes(&png_bytes(60, 30, [255, 0, 0, 255])).unwrap();
    controller.set_top_text("first");
    controller.submit_captions();

    assert_eq!(
        controller.select_image_bytes(&png_bytes(60, 60, [0, 255, 0, 255])).unwrap(),
        UiState::ImageLoaded
    );
    assert_eq!(controller.surface().pixel_rgba(5, 5), Some([0, 255, 0, 255]));
    assert!(controller.enablement().can_generate);
    assert!(!controller.enablement().can_narrate);
}

#[test]
fn speech_failure_does_not_change_state() {
    let mut controller = controller(RecordingSynthesizer {
        fail: true,
        ..Default::default()
    });
    controller.select_image_bytes(&png_bytes(10, 10, [1, 2, 3, 255])).unwrap();
    controller.set_top_text("A");
    controller.submit_captions();

    assert_eq!(controller.narrate(), UiState::Captioned);
    assert!(controller.speech().spoken.is_empty());
}

#[test]
fn late_voice_report_notifies_subscribers() {
    let mut controller = controller(RecordingSynthesizer::default());
    assert!(controller.voices().voices().is_empty());

    let seen = std::rc::Rc::new(std::cell::Cell::new(0));
    let sink = std::rc::Rc::clone(&seen);
    controller
        .voices_mut()
        .subscribe(move |voices| sink.set(voices.len()));

    controller
        .voices_mut()
        .replace(vec![Voice::new("Late", "de-DE")]);
    assert_eq!(seen.get(), 1);
    assert_eq!(controller.voices().options()[0].label, "Late (de-DE)");
}

#[test]
fn exported_png_round_trips_dimensions() {
    let mut controller = controller(RecordingSynthesizer::default());
    controller.select_image_bytes(&png_bytes(80, 40, [200, 100, 50, 255])).unwrap();

    let path = std::env::temp_dir().join(format!("meme-maker-test-{}.png", std::process::id()));
    controller.export_png(&path).unwrap();

    let exported = image::open(&path).unwrap().to_rgba8();
    std::fs::remove_file(&path).ok();

    assert_eq!(exported.dimensions(), (400, 400));
    assert_eq!(exported.get_pixel(200, 50).0, [0, 0, 0, 255]);
    assert_eq!(exported.get_pixel(200, 200).0, [200, 100, 50, 255]);
}
