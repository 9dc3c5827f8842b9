//! Command-line front-end
//!
//! Drives the controller through the same events a page would fire:
//! select an image, fill in the captions, generate, optionally narrate,
//! then export the surface.

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::Parser;

use meme_maker::platform::speech::TranscriptSynthesizer;
use meme_maker::{MemeConfig, MemeController, UiState};

#[derive(Parser, Debug)]
#[command(name = "meme-maker", version, about = "Caption an image and narrate it")]
struct Cli {
    /// Image to caption.
    #[arg(long, required_unless_present = "list_voices")]
    image: Option<PathBuf>,

    /// Top caption.
    #[arg(long, default_value = "")]
    top: String,

    /// Bottom caption.
    #[arg(long, default_value = "")]
    bottom: String,

    /// Output PNG path.
    #[arg(long, default_value = "meme.png")]
    out: PathBuf,

    /// Read the captions aloud after generating.
    #[arg(long)]
    narrate: bool,

    /// Narration volume, 0 to 100.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: Option<u8>,

    /// Voice name to narrate with (see --list-voices).
    #[arg(long)]
    voice: Option<String>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the available voices and exit.
    #[arg(long)]
    list_voices: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MemeConfig::load(path)
            .with_context(|| format!("load configuration '{}'", path.display()))?,
        None => MemeConfig::default(),
    };

    let speech = TranscriptSynthesizer::stdout(config.voices.clone());
    let mut controller = MemeController::new(config, speech).context("initialise controller")?;

    if cli.list_voices {
        for option in controller.voices().options() {
            println!("{}", option.label);
        }
        return Ok(());
    }

    let Some(image) = cli.image.as_deref() else {
        bail!("--image is required");
    };

    controller
        .select_image_file(image)
        .with_context(|| format!("load image '{}'", image.display()))?;

    controller.set_top_text(cli.top);
    controller.set_bottom_text(cli.bottom);
    if controller.submit_captions() != UiState::Captioned {
        log::warn!("Both captions are empty; exporting the image without text");
    }

    if cli.narrate {
        if let Some(level) = cli.volume {
            let icon = controller.set_volume(level);
            log::debug!("Volume icon {}", icon.asset_path());
        }
        controller.select_voice(cli.voice.as_deref());

        if controller.enablement().can_narrate {
            controller.narrate();
        } else {
            log::warn!("Nothing to narrate");
        }
    }

    controller
        .export_png(&cli.out)
        .with_context(|| format!("write '{}'", cli.out.display()))?;

    Ok(())
}
