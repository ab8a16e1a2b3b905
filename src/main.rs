// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand, ValueEnum};
use snapshot::app::AppModel;
use snapshot::backends::Facing;
use snapshot::constants::ui;
use snapshot::i18n;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "snapshot")]
#[command(about = "Take a photo or pick one from the gallery, then save it")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    Cameras,

    /// Take a photo
    Photo {
        /// Camera to use
        #[arg(short, long, value_enum, default_value_t = FacingArg::Back)]
        facing: FacingArg,

        /// Write the photo here instead of adding it to the gallery
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add an image file to the gallery
    Save {
        /// Image to save
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FacingArg {
    Front,
    Back,
}

impl From<FacingArg> for Facing {
    fn from(arg: FacingArg) -> Self {
        match arg {
            FacingArg::Front => Facing::Front,
            FacingArg::Back => Facing::Back,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=snapshot=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Cameras) => cli::list_cameras(),
        Some(Commands::Photo { facing, output }) => cli::take_photo(facing.into(), output),
        Some(Commands::Save { path }) => cli::save_image(&path),
        None => run_gui(),
    }
}

fn run_gui() -> Result<(), Box<dyn std::error::Error>> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(ui::MIN_WIDTH)
            .min_height(ui::MIN_HEIGHT),
    );

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
