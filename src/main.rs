use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_lib_textdetect::config;
use rust_lib_textdetect::infrastructure::{AppContext, DesktopPicker, SystemClipboard, TerminalSurface};
use rust_lib_textdetect::models::ImageSource;
use rust_lib_textdetect::scanner::PipelineRun;

/// Scan a photo and show the text it contains
#[derive(Parser, Debug)]
#[command(name = "textdetect", version)]
struct Args {
    /// Take a photo with TEXTDETECT_CAMERA_COMMAND
    #[arg(long, conflicts_with = "photo")]
    camera: bool,

    /// Photo to scan (prompts for a path when omitted)
    photo: Option<PathBuf>,

    /// Dialog language, en or hr (default: TEXTDETECT_LOCALE or en)
    #[arg(long)]
    locale: Option<String>,
}

impl Args {
    fn source(&self) -> ImageSource {
        if self.camera {
            ImageSource::Camera
        } else {
            ImageSource::Library
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "textdetect=info,rust_lib_textdetect=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let source = args.source();

    let mut config = config::Config::from_env();
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if config.vision_api_key.is_none() {
        tracing::warn!("TEXTDETECT_VISION_API_KEY is not set, requests go out without a key");
    }

    let picker = Arc::new(DesktopPicker::new(
        config.camera_command.clone(),
        args.photo,
    ));
    let ctx = AppContext::new(config);
    let mut coordinator = ctx.coordinator(picker, Arc::new(TerminalSurface), Arc::new(SystemClipboard::new()));

    match coordinator.capture(source).await {
        PipelineRun::Failed(_) => std::process::exit(1),
        PipelineRun::Cancelled | PipelineRun::Presented { .. } => {}
    }
}
