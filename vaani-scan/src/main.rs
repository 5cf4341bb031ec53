//! vaani-scan - identify a banknote image from the command line
//!
//! Headless front end over the same scan pipeline the TUI drives: capture
//! from a still image, identify, optionally announce aloud, print the
//! denomination.

use clap::Parser;

use libvaani::capture::{FrameSource, StillFrameSource};
use libvaani::config::Config;
use libvaani::logging::{LogFormat, LoggingConfig};
use libvaani::service::{AnnounceTuning, VaaniService};
use libvaani::types::AppLanguage;
use libvaani::{Result, VaaniError};

#[derive(Parser, Debug)]
#[command(name = "vaani-scan")]
#[command(about = "Identify a banknote image and print its denomination", long_about = None)]
struct Cli {
    /// Path to the banknote image (JPEG)
    image: String,

    /// Announcement language (english, hindi, tamil, telugu, bengali);
    /// defaults to the stored preference
    #[arg(short, long)]
    language: Option<String>,

    /// Speak the result aloud
    #[arg(short, long)]
    speak: bool,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "error" };
    LoggingConfig::new(LogFormat::Text, level.to_string()).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.format.as_str();
    if format != "text" && format != "json" {
        return Err(VaaniError::InvalidInput(format!(
            "unknown output format '{}': expected text or json",
            format
        )));
    }

    let service = VaaniService::with_config(Config::load()?).await?;

    let language = match &cli.language {
        Some(raw) => raw
            .parse::<AppLanguage>()
            .map_err(VaaniError::InvalidInput)?,
        None => service.load_preferences().await.language,
    };

    // Capture: acquire, grab one frame, release on every path
    let mut source = StillFrameSource::from_path(cli.image.clone());
    source.open().await?;
    let image = match source.capture().await {
        Ok(image) => {
            source.release().await;
            image
        }
        Err(e) => {
            source.release().await;
            return Err(e);
        }
    };

    let response = service.scan(&image).await?;

    if cli.speak {
        service
            .announce_result(&response.result.label, language, AnnounceTuning::default())
            .await;
    }

    match format {
        "json" => {
            let output = serde_json::json!({
                "scan_id": response.scan_id,
                "label": response.result.label,
                "language": language.to_string(),
                "identified_at": response.result.identified_at,
            });
            println!("{}", output);
        }
        _ => {
            println!("{}", response.result.label);
        }
    }

    Ok(())
}
