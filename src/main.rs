mod app;
mod config;
mod upload;
mod utils;

use anyhow::anyhow;
use app::ClassifierApp;
use clap::Parser;
use config::Settings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Desktop client that previews an image and sends it to a classification service.
#[derive(Debug, Parser)]
#[command(name = "image-classifier-client", version)]
struct Cli {
    /// TOML config file (defaults to ./classifier.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Classification endpoint, overriding config and environment.
    #[arg(short, long)]
    endpoint: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref(), cli.endpoint)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size([400.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Image Classifier",
        options,
        Box::new(move |cc| Box::new(ClassifierApp::new(cc, &settings))),
    )
    .map_err(|e| anyhow!("application stopped with error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn parses_endpoint_and_config_flags() {
        let cli = Cli::try_parse_from([
            "image-classifier-client",
            "--endpoint",
            "http://127.0.0.1:9000/predict",
            "-c",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9000/predict"));
        assert_eq!(cli.config.unwrap().to_str(), Some("custom.toml"));
    }

    #[test]
    fn flags_are_optional() {
        let cli = Cli::try_parse_from(["image-classifier-client"]).unwrap();
        assert!(cli.endpoint.is_none());
        assert!(cli.config.is_none());
    }
}
