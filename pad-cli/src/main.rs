//! # Digit Pad
//!
//! Command-line front end for the digit sketch pad.

use std::path::Path;

use clap::Parser;
use pad_cli::{CliArgs, Command, DigitPad, PadConfig, StrokeScript};
use pad_client::ClassifierClient;
use pad_core::{PadState, RequestStatus};
use pad_renderer::image::{encoded_from_png, to_data_uri};
use pad_renderer::{ExportTarget, RasterExporter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: `warn,pad_cli=info`).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,pad_cli=info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let client = args.client_config();

    match args.command {
        Command::Render { script, size, out } => render(&script, size, out.as_deref()),
        Command::Predict {
            script,
            image,
            size,
        } => {
            let mut config = PadConfig {
                submit_target: ExportTarget::from(size),
                client,
                ..PadConfig::default()
            };

            let state = if let Some(path) = image {
                submit_image(&path, &config).await?
            } else if let Some(path) = script {
                let script = StrokeScript::load(&path)?;
                config.width = script.width;
                config.height = script.height;
                predict_script(&script, &config).await?
            } else {
                anyhow::bail!("either --script or --image is required");
            };

            println!("{}", state.summary());
            if state.status() == RequestStatus::Failed {
                anyhow::bail!("prediction failed");
            }
            Ok(())
        }
        Command::Health => {
            let client = ClassifierClient::new(&client)?;
            if client.health().await? {
                println!("ok");
                Ok(())
            } else {
                anyhow::bail!("classifier reported unhealthy")
            }
        }
    }
}

/// Replay a script and write (or print) the exported PNG.
fn render(script: &Path, size: Option<u32>, out: Option<&Path>) -> anyhow::Result<()> {
    let script = StrokeScript::load(script)?;
    let surface = script.render()?;
    let encoded = RasterExporter::with_defaults().export(&surface, ExportTarget::from(size))?;

    match out {
        Some(path) => {
            std::fs::write(path, encoded.bytes())
                .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
            tracing::info!(
                "Wrote {}x{} PNG to {}",
                encoded.width(),
                encoded.height(),
                path.display()
            );
        }
        None => println!("{}", to_data_uri(&encoded)),
    }
    Ok(())
}

/// Submit an existing PNG file as-is.
async fn submit_image(path: &Path, config: &PadConfig) -> anyhow::Result<PadState> {
    let bytes = std::fs::read(path).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    let encoded = encoded_from_png(bytes)?;
    let mut pad = DigitPad::new(config)?;
    let state = pad.submit(&encoded).await.clone();
    Ok(state)
}

/// Replay a script on a fresh session and classify the drawing.
async fn predict_script(script: &StrokeScript, config: &PadConfig) -> anyhow::Result<PadState> {
    let mut pad = DigitPad::new(config)?;
    pad.set_bounds(script.bounds()?);
    pad.replay(&script.events);
    tracing::info!(
        "Replayed {} events, submitting {:?}",
        script.events.len(),
        pad.submit_target()
    );
    let state = pad.predict().await.clone();
    Ok(state)
}
