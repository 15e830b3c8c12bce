//! # Digit Pad CLI
//!
//! Session shell and command-line front end for the pad.
//!
//! ## Usage
//!
//! ```bash
//! # Replay a recorded stroke script and write the PNG
//! digit-pad render --script strokes.json --out digit.png
//!
//! # Same, normalized to the 28x28 preview
//! digit-pad render --script strokes.json --size 28 --out preview.png
//!
//! # Classify a drawing
//! digit-pad --api-url http://localhost:8000 predict --script strokes.json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `StrokeScript` - Recorded surface + input events for headless replay
//! - `DigitPad` - Session owning the surface, exporter, client and visible state

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod script;
pub mod session;

pub use script::StrokeScript;
pub use session::{DigitPad, PadConfig, SessionError};

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use pad_client::ClientConfig;

/// Command-line arguments for digit-pad.
#[derive(Debug, Clone, Parser)]
#[command(name = "digit-pad")]
#[command(about = "Sketch a digit, export it, and ask a classifier what it is")]
#[command(version)]
pub struct CliArgs {
    /// Classification API base URL (e.g., <http://localhost:8000>)
    #[arg(long, global = true, env = "DIGIT_PAD_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    pub timeout_secs: u64,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay a stroke script and export the drawing as PNG
    Render {
        /// Stroke script (JSON)
        #[arg(long)]
        script: PathBuf,

        /// Export as a SIZE x SIZE square instead of the native resolution
        #[arg(long)]
        size: Option<u32>,

        /// Output file; prints a data URI when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Submit a drawing to the classifier and print the result
    Predict {
        /// Stroke script (JSON) to replay and submit
        #[arg(long, required_unless_present = "image", conflicts_with = "image")]
        script: Option<PathBuf>,

        /// Existing PNG to submit as-is
        #[arg(long)]
        image: Option<PathBuf>,

        /// Submit a SIZE x SIZE square instead of the native resolution
        #[arg(long, conflicts_with = "image")]
        size: Option<u32>,
    },

    /// Check that the classifier is up
    Health,
}

impl CliArgs {
    /// Client configuration: build-time defaults, then environment, then flags.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let config =
            ClientConfig::from_env().with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.api_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }
}
