//! # Digit Pad Client
//!
//! HTTP client for the classification service that sits behind the pad.
//!
//! ```no_run
//! use pad_client::{ClassifierClient, ClientConfig};
//! # async fn run(image: pad_core::EncodedImage) -> Result<(), pad_client::ClassifyError> {
//! let client = ClassifierClient::new(&ClientConfig::from_env())?;
//! let prediction = client.predict(&image).await?;
//! println!("{prediction}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classifier;
pub mod config;

pub use classifier::{ClassifierClient, ClassifyError, UPLOAD_FIELD, UPLOAD_FILE_NAME};
pub use config::{ClientConfig, API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT};
