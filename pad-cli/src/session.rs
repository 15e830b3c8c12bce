//! The pad session: one surface, one exporter, one client, one visible state.
//!
//! The session owns every piece directly; nothing looks the surface up at
//! runtime.

use pad_client::{ClassifierClient, ClassifyError, ClientConfig};
use pad_core::{
    EncodedImage, InputEvent, PadError, PadState, SurfaceBounds, Transition, NATIVE_SIZE,
};
use pad_renderer::{ExportTarget, RasterExporter, RenderError, StrokeSurface};
use thiserror::Error;

/// Errors raised while setting up or driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Surface creation or export failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The classifier client could not be built.
    #[error(transparent)]
    Client(#[from] ClassifyError),
    /// A script or surface description was invalid.
    #[error(transparent)]
    Script(#[from] PadError),
    /// A file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// Offending path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct PadConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Resolution of the image submitted for classification.
    pub submit_target: ExportTarget,
    /// Classification service settings.
    pub client: ClientConfig,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            width: NATIVE_SIZE,
            height: NATIVE_SIZE,
            submit_target: ExportTarget::Native,
            client: ClientConfig::default(),
        }
    }
}

/// A drawing session wired to a classification service.
#[derive(Debug)]
pub struct DigitPad {
    surface: StrokeSurface,
    exporter: RasterExporter,
    client: ClassifierClient,
    state: PadState,
    submit_target: ExportTarget,
}

impl DigitPad {
    /// Create a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be allocated or the client
    /// configuration is invalid.
    pub fn new(config: &PadConfig) -> Result<Self, SessionError> {
        let surface = StrokeSurface::new(config.width, config.height)?;
        let client = ClassifierClient::new(&config.client)?;
        tracing::info!(
            "Pad session ready: {}x{} surface, submitting {:?} to {}",
            config.width,
            config.height,
            config.submit_target,
            client.predict_url()
        );
        Ok(Self {
            surface,
            exporter: RasterExporter::with_defaults(),
            client,
            state: PadState::new(),
            submit_target: config.submit_target,
        })
    }

    /// Update where the surface sits on screen.
    pub fn set_bounds(&mut self, bounds: SurfaceBounds) {
        self.surface.set_bounds(bounds);
    }

    /// Forward one input event to the surface.
    pub fn handle_event(&mut self, event: &InputEvent) -> Transition {
        self.surface.handle_event(event)
    }

    /// Forward a sequence of input events.
    pub fn replay<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.surface.handle_event(event);
        }
    }

    /// Wipe the drawing and the visible result.
    pub fn clear(&mut self) {
        self.surface.reset();
        self.state.clear();
    }

    /// Start a new classification attempt by exporting the surface.
    ///
    /// The visible result is cleared before the export runs.
    ///
    /// # Errors
    ///
    /// Returns the export error; the state then shows it as a failure.
    pub fn begin_export(&mut self) -> Result<EncodedImage, RenderError> {
        self.state.begin_request();
        let exported = self.exporter.export(&self.surface, self.submit_target);
        if let Err(e) = &exported {
            self.state.fail(e.to_string());
        }
        exported
    }

    /// Submit an image and record the outcome in the visible state.
    pub async fn submit(&mut self, image: &EncodedImage) -> &PadState {
        self.state.begin_request();
        match self.client.predict(image).await {
            Ok(prediction) => self.state.complete(prediction),
            Err(e) => self.state.fail(e.to_string()),
        }
        &self.state
    }

    /// Export the surface and submit it.
    pub async fn predict(&mut self) -> &PadState {
        match self.begin_export() {
            Ok(image) => self.submit(&image).await,
            Err(_) => &self.state,
        }
    }

    /// Probe the classification service.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or unhealthy.
    pub async fn health(&self) -> Result<bool, ClassifyError> {
        self.client.health().await
    }

    /// The drawing surface.
    #[must_use]
    pub fn surface(&self) -> &StrokeSurface {
        &self.surface
    }

    /// The visible result state.
    #[must_use]
    pub fn state(&self) -> &PadState {
        &self.state
    }

    /// Resolution used for submissions.
    #[must_use]
    pub fn submit_target(&self) -> ExportTarget {
        self.submit_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pad_core::{MousePhase, RequestStatus};

    fn offline_pad() -> DigitPad {
        DigitPad::new(&PadConfig::default()).expect("pad")
    }

    #[test]
    fn begin_export_clears_state_and_exports_native() {
        let mut pad = offline_pad();
        let image = pad.begin_export().unwrap();
        assert_eq!((image.width(), image.height()), (196, 196));
        assert_eq!(pad.state().status(), RequestStatus::Loading);
    }

    #[test]
    fn clear_resets_surface() {
        let mut pad = offline_pad();
        pad.handle_event(&InputEvent::mouse(MousePhase::Down, 20.0, 20.0));
        pad.handle_event(&InputEvent::mouse(MousePhase::Move, 80.0, 20.0));
        assert_eq!(pad.surface().pixel(50, 20), Some([255, 255, 255, 255]));
        pad.clear();
        assert_eq!(pad.surface().pixel(50, 20), Some([0, 0, 0, 255]));
        assert_eq!(pad.state().status(), RequestStatus::Idle);
    }

    #[test]
    fn invalid_surface_fails_setup() {
        let config = PadConfig {
            width: 0,
            ..PadConfig::default()
        };
        assert!(matches!(
            DigitPad::new(&config),
            Err(SessionError::Render(RenderError::SurfaceInit(_)))
        ));
    }

    #[test]
    fn invalid_url_fails_setup() {
        let config = PadConfig {
            client: ClientConfig::default().with_base_url("nope"),
            ..PadConfig::default()
        };
        assert!(matches!(
            DigitPad::new(&config),
            Err(SessionError::Client(ClassifyError::InvalidUrl(_)))
        ));
    }
}
