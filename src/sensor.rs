//! End-to-end distance sensor.
//!
//! Glues a frame source, the preprocessor and the observation assembler
//! into a single `observe()` call. Data flows strictly forward (capture,
//! preprocess, cast, normalize) and the sensor keeps no pipeline state
//! between calls: every observation is a pure function of the frame it
//! was built from.

use crate::capture::{
    CaptureConfig, CaptureError, FileConfig, FrameSource, Region, SensingConfig,
};
use crate::preprocess::{InvalidFrameError, Mask, Preprocessor};
use crate::raycast::Ray;
use crate::sensing::{self, Observation};
use thiserror::Error;

/// Errors an observation attempt can surface.
///
/// Callers distinguish a missing window (a configuration problem, worth
/// retrying the outer loop) from a malformed frame (a capture-contract
/// violation, fatal to the attempt). Nothing is retried internally.
#[derive(Debug, Error)]
pub enum SensorError {
    /// The capture collaborator failed.
    #[error(transparent)]
    Capture(#[from] CaptureError),
    /// The captured frame violated the preprocessor's contract.
    #[error(transparent)]
    Frame(#[from] InvalidFrameError),
}

/// Screen-to-distance sensor over an abstract frame source.
pub struct DistanceSensor<S> {
    source: S,
    capture: CaptureConfig,
    sensing: SensingConfig,
    preprocessor: Preprocessor,
}

impl<S: FrameSource> DistanceSensor<S> {
    /// Creates a sensor over the given source with default parameters.
    pub fn new(source: S) -> Self {
        Self::with_config(source, &FileConfig::default())
    }

    /// Creates a sensor with explicit configuration.
    pub fn with_config(source: S, config: &FileConfig) -> Self {
        Self {
            source,
            capture: config.capture.clone(),
            sensing: config.sensing.clone(),
            preprocessor: Preprocessor::new(config.preprocess.clone()),
        }
    }

    /// Resolves the capture region of the configured window, with chrome
    /// insets applied.
    fn region(&mut self) -> Result<Region, CaptureError> {
        let window = self.source.locate_window(&self.capture.window_title)?;
        let region = window.shrink(
            self.capture.inset_left,
            self.capture.inset_top,
            self.capture.inset_right,
            self.capture.inset_bottom,
        );
        if !region.is_valid() {
            return Err(CaptureError::invalid_region(region));
        }
        Ok(region)
    }

    /// Captures one frame and preprocesses it into the canonical mask.
    pub fn mask(&mut self) -> Result<Mask, SensorError> {
        let region = self.region()?;
        let frame = self.source.capture(region)?;
        Ok(self.preprocessor.preprocess(&frame)?)
    }

    /// Produces one observation: capture, preprocess, cast, normalize.
    pub fn observe(&mut self) -> Result<Observation, SensorError> {
        let mask = self.mask()?;
        let observation = sensing::build_observation(&mask, self.sensing.n_rays);
        tracing::debug!(
            rays = observation.len(),
            min = observation.min(),
            max = observation.max(),
            "observation built"
        );
        Ok(observation)
    }

    /// Ray endpoints for overlay rendering, horizontal extremes dropped.
    ///
    /// A distinct, non-authoritative call path for visualization
    /// collaborators; the sensing vector always comes from
    /// [`DistanceSensor::observe`].
    pub fn display_rays(&mut self) -> Result<Vec<Ray>, SensorError> {
        let mask = self.mask()?;
        Ok(sensing::display_rays(&mask, self.sensing.n_rays))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::MockWindowSource;

    fn mock_config() -> FileConfig {
        let mut config = FileConfig::default();
        config.capture.window_title = "Test Window".to_string();
        config
    }

    #[test]
    fn test_default_sensor_targets_default_window() {
        let title = CaptureConfig::default().window_title;
        let mut sensor = DistanceSensor::new(MockWindowSource::new(title));
        assert_eq!(sensor.observe().unwrap().len(), 16);
    }

    #[test]
    fn test_observe_produces_configured_ray_count() {
        let config = mock_config();
        let source = MockWindowSource::new("Test Window");
        let mut sensor = DistanceSensor::with_config(source, &config);

        let observation = sensor.observe().unwrap();
        assert_eq!(observation.len(), 16);
    }

    #[test]
    fn test_missing_window_surfaces_capture_error() {
        let config = mock_config();
        let source = MockWindowSource::new("Some Other Window");
        let mut sensor = DistanceSensor::with_config(source, &config);

        assert!(matches!(
            sensor.observe(),
            Err(SensorError::Capture(CaptureError::WindowNotFound(_)))
        ));
    }

    #[test]
    fn test_window_smaller_than_insets_is_invalid() {
        let config = mock_config();
        let source = MockWindowSource::new("Test Window")
            .with_bounds(crate::capture::Region::new(0, 0, 15, 45));
        let mut sensor = DistanceSensor::with_config(source, &config);

        assert!(matches!(
            sensor.observe(),
            Err(SensorError::Capture(CaptureError::InvalidRegion { .. }))
        ));
    }

    #[test]
    fn test_fresh_sensors_agree() {
        let config = mock_config();
        let mut a = DistanceSensor::with_config(MockWindowSource::new("Test Window"), &config);
        let mut b = DistanceSensor::with_config(MockWindowSource::new("Test Window"), &config);

        assert_eq!(a.observe().unwrap(), b.observe().unwrap());
    }

    #[test]
    fn test_display_rays_shorter_than_observation() {
        let config = mock_config();
        let source = MockWindowSource::new("Test Window");
        let mut sensor = DistanceSensor::with_config(source, &config);

        let rays = sensor.display_rays().unwrap();
        assert_eq!(rays.len(), 14);
    }
}
