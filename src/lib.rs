//! Screen Raycasting Distance Sensor
//!
//! Converts captured frames of a driving game's viewport into a compact
//! vector of normalized obstacle distances, usable as the observation of
//! a downstream control or learning loop.
//!
//! # Architecture
//!
//! The pipeline is a straight line with no feedback edges:
//!
//! ```text
//! capture → preprocess → raycast → sensing
//! ```
//!
//! A frame source grabs a window region as raw RGB; preprocessing
//! collapses it into a canonical 128x32 binary obstacle mask; the
//! raycaster walks a fan of angles from the mask's bottom-center; the
//! sensing stage turns endpoints into weighted, normalized distances.
//!
//! # Design Principles
//!
//! - **Deterministic**: identical frames yield bit-identical observations;
//!   there is no randomness anywhere in the pipeline
//! - **Stateless per call**: no component retains cross-call state, so no
//!   locking and no cancellation points are needed
//! - **Narrow capture boundary**: the OS windowing system sits behind the
//!   [`FrameSource`] trait and the core only consumes its contract
//! - **Distinct failures**: a missing window, an invalid region and a
//!   malformed frame surface as different error kinds, never swallowed
//!
//! # Example
//!
//! ```
//! use raysense::{
//!     capture::{FileConfig, MockWindowSource},
//!     sensor::DistanceSensor,
//! };
//!
//! let config = FileConfig::default();
//! let source = MockWindowSource::new(config.capture.window_title.clone());
//! let mut sensor = DistanceSensor::with_config(source, &config);
//!
//! let observation = sensor.observe().unwrap();
//! assert_eq!(observation.len(), config.sensing.n_rays);
//! assert!(observation.values().iter().all(|v| v.is_finite()));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod preprocess;
pub mod raycast;
pub mod sensing;
pub mod sensor;

// Re-export commonly used types at crate root
pub use capture::{
    CaptureConfig, CaptureError, FileConfig, FrameSource, MockWindowSource, RawFrame, Region,
    SensingConfig,
};
pub use preprocess::{InvalidFrameError, Mask, Preprocessor};
pub use raycast::{Ray, RayCaster};
pub use sensing::{angular_weight, build_observation, Observation};
pub use sensor::{DistanceSensor, SensorError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
