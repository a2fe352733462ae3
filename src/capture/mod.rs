//! Window capture.
//!
//! This module provides abstractions for grabbing frames from a game
//! window region. The OS windowing system stays behind the
//! [`FrameSource`] trait: the crate ships only the deterministic mock
//! backend, and real screen-grab backends are external collaborators.

mod config;
mod frame;
mod region;
mod source;

pub use config::{CaptureConfig, ConfigError, FileConfig, OutputConfig, SensingConfig};
pub use frame::RawFrame;
pub use region::Region;
pub use source::{CaptureError, FrameSource, MockWindowSource};
