//! Synthetic MRI generator
//!
//! HTTP service that turns uploaded grayscale images into stylized MRI-like
//! scans and serves a gallery of the results. The transform chain lives in
//! the `mri-synth` crate; this library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
