//! mri-synth: synthetic MRI-style images from ordinary grayscale pictures
//!
//! The crate turns an arbitrary input image into a 256×256 "scan" by running
//! a fixed chain of raster transforms:
//!
//! 1. decode, convert to grayscale ([`filter::grayscale`]), bicubic resize
//!    to the canonical size
//! 2. synthesize low-frequency noise ([`noise::smooth_noise`])
//! 3. blend input and noise (70% / 30%)
//! 4. multiply by a circular, feathered field-of-view mask ([`mask::field_of_view`])
//! 5. clip and quantize to 8 bits
//! 6. Gaussian blur ([`filter::gaussian_blur`])
//! 7. autocontrast ([`filter::autocontrast`])
//! 8. JPEG encode
//!
//! # Quick Start
//!
//! ```
//! use image::{DynamicImage, GrayImage, ImageFormat, Luma};
//! use mri_synth::Pipeline;
//! use std::io::Cursor;
//!
//! let source = GrayImage::from_pixel(40, 30, Luma([120]));
//! let mut png = Vec::new();
//! DynamicImage::ImageLuma8(source)
//!     .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
//!     .unwrap();
//!
//! let output = Pipeline::default().generate(&png).unwrap();
//! assert_eq!(output.raster.dimensions(), (256, 256));
//! assert!(!output.jpeg.is_empty());
//! ```
//!
//! # Randomness
//!
//! Every call to [`Pipeline::generate`] draws fresh noise from the
//! thread-local generator, so two runs over the same bytes produce visually
//! similar but byte-different output. Use [`Pipeline::generate_with_rng`]
//! with a seeded generator when reproducibility is needed.

pub mod error;
pub mod filter;
pub mod mask;
pub mod noise;
pub mod pipeline;
pub mod raster;

pub use error::SynthError;
pub use filter::{autocontrast, gaussian_blur, grayscale};
pub use mask::{field_of_view, FEATHER_WIDTH, FOV_RADIUS_FRACTION};
pub use noise::smooth_noise;
pub use pipeline::{Pipeline, PipelineOptions, Synthesized};
pub use raster::{Mask, Raster};

/// Side length of every raster the pipeline produces.
pub const CANONICAL_SIZE: u32 = 256;
