//! The synthesis pipeline.
//!
//! [`Pipeline`] owns the fixed parameters of a run ([`PipelineOptions`]) and
//! the precomputed field-of-view mask. Each run is independent: the only
//! input besides the source bytes is the random generator used for noise.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, imageops::FilterType, DynamicImage, GrayImage};
use rand::Rng;

use crate::error::{Result, SynthError};
use crate::filter::{autocontrast, gaussian_blur, grayscale};
use crate::mask::field_of_view;
use crate::noise::smooth_noise;
use crate::raster::{Mask, Raster};
use crate::CANONICAL_SIZE;

/// Parameters of a pipeline run.
///
/// The defaults are the only values the service uses; the struct exists so
/// library callers and tests can vary one knob at a time.
///
/// ```
/// use mri_synth::PipelineOptions;
///
/// let options = PipelineOptions::new().blur_sigma(1.2).jpeg_quality(80);
/// assert_eq!(options.size, 256);
/// assert_eq!(options.jpeg_quality, 80);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Side of the square output raster.
    pub size: u32,
    /// Side of the random grid the noise field is upsampled from.
    pub noise_base: u32,
    /// Weight of the resized input in the blend.
    pub input_weight: f32,
    /// Weight of the noise field in the blend.
    pub noise_weight: f32,
    /// Gaussian blur sigma, in samples.
    pub blur_sigma: f32,
    /// Percentage of samples ignored at each histogram end by autocontrast.
    pub autocontrast_cutoff: f32,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            size: CANONICAL_SIZE,
            noise_base: 10,
            input_weight: 0.7,
            noise_weight: 0.3,
            blur_sigma: 0.7,
            autocontrast_cutoff: 0.0,
            jpeg_quality: 92,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn noise_base(mut self, base: u32) -> Self {
        self.noise_base = base;
        self
    }

    pub fn weights(mut self, input: f32, noise: f32) -> Self {
        self.input_weight = input;
        self.noise_weight = noise;
        self
    }

    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    pub fn autocontrast_cutoff(mut self, cutoff: f32) -> Self {
        self.autocontrast_cutoff = cutoff;
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct Synthesized {
    /// Final 8-bit raster.
    pub raster: GrayImage,
    /// JPEG encoding of `raster`.
    pub jpeg: Vec<u8>,
}

/// Fixed chain of transforms turning an input picture into a synthetic scan.
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: PipelineOptions,
    mask: Mask,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        let mask = field_of_view(options.size, options.size);
        Self { options, mask }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Decode arbitrary image bytes and bring them to the canonical raster.
    pub fn load(&self, bytes: &[u8]) -> Result<GrayImage> {
        let decoded = image::load_from_memory(bytes).map_err(SynthError::Decode)?;
        Ok(self.prepare(&decoded))
    }

    /// Grayscale conversion (ITU-R 601) plus bicubic resize to `size × size`.
    pub fn prepare(&self, image: &DynamicImage) -> GrayImage {
        let gray = grayscale(image);
        let size = self.options.size;
        if gray.dimensions() == (size, size) {
            return gray;
        }
        imageops::resize(&gray, size, size, FilterType::CatmullRom)
    }

    /// Noise, blend, mask, quantize, blur and autocontrast.
    ///
    /// # Panics
    ///
    /// Panics if `input` is not `size × size`; use [`Pipeline::prepare`] first.
    pub fn synthesize<R: Rng + ?Sized>(&self, input: &GrayImage, rng: &mut R) -> GrayImage {
        let size = self.options.size;
        assert_eq!(
            input.dimensions(),
            (size, size),
            "pipeline input must be {size}x{size}"
        );

        let noise = smooth_noise(size, size, self.options.noise_base, rng);
        let mut blended = Raster::from_gray(input).blend(
            &noise,
            self.options.input_weight,
            self.options.noise_weight,
        );
        blended.apply_mask(&self.mask);

        let quantized = blended.to_gray();
        let softened = gaussian_blur(&quantized, self.options.blur_sigma);
        autocontrast(&softened, self.options.autocontrast_cutoff)
    }

    /// Encode a raster as JPEG at the configured quality.
    pub fn encode(&self, raster: &GrayImage) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut out, self.options.jpeg_quality);
        DynamicImage::ImageLuma8(raster.clone())
            .write_with_encoder(encoder)
            .map_err(SynthError::Encode)?;
        Ok(out.into_inner())
    }

    /// Full run with fresh randomness from the thread-local generator.
    pub fn generate(&self, bytes: &[u8]) -> Result<Synthesized> {
        self.generate_with_rng(bytes, &mut rand::thread_rng())
    }

    /// Full run drawing noise from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        bytes: &[u8],
        rng: &mut R,
    ) -> Result<Synthesized> {
        let input = self.load(bytes)?;
        let raster = self.synthesize(&input, rng);
        let jpeg = self.encode(&raster)?;

        tracing::debug!(
            size = self.options.size,
            input_bytes = bytes.len(),
            output_bytes = jpeg.len(),
            "Synthesized image"
        );

        Ok(Synthesized { raster, jpeg })
    }

    /// Read `src`, run the pipeline and write the JPEG to `dst`.
    ///
    /// Nothing is written unless every stage succeeds.
    pub fn generate_file(&self, src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
        let (src, dst) = (src.as_ref(), dst.as_ref());
        let bytes = std::fs::read(src).map_err(|source| SynthError::Io {
            path: src.to_path_buf(),
            source,
        })?;
        let output = self.generate(&bytes)?;
        std::fs::write(dst, &output.jpeg).map_err(|source| SynthError::Io {
            path: dst.to_path_buf(),
            source,
        })
    }
}
