//! Low-frequency noise fields.
//!
//! A tiny grid of independent uniform values is upsampled with bicubic
//! interpolation. The coarse base grid gives the field its spatial
//! smoothness: neighbouring output samples come from the same few base
//! cells, so the result reads as soft tissue texture rather than static.

use image::{imageops, imageops::FilterType, GrayImage, Luma};
use rand::Rng;

use crate::raster::Raster;

/// Smooth pseudo-random field of `width × height` samples in `[0, 255]`.
///
/// `base` is the side of the random grid before upsampling; `0` is treated
/// as `1`. Values are drawn from `rng`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn smooth_noise<R: Rng + ?Sized>(width: u32, height: u32, base: u32, rng: &mut R) -> Raster {
    let base = base.max(1);
    let grid = GrayImage::from_fn(base, base, |_, _| {
        Luma([(rng.gen::<f32>() * 255.0) as u8])
    });
    let upsampled = imageops::resize(&grid, width, height, FilterType::CatmullRom);
    Raster::from_gray(&upsampled)
}
