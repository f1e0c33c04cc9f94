//! Owned single-channel f32 rasters and blend masks.
//!
//! [`Raster`] holds real-valued intensity samples in row-major order while
//! the pipeline blends and masks; it is quantized back to an
//! [`image::GrayImage`] at storage boundaries. [`Mask`] holds per-sample
//! blend weights in `[0, 1]` with the same layout.
//!
//! Combining two grids of different dimensions is a programming error and
//! panics.

use image::{GrayImage, Luma};

/// Real-valued grayscale raster, row-major, `stride == width`.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Raster {
    /// Zero-filled raster of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    /// Lift an 8-bit grayscale image into floating point.
    pub fn from_gray(image: &GrayImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.as_raw().iter().map(|&v| f32::from(v)).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major sample slice.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Weighted sum `self_weight * self + other_weight * other`, sample-wise.
    ///
    /// # Panics
    ///
    /// Panics if the rasters differ in size.
    pub fn blend(&self, other: &Raster, self_weight: f32, other_weight: f32) -> Raster {
        assert_eq!(
            self.dimensions(),
            other.dimensions(),
            "cannot blend rasters of different sizes"
        );
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| self_weight * a + other_weight * b)
            .collect();
        Raster {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Multiply every sample by the corresponding mask weight.
    ///
    /// # Panics
    ///
    /// Panics if the mask differs in size.
    pub fn apply_mask(&mut self, mask: &Mask) {
        assert_eq!(
            self.dimensions(),
            mask.dimensions(),
            "mask size does not match raster"
        );
        for (v, &m) in self.data.iter_mut().zip(&mask.data) {
            *v *= m;
        }
    }

    /// Clip to `[0, 255]` and quantize by truncation.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_gray(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([self.get(x, y).clamp(0.0, 255.0) as u8])
        })
    }
}

/// Per-sample blend weights in `[0, 1]`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Mask {
    /// Mask filled with a constant weight.
    pub fn filled(width: u32, height: u32, weight: f32) -> Self {
        Self {
            width,
            height,
            data: vec![weight; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn weights(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub(crate) fn set_index(&mut self, i: usize, weight: f32) {
        self.data[i] = weight;
    }
}
