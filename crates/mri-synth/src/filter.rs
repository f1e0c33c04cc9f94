//! 8-bit filters: grayscale conversion, Gaussian blur and autocontrast.

use image::{imageops, DynamicImage, GrayImage, Luma};

/// Convert any decoded image to 8-bit luma with ITU-R 601 weights.
///
/// `L = (299 R + 587 G + 114 B) / 1000`, rounded. Alpha is dropped.
/// Inputs that are already single channel keep their levels.
pub fn grayscale(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLumaA16(_) => image.to_luma8(),
        _ => {
            let rgb = image.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                let weighted = u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114;
                let luma = (weighted + 500) / 1000;
                Luma([luma as u8])
            })
        }
    }
}

/// Gaussian blur with standard deviation `sigma`, in samples.
///
/// A non-positive `sigma` returns the image unchanged.
pub fn gaussian_blur(image: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 {
        return image.clone();
    }
    imageops::blur(image, sigma)
}

/// Stretch the intensity histogram to fill `[0, 255]`.
///
/// `cutoff` is the percentage of samples ignored at each end of the
/// histogram when locating the darkest and lightest levels, so a handful of
/// outliers cannot pin the range. The darkest remaining level maps to 0 and
/// the lightest to 255; everything in between is scaled linearly and
/// truncated. An image with a single level is returned unchanged.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]
pub fn autocontrast(image: &GrayImage, cutoff: f32) -> GrayImage {
    let mut histogram = [0u64; 256];
    for &v in image.as_raw() {
        histogram[v as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    let cut = (total as f64 * f64::from(cutoff.clamp(0.0, 50.0)) / 100.0) as u64;

    let Some((lo, hi)) = histogram_bounds(&histogram, cut) else {
        return image.clone();
    };
    if hi <= lo {
        return image.clone();
    }

    let span = i64::from(hi - lo);
    let mut lut = [0u8; 256];
    for (level, entry) in lut.iter_mut().enumerate() {
        let mapped = (level as i64 - i64::from(lo)) * 255 / span;
        *entry = mapped.clamp(0, 255) as u8;
    }

    let mut out = image.clone();
    for v in out.iter_mut() {
        *v = lut[*v as usize];
    }
    out
}

/// Darkest and lightest populated level after discarding `cut` samples from
/// each end. `None` for an empty histogram.
fn histogram_bounds(histogram: &[u64; 256], cut: u64) -> Option<(u8, u8)> {
    let lo = first_level_past(histogram.iter().enumerate(), cut)?;
    let hi = first_level_past(histogram.iter().enumerate().rev(), cut)?;
    Some((lo, hi))
}

fn first_level_past<'a>(
    mut bins: impl Iterator<Item = (usize, &'a u64)>,
    cut: u64,
) -> Option<u8> {
    let mut seen = 0u64;
    bins.find(|&(_, &count)| {
        seen += count;
        count > 0 && seen > cut
    })
    .map(|(level, _)| level as u8)
}
