//! Circular field-of-view mask.
//!
//! Emulates the round imaging window of a scanner: full weight inside an
//! inner radius, zero outside a feather band, and a linear ramp across the
//! band so the edge fades instead of cutting off.
//!
//! Band samples are ranked by distance from the center (equal distances keep
//! row-major order) and receive evenly spaced weights from `1.0` down to
//! `0.0`. The ramp is therefore monotone in distance, with the endpoints
//! pinned to the first and last band sample.

use crate::raster::Mask;

/// Inner radius as a fraction of the shorter image side.
pub const FOV_RADIUS_FRACTION: f32 = 0.48;

/// Width of the feather band, in samples.
pub const FEATHER_WIDTH: f32 = 8.0;

/// Build the field-of-view mask for a `width × height` raster.
///
/// ```
/// use mri_synth::field_of_view;
///
/// let mask = field_of_view(256, 256);
/// assert_eq!(mask.get(128, 128), 1.0);
/// assert_eq!(mask.get(0, 0), 0.0);
/// ```
pub fn field_of_view(width: u32, height: u32) -> Mask {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let inner = width.min(height) as f32 * FOV_RADIUS_FRACTION;
    let outer = inner + FEATHER_WIDTH;

    let mut mask = Mask::filled(width, height, 0.0);
    let mut band: Vec<(f32, usize)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let i = y as usize * width as usize + x as usize;
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist <= inner {
                mask.set_index(i, 1.0);
            } else if dist < outer {
                band.push((dist, i));
            }
        }
    }

    // Stable sort keeps row-major order among equal distances.
    band.sort_by(|a, b| a.0.total_cmp(&b.0));
    let steps = band.len().saturating_sub(1).max(1) as f32;
    for (rank, &(_, i)) in band.iter().enumerate() {
        mask.set_index(i, 1.0 - rank as f32 / steps);
    }

    tracing::trace!(width, height, band = band.len(), "Built field-of-view mask");

    mask
}
