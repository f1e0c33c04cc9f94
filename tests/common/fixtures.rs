//! Test fixtures: source images and multipart bodies.

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use std::io::Cursor;

/// Boundary used for hand-built multipart bodies
pub const BOUNDARY: &str = "----synthmri-test-boundary";

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut out), format)
        .expect("Failed to encode fixture");
    out
}

/// Grayscale PNG with a diagonal gradient
pub fn gray_png(width: u32, height: u32) -> Vec<u8> {
    let image = GrayImage::from_fn(width, height, |x, y| {
        Luma([((x * 255 / width.max(1) + y * 255 / height.max(1)) / 2) as u8])
    });
    encode(DynamicImage::ImageLuma8(image), ImageFormat::Png)
}

/// Colour JPEG, exercising grayscale conversion
pub fn color_jpeg(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Jpeg)
}

/// Bytes that no decoder accepts
pub fn not_an_image() -> Vec<u8> {
    (0..512u32).map(|i| (i.wrapping_mul(37) % 251) as u8).collect()
}

/// Build a `multipart/form-data` body with one file field.
///
/// Returns the Content-Type header value and the body.
pub fn multipart_body(field: &str, filename: &str, content: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
