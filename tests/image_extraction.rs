//! Integration tests for image dominant-color extraction.
//!
//! Images are synthesized in memory and encoded to real PNG bytes so the
//! whole pipeline runs: decode, compositing, downsampling, histogram.

use std::io::Cursor;

use image::{ImageFormat, Rgb as Px, RgbImage, Rgba, RgbaImage};

use huecast::{ExtractOptions, ResolveError, Rgb, image_to_color};

fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encoding");
    bytes
}

fn png_bytes_rgba(img: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("png encoding");
    bytes
}

/// `width`x`height` image, top `blue_rows` rows blue, the rest red.
fn blue_red_image(width: u32, height: u32, blue_rows: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |_, y| {
        if y < blue_rows {
            Px([0, 0, 255])
        } else {
            Px([255, 0, 0])
        }
    })
}

// ============================================================================
// DOMINANT COLOR
// ============================================================================

#[test]
fn test_solid_image() {
    let bytes = png_bytes(&RgbImage::from_pixel(20, 20, Px([0, 128, 64])));
    let resolved = image_to_color(&bytes, &ExtractOptions::default()).unwrap();
    assert_eq!(resolved.rgb, Rgb::new(0, 128, 64));
    assert_eq!(resolved.hex, "#008040");
}

#[test]
fn test_ninety_percent_blue_wins() {
    let bytes = png_bytes(&blue_red_image(100, 100, 90));
    let resolved = image_to_color(&bytes, &ExtractOptions::default()).unwrap();
    assert_eq!(resolved.rgb, Rgb::new(0, 0, 255));
}

#[test]
fn test_dominance_is_dimension_independent() {
    // Same 90/10 split at several source sizes.
    for (w, h) in [(10, 10), (64, 48), (300, 200)] {
        let bytes = png_bytes(&blue_red_image(w, h, h * 9 / 10));
        let resolved = image_to_color(&bytes, &ExtractOptions::default()).unwrap();
        assert_eq!(resolved.rgb, Rgb::new(0, 0, 255), "at {w}x{h}");
    }
}

#[test]
fn test_repeated_calls_are_bit_identical() {
    let bytes = png_bytes(&blue_red_image(64, 64, 40));
    let first = image_to_color(&bytes, &ExtractOptions::default()).unwrap();
    for _ in 0..5 {
        assert_eq!(image_to_color(&bytes, &ExtractOptions::default()).unwrap(), first);
    }
}

// ============================================================================
// TRANSPARENCY
// ============================================================================

#[test]
fn test_fully_transparent_image_yields_background() {
    let img = RgbaImage::from_pixel(30, 30, Rgba([90, 10, 200, 0]));
    let bytes = png_bytes_rgba(&img);

    let resolved = image_to_color(&bytes, &ExtractOptions::default()).unwrap();
    assert_eq!(resolved.rgb, Rgb::white());
    assert_eq!(resolved.hex, "#FFFFFF");
}

#[test]
fn test_custom_background_fill() {
    let img = RgbaImage::from_pixel(30, 30, Rgba([0, 0, 0, 0]));
    let bytes = png_bytes_rgba(&img);

    let options = ExtractOptions {
        background: Rgb::new(10, 20, 30),
        ..ExtractOptions::default()
    };
    assert_eq!(image_to_color(&bytes, &options).unwrap().rgb, Rgb::new(10, 20, 30));
}

#[test]
fn test_opaque_alpha_channel_is_a_no_op() {
    let img = RgbaImage::from_pixel(16, 16, Rgba([12, 34, 56, 255]));
    let bytes = png_bytes_rgba(&img);
    assert_eq!(
        image_to_color(&bytes, &ExtractOptions::default()).unwrap().rgb,
        Rgb::new(12, 34, 56)
    );
}

// ============================================================================
// OPTIONS
// ============================================================================

#[test]
fn test_custom_sample_size() {
    let bytes = png_bytes(&blue_red_image(100, 100, 90));
    let options = ExtractOptions {
        sample_size: (32, 32),
        ..ExtractOptions::default()
    };
    assert_eq!(image_to_color(&bytes, &options).unwrap().rgb, Rgb::new(0, 0, 255));
}

#[test]
fn test_zero_area_sample_is_degenerate() {
    let bytes = png_bytes(&RgbImage::from_pixel(8, 8, Px([1, 2, 3])));
    let options = ExtractOptions {
        sample_size: (0, 0),
        ..ExtractOptions::default()
    };
    assert!(matches!(
        image_to_color(&bytes, &options),
        Err(ResolveError::DegenerateImage { .. })
    ));
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_invalid_bytes() {
    let err = image_to_color(b"definitely not an image", &ExtractOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::InvalidImage { byte_len: 23, .. }
    ));
}

#[test]
fn test_truncated_png() {
    let mut bytes = png_bytes(&RgbImage::from_pixel(20, 20, Px([5, 5, 5])));
    bytes.truncate(bytes.len() / 2);
    assert!(matches!(
        image_to_color(&bytes, &ExtractOptions::default()),
        Err(ResolveError::InvalidImage { .. })
    ));
}
