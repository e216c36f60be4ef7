//! Image dominant-color extraction.
//!
//! Pipeline: decode, composite any alpha over a background fill, downsample
//! to a small fixed resolution with a bilinear filter, then take the most
//! frequent color from an exact histogram. A 16-color adaptive palette
//! (median cut) stands in when the histogram is unusable. Every stage is
//! deterministic: identical bytes and parameters always produce identical
//! output, and all ties break on first encounter in row-major scan order.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::color::Rgb;
use crate::error::ResolveError;
use crate::resolve::ResolvedColor;

/// Number of palette entries in the quantization fallback.
const PALETTE_COLORS: usize = 16;

/// Extraction parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Fill composited under transparent pixels.
    pub background: Rgb,
    /// Resolution the decoded image is downsampled to before counting.
    pub sample_size: (u32, u32),
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            background: Rgb::white(),
            sample_size: (150, 150),
        }
    }
}

/// Resolves raw image bytes to the image's dominant color.
///
/// Accepts PNG, JPEG, GIF, WebP, and BMP data. Transparency is composited
/// over `options.background` before sampling.
///
/// # Examples
///
/// ```rust
/// use huecast::{ExtractOptions, image_to_color};
///
/// let mut png = Vec::new();
/// image::RgbImage::from_pixel(8, 8, image::Rgb([0, 0, 255]))
///     .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
///     .unwrap();
///
/// let resolved = image_to_color(&png, &ExtractOptions::default()).unwrap();
/// assert_eq!(resolved.hex, "#0000FF");
/// ```
pub fn image_to_color(
    bytes: &[u8],
    options: &ExtractOptions,
) -> Result<ResolvedColor, ResolveError> {
    dominant_color(bytes, options).map(ResolvedColor::from)
}

fn dominant_color(bytes: &[u8], options: &ExtractOptions) -> Result<Rgb, ResolveError> {
    let decoded = image::load_from_memory(bytes).map_err(|err| ResolveError::InvalidImage {
        byte_len: bytes.len(),
        reason: err.to_string(),
    })?;
    let color_type = decoded.color();

    let opaque = if color_type.has_alpha() {
        composite_over(&decoded.to_rgba8(), options.background)
    } else {
        decoded.to_rgb8()
    };
    log::debug!(
        "decoded {} byte image: {}x{} {color_type:?}",
        bytes.len(),
        opaque.width(),
        opaque.height()
    );

    let (width, height) = options.sample_size;
    if width == 0 || height == 0 {
        // A zero-area sample has no pixels for either the histogram or the
        // palette fallback to count.
        return Err(ResolveError::DegenerateImage {
            byte_len: bytes.len(),
        });
    }
    let sample = imageops::resize(&opaque, width, height, FilterType::Triangle);

    if let Some(rgb) = histogram_dominant(&sample) {
        return Ok(rgb);
    }
    log::debug!("histogram unusable, falling back to adaptive palette");
    palette_dominant(&sample).ok_or(ResolveError::DegenerateImage {
        byte_len: bytes.len(),
    })
}

/// Composites an RGBA image over an opaque background. The blend is
/// integer-exact so repeated runs are bit-identical.
fn composite_over(source: &image::RgbaImage, background: Rgb) -> RgbImage {
    let bg = [background.r, background.g, background.b];
    RgbImage::from_fn(source.width(), source.height(), |x, y| {
        let [r, g, b, a] = source.get_pixel(x, y).0;
        let blend = |fg: u8, bg: u8| -> u8 {
            ((fg as u32 * a as u32 + bg as u32 * (255 - a as u32) + 127) / 255) as u8
        };
        image::Rgb([blend(r, bg[0]), blend(g, bg[1]), blend(b, bg[2])])
    })
}

/// Most frequent exact color, or `None` when the histogram is empty or the
/// `w*h + 1` entry cap is exceeded (the theoretical maximum for the grid,
/// kept as a guard on the contract).
fn histogram_dominant(sample: &RgbImage) -> Option<Rgb> {
    let cap = (sample.width() as usize) * (sample.height() as usize) + 1;

    // Entries keep first-encounter order; pixels() scans row-major.
    let mut index: HashMap<[u8; 3], usize> = HashMap::new();
    let mut entries: Vec<([u8; 3], u32)> = Vec::new();
    for pixel in sample.pixels() {
        match index.entry(pixel.0) {
            Entry::Occupied(slot) => entries[*slot.get()].1 += 1,
            Entry::Vacant(slot) => {
                slot.insert(entries.len());
                entries.push((pixel.0, 1));
            }
        }
    }
    if entries.is_empty() || entries.len() > cap {
        return None;
    }

    // Strictly-greater comparison keeps the earliest color on count ties.
    let mut best = &entries[0];
    for entry in &entries[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    Some(Rgb::new(best.0[0], best.0[1], best.0[2]))
}

/// Quantizes the sample to an adaptive palette and returns the most
/// frequent palette entry, first-encounter tie-break.
fn palette_dominant(sample: &RgbImage) -> Option<Rgb> {
    let pixels: Vec<[u8; 3]> = sample.pixels().map(|p| p.0).collect();
    let palette = median_cut(&pixels, PALETTE_COLORS);
    if palette.is_empty() {
        return None;
    }

    let mut counts = vec![0u32; palette.len()];
    let mut first_seen = vec![usize::MAX; palette.len()];
    for (position, pixel) in pixels.iter().enumerate() {
        let slot = nearest_entry(&palette, *pixel);
        counts[slot] += 1;
        if first_seen[slot] == usize::MAX {
            first_seen[slot] = position;
        }
    }

    let mut best = 0usize;
    for slot in 1..palette.len() {
        let better = counts[slot] > counts[best]
            || (counts[slot] == counts[best] && first_seen[slot] < first_seen[best]);
        if better {
            best = slot;
        }
    }
    let [r, g, b] = palette[best];
    Some(Rgb::new(r, g, b))
}

/// Deterministic median-cut quantization: repeatedly split the box with the
/// widest channel range at its median (stable sort, lowest-index box on
/// ties) until `colors` boxes exist, then average each box.
fn median_cut(pixels: &[[u8; 3]], colors: usize) -> Vec<[u8; 3]> {
    if pixels.is_empty() || colors == 0 {
        return Vec::new();
    }

    let mut boxes: Vec<Vec<[u8; 3]>> = vec![pixels.to_vec()];
    while boxes.len() < colors {
        let mut widest: Option<(usize, usize, u8)> = None; // (box, channel, range)
        for (i, cell) in boxes.iter().enumerate() {
            if cell.len() < 2 {
                continue;
            }
            for channel in 0..3 {
                let min = cell.iter().map(|p| p[channel]).min().unwrap_or(0);
                let max = cell.iter().map(|p| p[channel]).max().unwrap_or(0);
                let range = max - min;
                if range > 0 && widest.map_or(true, |(_, _, w)| range > w) {
                    widest = Some((i, channel, range));
                }
            }
        }
        let Some((box_index, channel, _)) = widest else {
            break; // nothing left to split
        };

        let mut cell = boxes.remove(box_index);
        cell.sort_by_key(|p| p[channel]);
        let upper = cell.split_off(cell.len() / 2);
        boxes.insert(box_index, cell);
        boxes.insert(box_index + 1, upper);
    }

    boxes
        .iter()
        .filter(|cell| !cell.is_empty())
        .map(|cell| {
            let n = cell.len() as f64;
            let sum = cell.iter().fold([0.0f64; 3], |mut acc, p| {
                for channel in 0..3 {
                    acc[channel] += p[channel] as f64;
                }
                acc
            });
            [
                crate::color::clamp_channel(sum[0] / n),
                crate::color::clamp_channel(sum[1] / n),
                crate::color::clamp_channel(sum[2] / n),
            ]
        })
        .collect()
}

/// Index of the palette entry nearest to `pixel` by squared distance;
/// lowest index wins ties.
fn nearest_entry(palette: &[[u8; 3]], pixel: [u8; 3]) -> usize {
    let mut best = 0usize;
    let mut best_distance = u32::MAX;
    for (i, entry) in palette.iter().enumerate() {
        let distance: u32 = (0..3)
            .map(|c| {
                let d = entry[c] as i32 - pixel[c] as i32;
                (d * d) as u32
            })
            .sum();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}
