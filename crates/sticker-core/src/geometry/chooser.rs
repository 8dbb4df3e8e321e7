//! Content-aware anchor selection for the `entropy` and `attention` policies.
//!
//! Both choosers work on a block-averaged thumbnail (at most
//! [`THUMBNAIL_EDGE`] pixels on the long side), score a bounded set of
//! candidate windows, and keep the best one. Ties go to the candidate
//! closest to the center, so featureless images crop like `center`.

use super::Anchor;
use crate::decode::{SourceImage, RGBA_CHANNELS};

/// Long edge of the analysis thumbnail.
pub const THUMBNAIL_EDGE: u32 = 128;

/// Upper bound on candidate positions tried along each axis.
const MAX_CANDIDATES_PER_AXIS: u32 = 32;

/// ITU-R BT.709 luma coefficients.
const LUMINANCE_R: f32 = 0.2126;
const LUMINANCE_G: f32 = 0.7152;
const LUMINANCE_B: f32 = 0.0722;

const SATURATION_WEIGHT: f64 = 0.5;
const SKIN_WEIGHT: f64 = 48.0;

/// Picks the top-left corner of a square crop window.
///
/// Implementations must return an offset that keeps the `side` x `side`
/// window inside the image. The planner clamps the result regardless.
pub trait AnchorChooser: Sync {
    fn choose_anchor(&self, image: &SourceImage, side: u32, anchor: Anchor) -> (u32, u32);
}

/// Always centers the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterChooser;

impl AnchorChooser for CenterChooser {
    fn choose_anchor(&self, image: &SourceImage, side: u32, _anchor: Anchor) -> (u32, u32) {
        Anchor::Center.fixed_offset(image.width, image.height, side)
    }
}

/// Maximizes the Shannon entropy of the window's luma histogram.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyChooser;

impl AnchorChooser for EntropyChooser {
    fn choose_anchor(&self, image: &SourceImage, side: u32, _anchor: Anchor) -> (u32, u32) {
        let Some(thumb) = Thumbnail::from_image(image) else {
            return Anchor::Center.fixed_offset(image.width, image.height, side);
        };
        let luma: Vec<u8> = thumb.rgb.iter().map(|&[r, g, b]| luma(r, g, b)).collect();

        let window = thumb.window(side);
        let best = best_window(&thumb, window, |x, y| {
            let mut histogram = [0u32; 256];
            for row in y..y + window {
                let start = (row * thumb.width + x) as usize;
                for &v in &luma[start..start + window as usize] {
                    histogram[v as usize] += 1;
                }
            }
            shannon_entropy(&histogram)
        });

        thumb.to_source_offset(best, image, side)
    }
}

/// Maximizes a salience map of luma gradients, saturation and skin tones.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttentionChooser;

impl AnchorChooser for AttentionChooser {
    fn choose_anchor(&self, image: &SourceImage, side: u32, _anchor: Anchor) -> (u32, u32) {
        let Some(thumb) = Thumbnail::from_image(image) else {
            return Anchor::Center.fixed_offset(image.width, image.height, side);
        };

        let table = SummedArea::new(&salience_map(&thumb), thumb.width, thumb.height);
        let window = thumb.window(side);
        let best = best_window(&thumb, window, |x, y| table.sum(x, y, window, window));

        thumb.to_source_offset(best, image, side)
    }
}

/// Routes `entropy` and `attention` to their choosers; any other anchor is
/// centered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentAwareChooser {
    pub entropy: EntropyChooser,
    pub attention: AttentionChooser,
}

impl AnchorChooser for ContentAwareChooser {
    fn choose_anchor(&self, image: &SourceImage, side: u32, anchor: Anchor) -> (u32, u32) {
        match anchor {
            Anchor::Entropy => self.entropy.choose_anchor(image, side, anchor),
            Anchor::Attention => self.attention.choose_anchor(image, side, anchor),
            _ => CenterChooser.choose_anchor(image, side, anchor),
        }
    }
}

/// Block-averaged RGB copy of the source.
struct Thumbnail {
    width: u32,
    height: u32,
    /// Source pixels per thumbnail pixel along each axis.
    block: u32,
    rgb: Vec<[u8; 3]>,
}

impl Thumbnail {
    fn from_image(image: &SourceImage) -> Option<Self> {
        let expected = image.pixel_count() as usize * RGBA_CHANNELS;
        if image.is_empty() || image.pixels.len() != expected {
            return None;
        }

        let block = image.width.max(image.height).div_ceil(THUMBNAIL_EDGE).max(1);
        let width = image.width.div_ceil(block);
        let height = image.height.div_ceil(block);
        // Roughly a 4x4 sample grid per block
        let stride = (block / 4).max(1) as usize;

        let mut sums = vec![[0u32; 4]; (width * height) as usize];
        for y in (0..image.height).step_by(stride) {
            let row = (y * image.width) as usize * RGBA_CHANNELS;
            let cell_row = (y / block * width) as usize;
            for x in (0..image.width).step_by(stride) {
                let px = row + x as usize * RGBA_CHANNELS;
                let cell = &mut sums[cell_row + (x / block) as usize];
                cell[0] += image.pixels[px] as u32;
                cell[1] += image.pixels[px + 1] as u32;
                cell[2] += image.pixels[px + 2] as u32;
                cell[3] += 1;
            }
        }

        let rgb = sums
            .into_iter()
            .map(|[r, g, b, n]| {
                let n = n.max(1);
                [(r / n) as u8, (g / n) as u8, (b / n) as u8]
            })
            .collect();

        Some(Self {
            width,
            height,
            block,
            rgb,
        })
    }

    /// Window side in thumbnail pixels.
    fn window(&self, side: u32) -> u32 {
        let scaled = (side as f64 / self.block as f64).round() as u32;
        scaled.clamp(1, self.width.min(self.height))
    }

    fn to_source_offset(&self, (x, y): (u32, u32), image: &SourceImage, side: u32) -> (u32, u32) {
        (
            (x * self.block).min(image.width.saturating_sub(side)),
            (y * self.block).min(image.height.saturating_sub(side)),
        )
    }
}

/// Evenly spaced positions in `0..=max`, always including both ends and the
/// midpoint.
fn candidate_positions(max: u32) -> Vec<u32> {
    let step = (max + 1).div_ceil(MAX_CANDIDATES_PER_AXIS).max(1);
    let mut positions: Vec<u32> = (0..=max).step_by(step as usize).collect();
    positions.push(max / 2);
    positions.push(max);
    positions.sort_unstable();
    positions.dedup();
    positions
}

/// Score every candidate window and return the best thumbnail offset.
fn best_window(thumb: &Thumbnail, window: u32, score: impl Fn(u32, u32) -> f64) -> (u32, u32) {
    let max_x = thumb.width - window;
    let max_y = thumb.height - window;
    let center = (max_x as f64 / 2.0, max_y as f64 / 2.0);
    let distance = |x: u32, y: u32| (x as f64 - center.0).abs() + (y as f64 - center.1).abs();

    let mut best: Option<((u32, u32), f64)> = None;

    for y in candidate_positions(max_y) {
        for x in candidate_positions(max_x) {
            let s = score(x, y);
            let better = match best {
                None => true,
                Some(((bx, by), best_score)) => {
                    let tolerance = 1e-9 * best_score.abs().max(1.0);
                    s > best_score + tolerance
                        || ((s - best_score).abs() <= tolerance
                            && distance(x, y) < distance(bx, by))
                }
            };
            if better {
                best = Some(((x, y), s));
            }
        }
    }

    best.map_or((max_x / 2, max_y / 2), |(position, _)| position)
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

fn shannon_entropy(histogram: &[u32; 256]) -> f64 {
    let total: u32 = histogram.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    histogram
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Coarse RGB skin-tone test (daylight rule).
fn is_skin_tone(r: u8, g: u8, b: u8) -> bool {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    r > 95 && g > 40 && b > 20 && max - min > 15 && (r - g).abs() > 15 && r > g && r > b
}

fn salience_map(thumb: &Thumbnail) -> Vec<f64> {
    let (w, h) = (thumb.width as usize, thumb.height as usize);
    let luma: Vec<i32> = thumb
        .rgb
        .iter()
        .map(|&[r, g, b]| luma(r, g, b) as i32)
        .collect();

    let mut map = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            let at = |xx: usize, yy: usize| luma[yy * w + xx];
            let gx = at((x + 1).min(w - 1), y) - at(x.saturating_sub(1), y);
            let gy = at(x, (y + 1).min(h - 1)) - at(x, y.saturating_sub(1));

            let [r, g, b] = thumb.rgb[y * w + x];
            let saturation = r.max(g).max(b) - r.min(g).min(b);
            let skin = if is_skin_tone(r, g, b) { SKIN_WEIGHT } else { 0.0 };

            map.push((gx.abs() + gy.abs()) as f64 + SATURATION_WEIGHT * saturation as f64 + skin);
        }
    }
    map
}

/// Summed-area table for O(1) window sums.
struct SummedArea {
    stride: usize,
    table: Vec<f64>,
}

impl SummedArea {
    fn new(values: &[f64], width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        let stride = w + 1;
        let mut table = vec![0.0; stride * (h + 1)];

        for y in 0..h {
            let mut row_sum = 0.0;
            for x in 0..w {
                row_sum += values[y * w + x];
                table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
            }
        }

        Self { stride, table }
    }

    fn sum(&self, x: u32, y: u32, width: u32, height: u32) -> f64 {
        let (x0, y0) = (x as usize, y as usize);
        let (x1, y1) = (x0 + width as usize, y0 + height as usize);
        let at = |xx: usize, yy: usize| self.table[yy * self.stride + xx];
        at(x1, y1) - at(x0, y1) - at(x1, y0) + at(x0, y0)
    }
}
