use crate::hsv::{Hsv, HsvRange};
use image::{Rgb, RgbImage};
use thiserror::Error;

/// Errors raised while classifying a cropped region
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("invalid region: {width}x{height} has no area")]
    InvalidRegion { width: u32, height: u32 },
}

/// Tunable parameters of the red/yellow colour heuristic.
///
/// Every crop is resized to `canonical_width` x `canonical_height` before thresholding,
/// so `threshold` is a fraction of that fixed pixel count regardless of the detected box size.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub canonical_width: u32,
    pub canonical_height: u32,
    /// Red just above hue 0
    pub red_lower: HsvRange,
    /// Red just below hue 180, where the hue circle wraps
    pub red_upper: HsvRange,
    pub yellow: HsvRange,
    /// Fraction of canonical pixels that must match before a crop counts as red/yellow
    pub threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            canonical_width: 30,
            canonical_height: 90,
            red_lower: HsvRange::new(Hsv::new(0, 70, 50), Hsv::new(10, 255, 255)),
            red_upper: HsvRange::new(Hsv::new(170, 70, 50), Hsv::new(180, 255, 255)),
            yellow: HsvRange::new(Hsv::new(21, 39, 64), Hsv::new(40, 255, 255)),
            threshold: 0.01,
        }
    }
}

impl ClassifierConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_canonical_size(mut self, width: u32, height: u32) -> Self {
        self.canonical_width = width;
        self.canonical_height = height;
        self
    }

    /// All ranges whose union makes up the stop-colour mask
    pub fn stop_ranges(&self) -> [&HsvRange; 3] {
        [&self.red_lower, &self.red_upper, &self.yellow]
    }

    /// Pixel count of the canonical grid, `None` when it is empty or does not fit a `u32`
    fn canonical_area(&self) -> Option<u32> {
        self.canonical_width
            .checked_mul(self.canonical_height)
            .filter(|area| *area > 0)
    }
}

/// Source coordinate and blend weight for one destination index, pixel-centre aligned
/// and clamped at the borders (`cv2.INTER_LINEAR` convention).
fn linear_tap(dst: u32, scale: f32, src_len: u32) -> (u32, u32, f32) {
    let pos = (dst as f32 + 0.5) * scale - 0.5;
    let floor = pos.floor();
    if floor < 0.0 {
        return (0, 0, 0.0);
    }
    let i0 = floor as u32;
    if i0 >= src_len - 1 {
        return (src_len - 1, src_len - 1, 0.0);
    }
    (i0, i0 + 1, pos - floor)
}

/// Bilinear resize sampling the 2x2 source neighbourhood of every destination pixel.
///
/// Unlike `imageops::resize` with `FilterType::Triangle`, the kernel does not widen when
/// shrinking, so thin lit features survive downscaling.
pub fn resize_linear(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (src_width, src_height) = src.dimensions();
    let scale_x = src_width as f32 / width as f32;
    let scale_y = src_height as f32 / height as f32;

    let columns: Vec<(u32, u32, f32)> = (0..width).map(|x| linear_tap(x, scale_x, src_width)).collect();

    RgbImage::from_fn(width, height, |x, y| {
        let (x0, x1, fx) = columns[x as usize];
        let (y0, y1, fy) = linear_tap(y, scale_y, src_height);
        let (p00, p10) = (src.get_pixel(x0, y0), src.get_pixel(x1, y0));
        let (p01, p11) = (src.get_pixel(x0, y1), src.get_pixel(x1, y1));

        let mut out = [0u8; 3];
        for (c, value) in out.iter_mut().enumerate() {
            let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
            let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
            *value = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    })
}

/// Decides whether a traffic-light crop is showing a red or yellow lamp
#[derive(Debug, Clone, Default)]
pub struct ColorClassifier {
    config: ClassifierConfig,
}

impl ColorClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Computes the fraction of canonical pixels falling inside any stop-colour range
    ///
    /// # Arguments
    /// * `crop` - The traffic-light region cut out of the frame
    ///
    /// # Returns
    /// A rate in [0, 1], or `InvalidRegion` when the crop (or the configured canonical size) has no area
    /// or the canonical size overflows
    pub fn stop_color_rate(&self, crop: &RgbImage) -> Result<f32, ClassifyError> {
        let (width, height) = crop.dimensions();
        if width == 0 || height == 0 {
            return Err(ClassifyError::InvalidRegion { width, height });
        }
        let area = self.config.canonical_area().ok_or(ClassifyError::InvalidRegion {
            width: self.config.canonical_width,
            height: self.config.canonical_height,
        })?;

        let canonical = resize_linear(crop, self.config.canonical_width, self.config.canonical_height);

        let ranges = self.config.stop_ranges();
        let matching = canonical
            .pixels()
            .map(Hsv::from_rgb)
            .filter(|hsv| ranges.iter().any(|range| range.contains(hsv)))
            .count();

        Ok(matching as f32 / area as f32)
    }

    /// Returns true when the crop is dominated by a red or yellow signal
    pub fn classify(&self, crop: &RgbImage) -> Result<bool, ClassifyError> {
        Ok(self.stop_color_rate(crop)? > self.config.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    /// Top `red_rows` rows red, the rest green
    fn split(width: u32, height: u32, red_rows: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |_, y| {
            if y < red_rows {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 255, 0])
            }
        })
    }

    #[test]
    fn test_pure_red_is_stop() {
        let classifier = ColorClassifier::default();
        assert!(classifier.classify(&solid(40, 120, [255, 0, 0])).unwrap());
    }

    #[test]
    fn test_pure_green_is_go() {
        let classifier = ColorClassifier::default();
        let crop = solid(40, 120, [0, 255, 0]);
        assert_eq!(classifier.stop_color_rate(&crop).unwrap(), 0.0);
        assert!(!classifier.classify(&crop).unwrap());
    }

    #[test]
    fn test_upper_red_hue_is_stop() {
        let classifier = ColorClassifier::default();
        // hue 175 on the 0..=180 scale
        assert!(classifier.classify(&solid(12, 30, [255, 0, 42])).unwrap());
    }

    #[test]
    fn test_yellow_is_stop() {
        let classifier = ColorClassifier::default();
        assert!(classifier.classify(&solid(30, 90, [255, 200, 0])).unwrap());
    }

    #[test]
    fn test_dark_and_unsaturated_red_are_ignored() {
        let classifier = ColorClassifier::default();
        // value below 50
        assert!(!classifier.classify(&solid(30, 90, [40, 0, 0])).unwrap());
        // saturation below 70
        assert!(!classifier.classify(&solid(30, 90, [200, 160, 160])).unwrap());
    }

    #[test]
    fn test_rate_is_relative_to_canonical_size() {
        let classifier = ColorClassifier::default();
        // Already canonical, so no resampling blurs the boundary
        let rate = classifier.stop_color_rate(&split(30, 90, 45)).unwrap();
        assert!((rate - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let crop = split(25, 70, 7);
        let thresholds = [0.0, 0.005, 0.01, 0.05, 0.09, 0.1, 0.11, 0.5, 1.0];
        let results: Vec<bool> = thresholds
            .iter()
            .map(|&t| {
                ColorClassifier::new(ClassifierConfig::default().with_threshold(t))
                    .classify(&crop)
                    .unwrap()
            })
            .collect();

        // Once a higher threshold rejects the crop, no higher threshold may accept it
        for pair in results.windows(2) {
            assert!(pair[0] || !pair[1], "results not monotone: {:?}", results);
        }
        assert!(results[0]);
        assert!(!results[thresholds.len() - 1]);
    }

    #[test]
    fn test_rate_equal_to_threshold_is_not_stop() {
        let crop = split(30, 90, 9); // exactly 10% red
        let classifier = ColorClassifier::new(ClassifierConfig::default().with_threshold(0.1));
        let rate = classifier.stop_color_rate(&crop).unwrap();
        assert!((rate - 0.1).abs() < 1e-6);
        assert_eq!(classifier.classify(&crop).unwrap(), rate > 0.1);
    }

    #[test]
    fn test_degenerate_crop_is_rejected() {
        let classifier = ColorClassifier::default();
        assert_eq!(
            classifier.classify(&RgbImage::new(0, 40)),
            Err(ClassifyError::InvalidRegion { width: 0, height: 40 })
        );
        assert_eq!(
            classifier.classify(&RgbImage::new(12, 0)),
            Err(ClassifyError::InvalidRegion { width: 12, height: 0 })
        );
    }

    #[test]
    fn test_zero_canonical_size_is_rejected() {
        let config = ClassifierConfig::default().with_canonical_size(0, 90);
        let classifier = ColorClassifier::new(config);
        assert!(classifier.classify(&solid(10, 10, [255, 0, 0])).is_err());
    }

    #[test]
    fn test_overflowing_canonical_size_is_rejected() {
        let config = ClassifierConfig::default().with_canonical_size(u32::MAX, 2);
        let classifier = ColorClassifier::new(config);
        assert_eq!(
            classifier.classify(&solid(10, 10, [255, 0, 0])),
            Err(ClassifyError::InvalidRegion { width: u32::MAX, height: 2 })
        );
    }

    #[test]
    fn test_thin_lit_columns_survive_downscaling() {
        // One red column in every ten on black, shrunk 10x to the canonical grid
        let crop = RgbImage::from_fn(300, 900, |x, _| {
            if x % 10 == 4 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 0]) }
        });
        let classifier = ColorClassifier::default();

        let rate = classifier.stop_color_rate(&crop).unwrap();
        assert!((rate - 1.0).abs() < 1e-6, "rate = {}", rate);
        assert!(classifier.classify(&crop).unwrap());
    }

    #[test]
    fn test_resize_linear_samples_between_neighbours() {
        let src = RgbImage::from_fn(300, 900, |x, _| {
            if x % 10 == 4 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 0]) }
        });
        let out = resize_linear(&src, 30, 90);
        assert_eq!(out.dimensions(), (30, 90));
        // Each output pixel sits halfway between a red column and its black neighbour
        assert_eq!(*out.get_pixel(0, 0), Rgb([128, 0, 0]));
        assert_eq!(*out.get_pixel(29, 89), Rgb([128, 0, 0]));
    }

    #[test]
    fn test_resize_linear_same_size_is_identity() {
        let src = RgbImage::from_fn(7, 5, |x, y| Rgb([x as u8 * 30, y as u8 * 40, 90]));
        assert_eq!(resize_linear(&src, 7, 5), src);
    }

    #[test]
    fn test_resize_linear_upscales_single_pixel() {
        let src = solid(1, 1, [255, 200, 0]);
        let out = resize_linear(&src, 30, 90);
        assert!(out.pixels().all(|p| *p == Rgb([255, 200, 0])));
    }
}
