use image::Rgb;

/// A pixel in 8-bit HSV space.
///
/// Hue is stored halved so that it fits a byte: 0..=180 covers the full circle.
/// Saturation and value span 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Converts an RGB pixel to 8-bit HSV
    ///
    /// # Arguments
    /// * `rgb` - The pixel to convert
    ///
    /// # Returns
    /// The HSV pixel, with hue in 0..=180 and saturation/value in 0..=255.
    /// Achromatic pixels (grey, black, white) get a hue of 0.
    pub fn from_rgb(rgb: &Rgb<u8>) -> Self {
        let [r, g, b] = rgb.0;
        let (r, g, b) = (r as f32, g as f32, b as f32);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max > 0.0 { delta * 255.0 / max } else { 0.0 };

        let mut h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / delta
        } else if max == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        if h < 0.0 {
            h += 360.0;
        }

        Self {
            h: (h / 2.0).round().min(180.0) as u8,
            s: s.round() as u8,
            v: max as u8,
        }
    }
}

/// An inclusive box in HSV space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl HsvRange {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// Returns true when every channel of `pixel` lies within the range bounds (inclusive)
    pub fn contains(&self, pixel: &Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&pixel.h)
            && (self.lower.s..=self.upper.s).contains(&pixel.s)
            && (self.lower.v..=self.upper.v).contains(&pixel.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(Hsv::from_rgb(&Rgb([255, 0, 0])), Hsv::new(0, 255, 255));
        assert_eq!(Hsv::from_rgb(&Rgb([0, 255, 0])), Hsv::new(60, 255, 255));
        assert_eq!(Hsv::from_rgb(&Rgb([0, 0, 255])), Hsv::new(120, 255, 255));
    }

    #[test]
    fn test_achromatic_pixels() {
        assert_eq!(Hsv::from_rgb(&Rgb([0, 0, 0])), Hsv::new(0, 0, 0));
        assert_eq!(Hsv::from_rgb(&Rgb([255, 255, 255])), Hsv::new(0, 0, 255));
        assert_eq!(Hsv::from_rgb(&Rgb([128, 128, 128])), Hsv::new(0, 0, 128));
    }

    #[test]
    fn test_hue_wraps_into_upper_red() {
        // 350 degrees, just short of a full turn
        let hsv = Hsv::from_rgb(&Rgb([255, 0, 42]));
        assert_eq!(hsv.h, 175);
        assert_eq!(hsv.s, 255);
        assert_eq!(hsv.v, 255);
    }

    #[test]
    fn test_yellow_and_saturation() {
        let yellow = Hsv::from_rgb(&Rgb([255, 200, 0]));
        assert_eq!(yellow.h, 24);

        // Washed out red keeps its hue but loses saturation
        let pale = Hsv::from_rgb(&Rgb([200, 150, 150]));
        assert_eq!(pale.h, 0);
        assert_eq!(pale.s, 64);
        assert_eq!(pale.v, 200);
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = HsvRange::new(Hsv::new(0, 70, 50), Hsv::new(10, 255, 255));
        assert!(range.contains(&Hsv::new(0, 70, 50)));
        assert!(range.contains(&Hsv::new(10, 255, 255)));
        assert!(!range.contains(&Hsv::new(11, 255, 255)));
        assert!(!range.contains(&Hsv::new(5, 69, 255)));
        assert!(!range.contains(&Hsv::new(5, 255, 49)));
    }
}
