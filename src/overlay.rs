use crate::decision::{LightReading, PixelBox, Signal};
use image::{Rgb, RgbImage};

pub const STOP_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const GO_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Placement of the stop/go indicator in the top-left corner
const INDICATOR_X: u32 = 15;
const INDICATOR_Y: u32 = 5;
const INDICATOR_WIDTH: u32 = 60;
const INDICATOR_HEIGHT: u32 = 25;

const BOX_THICKNESS: u32 = 3;

pub fn signal_color(signal: Signal) -> Rgb<u8> {
    match signal {
        Signal::Go => GO_COLOR,
        Signal::Stop => STOP_COLOR,
    }
}

/// Fills a rectangle, clipped to the image
pub fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let (w, h) = img.dimensions();
    let x1 = x.saturating_add(width).min(w);
    let y1 = y.saturating_add(height).min(h);
    for yy in y.min(h)..y1 {
        for xx in x.min(w)..x1 {
            img.put_pixel(xx, yy, color);
        }
    }
}

/// Draws a rectangle border of the given thickness inside `bbox`, clipped to the image
pub fn draw_rect(img: &mut RgbImage, bbox: &PixelBox, color: Rgb<u8>, thickness: u32) {
    let (width, height) = (bbox.width(), bbox.height());
    if width == 0 || height == 0 {
        return;
    }
    let t = thickness.min(width).min(height);

    // top, bottom, left, right
    fill_rect(img, bbox.left, bbox.top, width, t, color);
    fill_rect(img, bbox.left, bbox.bottom - t, width, t, color);
    fill_rect(img, bbox.left, bbox.top, t, height, color);
    fill_rect(img, bbox.right - t, bbox.top, t, height, color);
}

/// Renders the frame decision onto a copy of the frame
///
/// # Arguments
/// * `frame` - The frame to annotate (usually already carrying the detector's boxes)
/// * `signal` - The frame decision
/// * `readings` - Classified traffic lights; each is outlined red when stop-coloured, green otherwise
///
/// # Returns
/// The annotated copy
pub fn draw_signal(frame: &RgbImage, signal: Signal, readings: &[LightReading]) -> RgbImage {
    let mut out = frame.clone();

    for reading in readings {
        let color = if reading.stop_color { STOP_COLOR } else { GO_COLOR };
        draw_rect(&mut out, &reading.pixel_box, color, BOX_THICKNESS);
    }

    fill_rect(
        &mut out,
        INDICATOR_X,
        INDICATOR_Y,
        INDICATOR_WIDTH,
        INDICATOR_HEIGHT,
        signal_color(signal),
    );

    out
}
