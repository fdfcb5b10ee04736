use crate::decision::{BoundingBox, Detection};
use usls::{Hbb, Y};

/// Label given to boxes the detector did not assign a class id to; never matches a target label
pub const UNKNOWN_LABEL: usize = usize::MAX;

/// Normalizes a pixel-space box against the frame size
///
/// # Arguments
/// * `xyxy` - `[xmin, ymin, xmax, ymax]` in pixels
/// * `frame_width`, `frame_height` - Dimensions of the frame the box was detected in
///
/// # Returns
/// The box in [0, 1] coordinates, or `None` when the frame has no area
pub fn normalize_xyxy(xyxy: [f32; 4], frame_width: f32, frame_height: f32) -> Option<BoundingBox> {
    if frame_width <= 0.0 || frame_height <= 0.0 {
        return None;
    }
    let [xmin, ymin, xmax, ymax] = xyxy;
    let norm = |v: f32, extent: f32| (v / extent).clamp(0.0, 1.0);
    Some(BoundingBox::new(
        norm(ymin, frame_height),
        norm(xmin, frame_width),
        norm(ymax, frame_height),
        norm(xmax, frame_width),
    ))
}

/// Converts detector boxes into normalized detections, preserving detector order
pub fn detections_from_hbbs(hbbs: &[Hbb], frame_width: f32, frame_height: f32) -> Vec<Detection> {
    hbbs.iter()
        .filter_map(|hbb| {
            let bbox = normalize_xyxy(
                [hbb.xmin(), hbb.ymin(), hbb.xmax(), hbb.ymax()],
                frame_width,
                frame_height,
            )?;
            Some(Detection::new(
                bbox,
                hbb.confidence().unwrap_or(0.0),
                hbb.id().unwrap_or(UNKNOWN_LABEL),
            ))
        })
        .collect()
}

/// Extracts all horizontal-box detections from one detector result
pub fn detections_from_y(y: &Y, frame_width: f32, frame_height: f32) -> Vec<Detection> {
    if let Some(hbbs) = y.hbbs() {
        detections_from_hbbs(hbbs, frame_width, frame_height)
    } else {
        vec![]
    }
}
