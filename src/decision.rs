use crate::classifier::ColorClassifier;
use image::RgbImage;
use image::imageops::crop_imm;
use log::debug;

/// Traffic-light class id in the COCO-80 taxonomy used by the YOLO detectors
pub const COCO_TRAFFIC_LIGHT: usize = 9;

/// Axis-aligned box in normalized [0, 1] frame coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub ymin: f32,
    pub xmin: f32,
    pub ymax: f32,
    pub xmax: f32,
}

impl BoundingBox {
    pub fn new(ymin: f32, xmin: f32, ymax: f32, xmax: f32) -> Self {
        Self {
            ymin,
            xmin,
            ymax,
            xmax,
        }
    }

    /// Scales the box to pixel coordinates of a `frame_width` x `frame_height` frame.
    ///
    /// Edges are rounded to the nearest pixel and clamped to the frame, so a box
    /// lying partly outside the frame is cut down and an inverted box collapses to zero area.
    pub fn to_pixels(&self, frame_width: u32, frame_height: u32) -> PixelBox {
        let scale = |v: f32, max: u32| -> u32 { (v * max as f32).round().clamp(0.0, max as f32) as u32 };
        let left = scale(self.xmin, frame_width);
        let top = scale(self.ymin, frame_height);
        PixelBox {
            left,
            top,
            right: scale(self.xmax, frame_width).max(left),
            bottom: scale(self.ymax, frame_height).max(top),
        }
    }
}

/// Box in pixel coordinates, right and bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// One object reported by the detector for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub score: f32,
    pub label: usize,
}

impl Detection {
    pub fn new(bbox: BoundingBox, score: f32, label: usize) -> Self {
        Self { bbox, score, label }
    }
}

/// Which detections take part in a frame decision
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionConfig {
    /// Detections must score strictly above this
    pub score_threshold: f32,
    pub target_label: usize,
    /// Only the first `max_detections` entries of a frame are considered
    pub max_detections: usize,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.5,
            target_label: COCO_TRAFFIC_LIGHT,
            max_detections: 20,
        }
    }
}

impl DecisionConfig {
    pub fn qualifies(&self, detection: &Detection) -> bool {
        detection.score > self.score_threshold && detection.label == self.target_label
    }
}

/// The per-frame outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Go,
    Stop,
}

impl Signal {
    /// Maps a frame decision (true = proceed) onto a signal
    pub fn from_decision(go: bool) -> Self {
        if go { Signal::Go } else { Signal::Stop }
    }

    pub fn is_go(&self) -> bool {
        *self == Signal::Go
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Go => "Go",
            Signal::Stop => "Stop",
        }
    }
}

/// Classification of a single qualifying traffic light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightReading {
    pub detection: Detection,
    pub pixel_box: PixelBox,
    /// True when the crop showed a red or yellow lamp
    pub stop_color: bool,
}

/// Classifies every qualifying traffic light of a frame
///
/// # Arguments
/// * `frame` - The full RGB frame the detections refer to
/// * `detections` - Detector output for the frame, in detector order
/// * `config` - Score/label filter and detection cap
/// * `classifier` - Colour heuristic applied to each crop
///
/// # Returns
/// One reading per qualifying detection with a non-degenerate crop, in input order.
/// Degenerate crops are skipped.
pub fn inspect(
    frame: &RgbImage,
    detections: &[Detection],
    config: &DecisionConfig,
    classifier: &ColorClassifier,
) -> Vec<LightReading> {
    let (frame_width, frame_height) = frame.dimensions();

    detections
        .iter()
        .take(config.max_detections)
        .filter(|detection| config.qualifies(detection))
        .filter_map(|detection| {
            let pixel_box = detection.bbox.to_pixels(frame_width, frame_height);
            let crop = crop_imm(
                frame,
                pixel_box.left,
                pixel_box.top,
                pixel_box.width(),
                pixel_box.height(),
            )
            .to_image();

            match classifier.classify(&crop) {
                Ok(stop_color) => {
                    debug!(
                        "traffic light {:?} score {:.3}: {}",
                        pixel_box,
                        detection.score,
                        if stop_color { "red/yellow" } else { "not red/yellow" }
                    );
                    Some(LightReading {
                        detection: *detection,
                        pixel_box,
                        stop_color,
                    })
                }
                Err(e) => {
                    debug!("skipping traffic light {:?}: {}", detection.bbox, e);
                    None
                }
            }
        })
        .collect()
}

/// Reduces a frame's readings to the go/stop decision: false as soon as any light is red or yellow
pub fn decide_from_readings(readings: &[LightReading]) -> bool {
    !readings.iter().any(|reading| reading.stop_color)
}

/// Decides whether to proceed (true) or stop (false) for one frame
pub fn decide(
    frame: &RgbImage,
    detections: &[Detection],
    config: &DecisionConfig,
    classifier: &ColorClassifier,
) -> bool {
    decide_from_readings(&inspect(frame, detections, config, classifier))
}
