use crate::classifier::ColorClassifier;
use crate::cli::Args;
use crate::config;
use crate::decision::{self, DecisionConfig, Signal};
use crate::detection;
use crate::overlay;
use crate::progress::SignalProgressTracker;
use crate::recorder::FrameRecorder;
use crate::sampler::FrameSampler;
use anyhow::Result;
use log::{debug, info};
use usls::{Annotator, DataLoader, Image, Viewer, Y, models::YOLO};

/// Runs the detector over a stream and turns every sampled frame into a stop/go command
pub struct SignalVideoProcessor {
    sampler: FrameSampler,
    classifier: ColorClassifier,
    decision_config: DecisionConfig,
    progress: SignalProgressTracker,
    recorder: Option<FrameRecorder>,
    commands: Vec<bool>,
}

impl SignalVideoProcessor {
    /// Creates a processor configured from command line arguments.
    /// Rendered frames are saved through `recorder` when one is given.
    pub fn new(args: &Args, recorder: Option<FrameRecorder>) -> Self {
        Self {
            sampler: FrameSampler::new(args.every),
            classifier: ColorClassifier::new(config::classifier_config(args)),
            decision_config: config::decision_config(args),
            progress: SignalProgressTracker::new(&args.source),
            recorder,
            commands: Vec::new(),
        }
    }

    /// Processes the stream until it ends or the user cancels
    ///
    /// # Returns
    /// The decision of every processed frame in stream order, true meaning go
    pub fn process_video(
        &mut self,
        args: &Args,
        model: &mut YOLO,
        viewer: &mut Viewer,
        data_loader: &DataLoader,
        annotator: &Annotator,
    ) -> Result<Vec<bool>> {
        info!("processing every {} frame(s) of {}", self.sampler.every(), args.source);

        for xs in data_loader {
            if viewer.is_window_exist() && !viewer.is_window_open() {
                break;
            }

            // Handle key events and delay
            if let Some(key) = viewer.wait_key(1) {
                if key == usls::Key::Escape || key == usls::Key::Q {
                    info!("cancelled after {} frames", self.sampler.seen());
                    break;
                }
            }

            let mut frame_numbers = Vec::new();
            let sampled: Vec<Image> = xs
                .into_iter()
                .filter(|_| {
                    let keep = self.sampler.tick();
                    if keep {
                        frame_numbers.push(self.sampler.seen());
                    }
                    keep
                })
                .collect();
            if sampled.is_empty() {
                continue;
            }

            let ys = model.forward(&sampled)?;

            for ((x, y), frame_number) in sampled.iter().zip(ys.iter()).zip(frame_numbers) {
                self.process_frame(args, frame_number, x, y, viewer, annotator)?;
            }
        }

        self.progress.finish();
        info!(
            "processed {} of {} frames: {} stop, {} go",
            self.progress.processed_frames(),
            self.sampler.seen(),
            self.progress.stop_frames(),
            self.progress.go_frames()
        );
        if let Some(recorder) = &self.recorder {
            info!("{} frames saved to: {}", recorder.written(), recorder.dir().display());
        }
        Ok(std::mem::take(&mut self.commands))
    }

    /// Decides, renders and records a single sampled frame
    fn process_frame(
        &mut self,
        args: &Args,
        frame_number: u64,
        x: &Image,
        y: &Y,
        viewer: &mut Viewer,
        annotator: &Annotator,
    ) -> Result<()> {
        let frame = x.to_rgb8();
        let (width, height) = frame.dimensions();

        let detections = detection::detections_from_y(y, width as f32, height as f32);
        let readings = decision::inspect(&frame, &detections, &self.decision_config, &self.classifier);
        let go = decision::decide_from_readings(&readings);
        let signal = Signal::from_decision(go);

        debug!("detections: {:?}", detections);
        info!(
            "frame {}: {} ({} traffic lights)",
            frame_number,
            signal.as_str(),
            readings.len()
        );

        self.commands.push(go);
        self.progress.record(signal);

        if args.headless && self.recorder.is_none() {
            return Ok(());
        }

        let annotated = if args.headless {
            frame
        } else {
            annotator.annotate(x, y)?.to_rgb8()
        };
        let rendered = overlay::draw_signal(&annotated, signal, &readings);

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.write(frame_number, &rendered)?;
        }
        if !args.headless {
            viewer.imshow(&Image::from(rendered))?;
        }
        Ok(())
    }
}
